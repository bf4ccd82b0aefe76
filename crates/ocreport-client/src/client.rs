use std::time::Duration;

use chrono::Utc;
use tokio::process::Command;
use tracing::debug;

use ocreport_types::{DeploymentConfigSummary, PodSummary};

use crate::{ClientError, parse_deployment_configs, parse_namespaces, parse_pods};

/// Resource kinds queried through the client
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Namespace,
    DeploymentConfig,
    Pod,
}

impl ResourceKind {
    /// Short name passed to `oc get`
    pub fn as_arg(&self) -> &'static str {
        match self {
            Self::Namespace => "ns",
            Self::DeploymentConfig => "dc",
            Self::Pod => "pods",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Namespace => "namespaces",
            Self::DeploymentConfig => "deployment configs",
            Self::Pod => "pods",
        }
    }

    /// Arguments for `<client> get <kind> [-n <namespace>] -o json`
    pub fn get_args(&self, namespace: Option<&str>) -> Vec<String> {
        let mut args = vec!["get".to_string(), self.as_arg().to_string()];
        if let Some(namespace) = namespace {
            args.push("-n".to_string());
            args.push(namespace.to_string());
        }
        args.push("-o".to_string());
        args.push("json".to_string());
        args
    }
}

/// Source of cluster resources for the report pipeline
pub trait ClusterSource {
    /// All namespace names, in the order the cluster lists them
    fn list_namespaces(&self) -> impl Future<Output = Result<Vec<String>, ClientError>>;

    fn list_deployment_configs(
        &self,
        namespace: &str,
    ) -> impl Future<Output = Result<Vec<DeploymentConfigSummary>, ClientError>>;

    fn list_pods(
        &self,
        namespace: &str,
    ) -> impl Future<Output = Result<Vec<PodSummary>, ClientError>>;

    /// Namespaces present in the cluster, restricted to `filter` when given
    fn get_namespaces(
        &self,
        filter: Option<&[String]>,
    ) -> impl Future<Output = Result<Vec<String>, ClientError>> {
        async move {
            self.list_namespaces()
                .await
                .map(|all| select_namespaces(all, filter))
        }
    }
}

/// Keep the namespaces named in `filter`, in the cluster's order
///
/// No filter, or an empty one, keeps everything.
pub fn select_namespaces(all: Vec<String>, filter: Option<&[String]>) -> Vec<String> {
    match filter {
        Some(wanted) if !wanted.is_empty() => {
            all.into_iter().filter(|ns| wanted.contains(ns)).collect()
        }
        _ => all,
    }
}

/// Wrapper around the `oc` command-line client
///
/// Authentication is whatever session the client binary already holds.
#[derive(Clone, Debug)]
pub struct OcClient {
    binary: String,
    timeout: Option<Duration>,
}

impl OcClient {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            timeout: None,
        }
    }

    /// Bound every client invocation by `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Run `oc get` for a resource kind and return its stdout
    async fn get_json(
        &self,
        kind: ResourceKind,
        namespace: Option<&str>,
    ) -> Result<Vec<u8>, ClientError> {
        let args = kind.get_args(namespace);
        let command_line = format!("{} {}", self.binary, args.join(" "));
        debug!(command = %command_line, "invoking client");

        let mut command = Command::new(&self.binary);
        command.args(&args).kill_on_drop(true);

        let output = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, command.output())
                .await
                .map_err(|_| ClientError::Timeout {
                    command: command_line.clone(),
                    timeout,
                })?,
            None => command.output().await,
        }
        .map_err(|source| ClientError::Spawn {
            command: command_line.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(ClientError::Failed {
                command: command_line,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

impl ClusterSource for OcClient {
    async fn list_namespaces(&self) -> Result<Vec<String>, ClientError> {
        let json = self.get_json(ResourceKind::Namespace, None).await?;
        parse_namespaces(&json)
    }

    async fn list_deployment_configs(
        &self,
        namespace: &str,
    ) -> Result<Vec<DeploymentConfigSummary>, ClientError> {
        let json = self
            .get_json(ResourceKind::DeploymentConfig, Some(namespace))
            .await?;
        parse_deployment_configs(&json, Utc::now())
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodSummary>, ClientError> {
        let json = self.get_json(ResourceKind::Pod, Some(namespace)).await?;
        parse_pods(&json, Utc::now())
    }
}

//! Parsing of `oc get <kind> -o json` output

use chrono::{DateTime, Utc};
use serde::Deserialize;

use ocreport_types::{
    DeploymentConfigSummary, PodPhase, PodSummary, format_age, parse_creation_timestamp,
};

use crate::ClientError;

#[derive(Deserialize)]
struct ItemList<T> {
    items: Option<Vec<T>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Metadata {
    name: Option<String>,
    creation_timestamp: Option<String>,
}

impl Metadata {
    fn name(&mut self) -> Result<String, ClientError> {
        self.name
            .take()
            .ok_or(ClientError::MissingField("metadata.name"))
    }

    fn age(&self, now: DateTime<Utc>) -> Result<String, ClientError> {
        let raw = self
            .creation_timestamp
            .as_deref()
            .ok_or(ClientError::MissingField("metadata.creationTimestamp"))?;
        Ok(format_age(parse_creation_timestamp(raw)?, now))
    }
}

#[derive(Deserialize)]
struct NamespaceItem {
    metadata: Metadata,
}

#[derive(Deserialize)]
struct DeploymentConfigItem {
    metadata: Metadata,
    status: Option<DeploymentConfigStatus>,
}

#[derive(Deserialize)]
struct DeploymentConfigStatus {
    replicas: Option<u32>,
}

#[derive(Deserialize)]
struct PodItem {
    metadata: Metadata,
    status: Option<PodStatus>,
}

#[derive(Deserialize)]
struct PodStatus {
    phase: Option<String>,
}

/// Extract namespace names in listing order
///
/// A document without `items` is an error here, since nothing can be
/// reported without the namespace list.
pub fn parse_namespaces(json: &[u8]) -> Result<Vec<String>, ClientError> {
    let list: ItemList<NamespaceItem> = serde_json::from_slice(json)?;
    list.items
        .ok_or(ClientError::MissingField("items"))?
        .into_iter()
        .map(|mut item| item.metadata.name())
        .collect()
}

/// Extract deployment config summaries in listing order
///
/// A missing `status.replicas` counts as zero replicas.
pub fn parse_deployment_configs(
    json: &[u8],
    now: DateTime<Utc>,
) -> Result<Vec<DeploymentConfigSummary>, ClientError> {
    let list: ItemList<DeploymentConfigItem> = serde_json::from_slice(json)?;
    list.items
        .unwrap_or_default()
        .into_iter()
        .map(|mut item| -> Result<DeploymentConfigSummary, ClientError> {
            let replicas = item.status.and_then(|s| s.replicas).unwrap_or(0);
            let age = item.metadata.age(now)?;
            Ok(DeploymentConfigSummary::new(
                item.metadata.name()?,
                replicas,
                age,
            ))
        })
        .collect()
}

/// Extract pod summaries in listing order
///
/// Every pod must carry `status.phase`.
pub fn parse_pods(json: &[u8], now: DateTime<Utc>) -> Result<Vec<PodSummary>, ClientError> {
    let list: ItemList<PodItem> = serde_json::from_slice(json)?;
    list.items
        .unwrap_or_default()
        .into_iter()
        .map(|mut item| -> Result<PodSummary, ClientError> {
            let phase = item
                .status
                .and_then(|s| s.phase)
                .ok_or(ClientError::MissingField("status.phase"))?;
            let age = item.metadata.age(now)?;
            Ok(PodSummary::new(
                item.metadata.name()?,
                PodPhase::from(phase.as_str()),
                age,
            ))
        })
        .collect()
}

//! Shared types for ocreport
//!
//! This crate contains the report data model and the age formatting used
//! by both the client and the HTML renderer.

mod age;

pub use age::{TimestampError, format_age, parse_creation_timestamp};

use std::fmt;

// ============================================================================
// Resource Summaries
// ============================================================================

/// Deployment config as shown in the report
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentConfigSummary {
    pub name: String,
    pub replicas: u32,
    pub age: String,
}

impl DeploymentConfigSummary {
    pub fn new(name: String, replicas: u32, age: String) -> Self {
        Self {
            name,
            replicas,
            age,
        }
    }
}

/// Pod as shown in the report
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PodSummary {
    pub name: String,
    pub status: PodPhase,
    pub age: String,
}

impl PodSummary {
    pub fn new(name: String, status: PodPhase, age: String) -> Self {
        Self { name, status, age }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PodPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    Unknown,
}

impl PodPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<&str> for PodPhase {
    fn from(s: &str) -> Self {
        match s {
            "Pending" => Self::Pending,
            "Running" => Self::Running,
            "Succeeded" => Self::Succeeded,
            "Failed" => Self::Failed,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for PodPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Report Data
// ============================================================================

/// Resources collected for a single namespace
///
/// Both sequences are always present. A kind that could not be fetched is
/// represented by an empty sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamespaceReport {
    pub name: String,
    pub deployment_configs: Vec<DeploymentConfigSummary>,
    pub pods: Vec<PodSummary>,
}

impl NamespaceReport {
    pub fn new(name: String) -> Self {
        Self {
            name,
            deployment_configs: Vec::new(),
            pods: Vec::new(),
        }
    }
}

/// All namespaces in the report, in the order the cluster listed them
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportData {
    pub namespaces: Vec<NamespaceReport>,
}

impl ReportData {
    pub fn new(namespaces: Vec<NamespaceReport>) -> Self {
        Self { namespaces }
    }

    /// Look up a namespace by name
    pub fn get(&self, name: &str) -> Option<&NamespaceReport> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }

    pub fn namespace_names(&self) -> Vec<&str> {
        self.namespaces.iter().map(|ns| ns.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pod_phase_from_str() {
        assert_eq!(PodPhase::from("Running"), PodPhase::Running);
        assert_eq!(PodPhase::from("Succeeded"), PodPhase::Succeeded);
        assert_eq!(PodPhase::from("CrashLoopBackOff"), PodPhase::Unknown);
        assert_eq!(PodPhase::Failed.to_string(), "Failed");
    }

    #[test]
    fn test_report_lookup() {
        let mut dev = NamespaceReport::new("dev".to_string());
        dev.pods.push(PodSummary::new(
            "web-1".to_string(),
            PodPhase::Running,
            "3m".to_string(),
        ));
        let data = ReportData::new(vec![NamespaceReport::new("prod".to_string()), dev]);

        assert_eq!(data.namespace_names(), vec!["prod", "dev"]);
        assert_eq!(data.get("dev").map(|ns| ns.pods.len()), Some(1));
        assert!(data.get("prod").is_some_and(|ns| ns.deployment_configs.is_empty()));
        assert!(data.get("qa").is_none());
    }
}

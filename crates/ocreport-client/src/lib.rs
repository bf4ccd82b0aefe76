//! OpenShift client for ocreport
//!
//! This crate shells out to the `oc` command-line client to list namespaces,
//! deployment configs, and pods, and turns its JSON output into report
//! summaries.

mod client;
mod error;
mod parse;

pub use client::{ClusterSource, OcClient, ResourceKind, select_namespaces};
pub use error::ClientError;
pub use parse::{parse_deployment_configs, parse_namespaces, parse_pods};

//! Report collection: namespaces first, then each namespace's resources

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use ocreport_client::{ClientError, ClusterSource, ResourceKind};
use ocreport_types::{NamespaceReport, ReportData};

/// Split a comma-separated namespace list, dropping blank entries
pub fn split_namespaces(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|ns| !ns.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collect deployment configs and pods for every selected namespace
///
/// Only the namespace listing can fail. A namespace whose resources cannot
/// be fetched is still reported, with empty tables. Up to `concurrency`
/// namespaces are in flight at once; the result keeps the cluster's order.
pub async fn collect_report<S: ClusterSource>(
    source: &S,
    filter: Option<&[String]>,
    concurrency: usize,
) -> Result<ReportData, ClientError> {
    let namespaces = source.get_namespaces(filter).await?;
    info!(count = namespaces.len(), "collecting namespace resources");

    let reports = stream::iter(namespaces)
        .map(|name| collect_namespace(source, name))
        .buffered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    Ok(ReportData::new(reports))
}

async fn collect_namespace<S: ClusterSource>(source: &S, name: String) -> NamespaceReport {
    let deployment_configs = or_empty(
        source.list_deployment_configs(&name).await,
        &name,
        ResourceKind::DeploymentConfig,
    );
    let pods = or_empty(source.list_pods(&name).await, &name, ResourceKind::Pod);

    NamespaceReport {
        name,
        deployment_configs,
        pods,
    }
}

fn or_empty<T>(
    result: Result<Vec<T>, ClientError>,
    namespace: &str,
    kind: ResourceKind,
) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!(
            namespace,
            kind = kind.label(),
            error = %e,
            "fetch failed, reporting no resources"
        );
        Vec::new()
    })
}

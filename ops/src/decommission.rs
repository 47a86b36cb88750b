use crate::clients::{ClusterClient, IdentityClient};
use crate::error::Result;
use crate::report::Reporter;
use crate::roles::remove_role;
use crate::wait::{self, wait_for};
use clusterops_types::{OpsConfig, Removal};
use clusterops_utils::impl_display_as_json;
use log::{info, warn};
use serde::Serialize;

/// What `decommission` removed, skipped or failed to remove.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decommissioned {
    pub nodegroups_deleted: Vec<String>,
    /// Node groups whose deletion failed, with the reason. These do not stop the run.
    pub nodegroup_failures: Vec<(String, String)>,
    pub cluster: Option<Removal>,
    pub roles: Vec<(String, Removal)>,
}

impl_display_as_json!(Decommissioned);

/// Tear down the cluster described by `config`: node groups, then the cluster, then its roles.
/// Each step waits for the previous one to finish on the provider side. Resources that are
/// already gone are skipped. Node group failures are reported and the run continues; any other
/// failure ends the run so that roles are never removed from under a live cluster.
///
/// The caller is responsible for confirming with the operator first.
pub async fn decommission<C>(
    client: &C,
    config: &OpsConfig,
    reporter: &dyn Reporter,
) -> Result<Decommissioned>
where
    C: ClusterClient + IdentityClient,
{
    let mut summary = Decommissioned::default();

    delete_nodegroups(client, config, reporter, &mut summary).await;
    summary.cluster = Some(delete_cluster(client, config, reporter).await?);

    for role in config.roles() {
        let removal = remove_role(client, &role.name, reporter).await?;
        summary.roles.push((role.name.clone(), removal));
    }

    info!("Decommission summary:\n{}", summary);
    Ok(summary)
}

async fn delete_nodegroups<C>(
    client: &C,
    config: &OpsConfig,
    reporter: &dyn Reporter,
    summary: &mut Decommissioned,
) where
    C: ClusterClient,
{
    let cluster = &config.cluster.name;
    let nodegroups = match client.nodegroup_names(cluster).await {
        Ok(nodegroups) => nodegroups,
        Err(e) => {
            warn!("Unable to list node groups for '{}': {}", cluster, e);
            reporter.warn(&format!("Node group deletion skipped or failed: {}", e));
            return;
        }
    };

    for nodegroup in nodegroups {
        match delete_nodegroup(client, config, &nodegroup, reporter).await {
            Ok(_) => summary.nodegroups_deleted.push(nodegroup),
            Err(e) => {
                warn!("Unable to delete node group '{}': {}", nodegroup, e);
                reporter.warn(&format!(
                    "Node group {} deletion skipped or failed: {}",
                    nodegroup, e
                ));
                summary.nodegroup_failures.push((nodegroup, e.to_string()));
            }
        }
    }
}

async fn delete_nodegroup<C>(
    client: &C,
    config: &OpsConfig,
    nodegroup: &str,
    reporter: &dyn Reporter,
) -> Result<()>
where
    C: ClusterClient,
{
    let cluster = &config.cluster.name;
    reporter.start(&format!("Deleting node group: {}", nodegroup));
    if client.delete_nodegroup(cluster, nodegroup).await? == Removal::NotFound {
        reporter.skip(&format!("Node group {} not found. Skipping.", nodegroup));
        return Ok(());
    }

    reporter.start("Waiting for node group to delete...");
    wait_for(
        &format!("node group '{}' to be deleted", nodegroup),
        &config.waits.nodegroup_deleted,
        || client.nodegroup_state(cluster, nodegroup),
        wait::nodegroup_deleted,
    )
    .await?;
    reporter.done(&format!("Node group {} deleted.", nodegroup));
    Ok(())
}

async fn delete_cluster<C>(
    client: &C,
    config: &OpsConfig,
    reporter: &dyn Reporter,
) -> Result<Removal>
where
    C: ClusterClient,
{
    let cluster = &config.cluster.name;
    reporter.start(&format!("Deleting EKS cluster: {}", cluster));
    let removal = client.delete_cluster(cluster).await?;
    if removal == Removal::NotFound {
        reporter.skip("Cluster not found. Skipping deletion.");
        return Ok(removal);
    }

    reporter.start("Waiting for cluster deletion to complete...");
    wait_for(
        &format!("cluster '{}' to be deleted", cluster),
        &config.waits.cluster_deleted,
        || client.cluster_state(cluster),
        wait::cluster_deleted,
    )
    .await?;
    reporter.done("EKS cluster deleted.");
    Ok(removal)
}

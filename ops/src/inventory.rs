use crate::clients::{ClusterClient, ComputeClient, DatabaseClient};
use crate::error::Result;
use crate::report::Reporter;
use clusterops_types::{ClusterSummary, Inventory};
use log::debug;

/// List the running EC2 instances, every EKS cluster and the available RDS instances. Each
/// section is reported as soon as it has been listed; the first failed listing ends the check.
pub async fn check_inventory<C>(
    client: &C,
    region: &str,
    reporter: &dyn Reporter,
) -> Result<Inventory>
where
    C: ComputeClient + ClusterClient + DatabaseClient,
{
    let mut inventory = Inventory {
        region: region.to_string(),
        ..Default::default()
    };

    reporter.start("Checking EC2 Instances...");
    inventory.instances = client.running_instances().await?;
    for instance in &inventory.instances {
        reporter.item(&instance.to_string());
    }

    reporter.start("Checking EKS Clusters...");
    for name in client.cluster_names().await? {
        match client.cluster_state(&name).await? {
            Some(status) => {
                let cluster = ClusterSummary { name, status };
                reporter.item(&cluster.to_string());
                inventory.clusters.push(cluster);
            }
            None => debug!("Cluster '{}' disappeared before it could be described", name),
        }
    }

    reporter.start("Checking RDS Instances...");
    inventory.databases = client
        .db_instances()
        .await?
        .into_iter()
        .filter(|db| db.is_available())
        .collect();
    for database in &inventory.databases {
        reporter.item(&database.to_string());
    }

    debug!("Inventory:\n{}", inventory);
    Ok(inventory)
}

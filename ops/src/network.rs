use crate::clients::ComputeClient;
use crate::error::{self, Result};
use crate::report::Reporter;
use clusterops_types::{OpsConfig, SubnetSummary};
use log::debug;
use snafu::{ensure, OptionExt};
use std::collections::BTreeSet;

/// Find the default VPC and pick the subnets the cluster control plane is placed in.
pub async fn resolve_subnets<C>(
    client: &C,
    config: &OpsConfig,
    reporter: &dyn Reporter,
) -> Result<Vec<String>>
where
    C: ComputeClient,
{
    reporter.start("Fetching subnet IDs from the default VPC...");
    let vpc_id = client
        .default_vpc_id()
        .await?
        .context(error::NoDefaultVpcSnafu {
            region: &config.region,
        })?;
    debug!("Default VPC is '{}'", vpc_id);

    let subnets = client.subnets(&vpc_id).await?;
    let required = config.cluster.subnet_count;
    ensure!(
        subnets.len() >= required,
        error::InsufficientSubnetsSnafu {
            vpc_id,
            found: subnets.len(),
            required,
        }
    );

    let subnet_ids: Vec<String> = select_subnets(subnets, required)
        .into_iter()
        .map(|subnet| subnet.subnet_id)
        .collect();
    reporter.done(&format!("Using subnets: {:?}", subnet_ids));
    Ok(subnet_ids)
}

/// Choose `count` subnets independently of listing order. Subnets are ordered by availability
/// zone, then id; the first subnet of each distinct zone is taken before any zone is used twice.
pub fn select_subnets(mut subnets: Vec<SubnetSummary>, count: usize) -> Vec<SubnetSummary> {
    subnets.sort_by(|a, b| {
        a.availability_zone
            .cmp(&b.availability_zone)
            .then_with(|| a.subnet_id.cmp(&b.subnet_id))
    });

    let mut seen_zones = BTreeSet::new();
    let (spread, rest): (Vec<_>, Vec<_>) = subnets
        .into_iter()
        .partition(|subnet| seen_zones.insert(subnet.availability_zone.clone()));

    spread.into_iter().chain(rest).take(count).collect()
}

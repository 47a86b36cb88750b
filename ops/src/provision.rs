use crate::clients::{ClusterClient, ComputeClient, IdentityClient};
use crate::error::Result;
use crate::network::resolve_subnets;
use crate::report::Reporter;
use crate::roles::ensure_role;
use crate::wait::{self, wait_for};
use clusterops_types::{ClusterRequest, Ensured, OpsConfig, RoleSummary};
use clusterops_utils::impl_display_as_json;
use log::{debug, info};
use serde::Serialize;

/// What `provision` created or found.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Provisioned {
    pub region: String,
    pub cluster_name: String,
    pub subnet_ids: Vec<String>,
    pub cluster_role: Ensured<RoleSummary>,
    pub node_role: Ensured<RoleSummary>,
}

impl_display_as_json!(Provisioned);

/// Create the cluster control plane described by `config` and wait for it to become active.
///
/// The steps run strictly in order: subnets are resolved first so that a missing network fails
/// the run before any IAM or EKS call is made, then both roles are ensured, then the cluster is
/// created. Nothing is rolled back on failure; if anything had been created by then, a warning
/// names it.
pub async fn provision<C>(
    client: &C,
    config: &OpsConfig,
    reporter: &dyn Reporter,
) -> Result<Provisioned>
where
    C: ComputeClient + ClusterClient + IdentityClient,
{
    let subnet_ids = resolve_subnets(client, config, reporter).await?;

    let mut created = Vec::new();
    let result =
        create_roles_and_cluster(client, config, subnet_ids, &mut created, reporter).await;
    if let Err(e) = &result {
        debug!("Provisioning failed after network resolution: {}", e);
        if !created.is_empty() {
            reporter.warn(&format!(
                "Left in place after this failure: {}. Run eks-delete to remove them.",
                created.join(", ")
            ));
        }
    }
    result
}

async fn create_roles_and_cluster<C>(
    client: &C,
    config: &OpsConfig,
    subnet_ids: Vec<String>,
    created: &mut Vec<String>,
    reporter: &dyn Reporter,
) -> Result<Provisioned>
where
    C: ComputeClient + ClusterClient + IdentityClient,
{
    let cluster_role = ensure_role(client, &config.cluster_role, created, reporter).await?;
    let node_role = ensure_role(client, &config.node_role, created, reporter).await?;

    let request = ClusterRequest {
        name: config.cluster.name.clone(),
        version: config.cluster.version.clone(),
        role_arn: cluster_role.get().arn.clone(),
        subnet_ids: subnet_ids.clone(),
        endpoint_public_access: config.cluster.endpoint_public_access,
        endpoint_private_access: config.cluster.endpoint_private_access,
    };
    reporter.start(&format!("Creating EKS Cluster: {}", request.name));
    client.create_cluster(&request).await?;
    created.push(format!("EKS cluster {}", request.name));
    info!("Cluster creation for '{}' was accepted", request.name);

    reporter.start("Waiting for EKS cluster to become ACTIVE...");
    wait_for(
        &format!("cluster '{}' to become ACTIVE", request.name),
        &config.waits.cluster_active,
        || client.cluster_state(&request.name),
        wait::cluster_active,
    )
    .await?;
    reporter.done("EKS Cluster is now ACTIVE.");

    Ok(Provisioned {
        region: config.region.clone(),
        cluster_name: request.name,
        subnet_ids,
        cluster_role,
        node_role,
    })
}

/// The commands an operator runs next. These are printed, never executed: the tools create the
/// control plane only.
pub fn next_steps(config: &OpsConfig, provisioned: &Provisioned) -> String {
    let nodegroup = &config.nodegroup;
    let cluster = &provisioned.cluster_name;
    let region = &provisioned.region;
    format!(
        "Next Steps:\n\
        1. Create a managed node group:\n   \
        eksctl create nodegroup --cluster {cluster} --region {region} --name {name} \\\n     \
        --node-type {node_type} --nodes {nodes} --nodes-min {min} --nodes-max {max} \\\n     \
        --node-role {node_role}\n\
        \n\
        2. Configure kubectl:\n   \
        aws eks --region {region} update-kubeconfig --name {cluster}\n\
        \n\
        3. Deploy your app:\n   \
        kubectl apply -f k8s/",
        cluster = cluster,
        region = region,
        name = nodegroup.name,
        node_type = nodegroup.node_type,
        nodes = nodegroup.nodes,
        min = nodegroup.nodes_min,
        max = nodegroup.nodes_max,
        node_role = provisioned.node_role.get().arn,
    )
}

#[test]
fn next_steps_name_the_node_role() {
    let config = OpsConfig::default();
    let provisioned = Provisioned {
        region: config.region.clone(),
        cluster_name: config.cluster.name.clone(),
        subnet_ids: vec!["subnet-a".to_string(), "subnet-b".to_string()],
        cluster_role: Ensured::Existing(RoleSummary {
            name: "eksClusterRole1".to_string(),
            arn: "arn:aws:iam::123456789012:role/eksClusterRole1".to_string(),
        }),
        node_role: Ensured::Created(RoleSummary {
            name: "eksNodeRole1".to_string(),
            arn: "arn:aws:iam::123456789012:role/eksNodeRole1".to_string(),
        }),
    };
    let steps = next_steps(&config, &provisioned);
    assert!(steps.contains(
        "eksctl create nodegroup --cluster microservices --region ap-south-1 --name ng-1 \\"
    ));
    assert!(steps.contains("--node-type t3.medium --nodes 2 --nodes-min 1 --nodes-max 3 \\"));
    assert!(steps.contains("--node-role arn:aws:iam::123456789012:role/eksNodeRole1"));
    assert!(steps.contains("aws eks --region ap-south-1 update-kubeconfig --name microservices"));
    assert!(steps.ends_with("kubectl apply -f k8s/"));
}

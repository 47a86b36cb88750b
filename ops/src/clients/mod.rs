/*!

The seam between the tools and the AWS management APIs. Each trait covers one service. The
operations in this crate are generic over these traits so that mock implementations can be
injected for testing; in practice you will use [`AwsClients`], which implements all of them.

Expected conditions are part of the return types rather than errors: a role or cluster that does
not exist is `None` or [`Removal::NotFound`], a role that already exists is [`Ensured::Existing`].

!*/

mod aws;
mod error;

pub use aws::AwsClients;
pub use error::{ClientError, ClientResult};

use clusterops_types::{
    ClusterRequest, ClusterState, DatabaseSummary, Ensured, InstanceSummary, NodegroupState,
    Removal, RoleSummary, SubnetSummary,
};

/// EC2: instances and the default network.
#[async_trait::async_trait]
pub trait ComputeClient: Send + Sync {
    /// Every instance whose state is `running`.
    async fn running_instances(&self) -> ClientResult<Vec<InstanceSummary>>;

    /// The id of the account's default VPC in this region, if there is one.
    async fn default_vpc_id(&self) -> ClientResult<Option<String>>;

    /// The subnets of `vpc_id` in the order the provider listed them.
    async fn subnets(&self, vpc_id: &str) -> ClientResult<Vec<SubnetSummary>>;
}

/// EKS: clusters and managed node groups.
#[async_trait::async_trait]
pub trait ClusterClient: Send + Sync {
    async fn cluster_names(&self) -> ClientResult<Vec<String>>;

    /// `None` if the cluster does not exist.
    async fn cluster_state(&self, name: &str) -> ClientResult<Option<ClusterState>>;

    /// Starts cluster creation. Returns as soon as the provider accepts the request.
    async fn create_cluster(&self, request: &ClusterRequest) -> ClientResult<()>;

    async fn delete_cluster(&self, name: &str) -> ClientResult<Removal>;

    /// The node groups of `cluster`. A cluster that does not exist has none.
    async fn nodegroup_names(&self, cluster: &str) -> ClientResult<Vec<String>>;

    /// `None` if the node group does not exist.
    async fn nodegroup_state(
        &self,
        cluster: &str,
        nodegroup: &str,
    ) -> ClientResult<Option<NodegroupState>>;

    async fn delete_nodegroup(&self, cluster: &str, nodegroup: &str) -> ClientResult<Removal>;
}

/// RDS.
#[async_trait::async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Every DB instance regardless of status.
    async fn db_instances(&self) -> ClientResult<Vec<DatabaseSummary>>;
}

/// IAM roles and their attached managed policies.
#[async_trait::async_trait]
pub trait IdentityClient: Send + Sync {
    /// `None` if the role does not exist.
    async fn role(&self, name: &str) -> ClientResult<Option<RoleSummary>>;

    /// Creates the role, or returns the existing one if another caller created it first.
    async fn create_role(
        &self,
        name: &str,
        trust_policy: &str,
    ) -> ClientResult<Ensured<RoleSummary>>;

    /// The ARNs of the managed policies attached to `role`. `None` if the role does not exist.
    async fn attached_policies(&self, role: &str) -> ClientResult<Option<Vec<String>>>;

    async fn attach_policy(&self, role: &str, policy_arn: &str) -> ClientResult<()>;

    async fn detach_policy(&self, role: &str, policy_arn: &str) -> ClientResult<()>;

    async fn delete_role(&self, name: &str) -> ClientResult<Removal>;
}

/*!

`clusterops-types` holds the plain data used by the `clusterops` tools: the configuration that
replaces hard-coded names and regions, the IAM trust policy documents, and the small views of AWS
resources that the tools read and print.

!*/

pub mod config;
pub mod constants;
pub mod policy;
pub mod resource;

pub use config::{
    ClusterConfig, ConfigError, NodegroupConfig, OpsConfig, PollConfig, RoleConfig, WaitConfig,
};
pub use policy::TrustPolicy;
pub use resource::{
    ClusterRequest, ClusterState, ClusterSummary, DatabaseSummary, Ensured, InstanceSummary,
    Inventory, NodegroupState, Removal, RoleSummary, SubnetSummary,
};

use serde::{Deserialize, Serialize};
use serde_plain::{derive_display_from_serialize, derive_fromstr_from_deserialize};
use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceSummary {
    pub instance_id: String,
    pub instance_type: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    pub name: String,
    pub status: ClusterState,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSummary {
    pub identifier: String,
    pub engine: String,
    pub status: String,
}

impl DatabaseSummary {
    pub fn is_available(&self) -> bool {
        self.status == "available"
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetSummary {
    pub subnet_id: String,
    pub availability_zone: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSummary {
    pub name: String,
    pub arn: String,
}

/// The status EKS reports for a cluster.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterState {
    Creating,
    Active,
    Deleting,
    Failed,
    Updating,
    Pending,
    Unknown,
}

derive_display_from_serialize!(ClusterState);
derive_fromstr_from_deserialize!(ClusterState);

impl ClusterState {
    /// Parse a status string reported by EKS. Values this version does not know are `Unknown`.
    pub fn from_provider(status: &str) -> Self {
        status.parse().unwrap_or(Self::Unknown)
    }
}

/// The status EKS reports for a managed node group.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodegroupState {
    Creating,
    Active,
    Updating,
    Deleting,
    CreateFailed,
    DeleteFailed,
    Degraded,
    Unknown,
}

derive_display_from_serialize!(NodegroupState);
derive_fromstr_from_deserialize!(NodegroupState);

impl NodegroupState {
    pub fn from_provider(status: &str) -> Self {
        status.parse().unwrap_or(Self::Unknown)
    }
}

/// What happened when a delete was requested.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Removal {
    /// The provider accepted the request. Deletion may still be in progress.
    Started,
    /// There was nothing to delete.
    NotFound,
}

/// The outcome of an idempotent "make sure this exists" call.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ensured<T> {
    Created(T),
    Existing(T),
}

impl<T> Ensured<T> {
    pub fn was_created(&self) -> bool {
        matches!(self, Ensured::Created(_))
    }

    pub fn get(&self) -> &T {
        match self {
            Ensured::Created(t) | Ensured::Existing(t) => t,
        }
    }
}

/// The parameters of a `CreateCluster` call.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRequest {
    pub name: String,
    pub version: String,
    pub role_arn: String,
    pub subnet_ids: Vec<String>,
    pub endpoint_public_access: bool,
    pub endpoint_private_access: bool,
}

/// Everything `check-instances` found in a region.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub region: String,
    pub instances: Vec<InstanceSummary>,
    pub clusters: Vec<ClusterSummary>,
    pub databases: Vec<DatabaseSummary>,
}

impl Display for InstanceSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EC2 Instance ID: {} | Type: {}",
            self.instance_id, self.instance_type
        )
    }
}

impl Display for ClusterSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "EKS Cluster Name: {} | Status: {}", self.name, self.status)
    }
}

impl Display for DatabaseSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RDS DB Instance Identifier: {} | Engine: {}",
            self.identifier, self.engine
        )
    }
}

impl Display for Inventory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Region: {}", self.region)?;
        writeln!(f, "Running EC2 instances: {}", self.instances.len())?;
        for instance in &self.instances {
            writeln!(f, "  {}", instance)?;
        }
        writeln!(f, "EKS clusters: {}", self.clusters.len())?;
        for cluster in &self.clusters {
            writeln!(f, "  {}", cluster)?;
        }
        writeln!(f, "Available RDS instances: {}", self.databases.len())?;
        for database in &self.databases {
            writeln!(f, "  {}", database)?;
        }
        Ok(())
    }
}

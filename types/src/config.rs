use crate::constants::{
    CLUSTER_POLICY_ARNS, DEFAULT_CLUSTER_NAME, DEFAULT_CLUSTER_ROLE_NAME, DEFAULT_K8S_VERSION,
    DEFAULT_NODEGROUP_NAME, DEFAULT_NODE_ROLE_NAME, DEFAULT_NODE_TYPE, DEFAULT_POLL_INTERVAL_SECS,
    DEFAULT_POLL_TIMEOUT_SECS, DEFAULT_REGION, DEFAULT_SUBNET_COUNT, EC2_SERVICE_PRINCIPAL,
    EKS_SERVICE_PRINCIPAL, NODE_POLICY_ARNS,
};
use crate::policy::TrustPolicy;
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display("Unable to read config file '{}': {}", path.display(), source))]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Unable to parse config file '{}': {}", path.display(), source))]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Everything the tools need to know about the account they operate on. `Default` reproduces the
/// names and region the tools have always used, so running without a config file is the same as
/// running with an empty one.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OpsConfig {
    pub region: String,

    /// A role to assume before making any calls. The default credential chain is used directly
    /// when this is `None`.
    pub assume_role: Option<String>,

    pub cluster: ClusterConfig,
    pub cluster_role: RoleConfig,
    pub node_role: RoleConfig,
    pub nodegroup: NodegroupConfig,
    pub waits: WaitConfig,
}

impl Default for OpsConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            assume_role: None,
            cluster: ClusterConfig::default(),
            cluster_role: RoleConfig::cluster_role(),
            node_role: RoleConfig::node_role(),
            nodegroup: NodegroupConfig::default(),
            waits: WaitConfig::default(),
        }
    }
}

impl OpsConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).context(ReadSnafu { path })?;
        Self::from_toml(&contents).context(ParseSnafu { path })
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// The roles in the order they are created. Deletion walks the same order after the cluster
    /// is gone.
    pub fn roles(&self) -> [&RoleConfig; 2] {
        [&self.cluster_role, &self.node_role]
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClusterConfig {
    pub name: String,
    pub version: String,
    /// How many subnets of the default VPC the control plane is placed in.
    pub subnet_count: usize,
    pub endpoint_public_access: bool,
    pub endpoint_private_access: bool,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_CLUSTER_NAME.to_string(),
            version: DEFAULT_K8S_VERSION.to_string(),
            subnet_count: DEFAULT_SUBNET_COUNT,
            endpoint_public_access: true,
            endpoint_private_access: false,
        }
    }
}

/// An IAM role, the service allowed to assume it, and the managed policies it needs.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleConfig {
    pub name: String,
    pub service_principal: String,
    pub policy_arns: Vec<String>,
}

impl RoleConfig {
    pub fn cluster_role() -> Self {
        Self {
            name: DEFAULT_CLUSTER_ROLE_NAME.to_string(),
            service_principal: EKS_SERVICE_PRINCIPAL.to_string(),
            policy_arns: CLUSTER_POLICY_ARNS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn node_role() -> Self {
        Self {
            name: DEFAULT_NODE_ROLE_NAME.to_string(),
            service_principal: EC2_SERVICE_PRINCIPAL.to_string(),
            policy_arns: NODE_POLICY_ARNS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn trust_policy(&self) -> TrustPolicy {
        TrustPolicy::for_service(&self.service_principal)
    }
}

/// Only used to render the follow-up `eksctl` command; the tools never create node groups.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodegroupConfig {
    pub name: String,
    pub node_type: String,
    pub nodes: u32,
    pub nodes_min: u32,
    pub nodes_max: u32,
}

impl Default for NodegroupConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NODEGROUP_NAME.to_string(),
            node_type: DEFAULT_NODE_TYPE.to_string(),
            nodes: 2,
            nodes_min: 1,
            nodes_max: 3,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaitConfig {
    pub cluster_active: PollConfig,
    pub cluster_deleted: PollConfig,
    pub nodegroup_deleted: PollConfig,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollConfig {
    pub interval_secs: u64,
    pub timeout_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            timeout_secs: DEFAULT_POLL_TIMEOUT_SECS,
        }
    }
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

//! Defaults used when no configuration file or flag says otherwise.

pub const DEFAULT_REGION: &str = "ap-south-1";
pub const DEFAULT_CLUSTER_NAME: &str = "microservices";
pub const DEFAULT_K8S_VERSION: &str = "1.29";
pub const DEFAULT_SUBNET_COUNT: usize = 2;

pub const DEFAULT_CLUSTER_ROLE_NAME: &str = "eksClusterRole1";
pub const DEFAULT_NODE_ROLE_NAME: &str = "eksNodeRole1";
pub const EKS_SERVICE_PRINCIPAL: &str = "eks.amazonaws.com";
pub const EC2_SERVICE_PRINCIPAL: &str = "ec2.amazonaws.com";

pub const CLUSTER_POLICY_ARNS: &[&str] = &["arn:aws:iam::aws:policy/AmazonEKSClusterPolicy"];
pub const NODE_POLICY_ARNS: &[&str] = &[
    "arn:aws:iam::aws:policy/AmazonEKSWorkerNodePolicy",
    "arn:aws:iam::aws:policy/AmazonEKS_CNI_Policy",
    "arn:aws:iam::aws:policy/AmazonEC2ContainerRegistryReadOnly",
];

pub const DEFAULT_NODEGROUP_NAME: &str = "ng-1";
pub const DEFAULT_NODE_TYPE: &str = "t3.medium";

/// The EKS waiters poll every 30 seconds, 40 times.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30 * 40;

pub const POLICY_DOCUMENT_VERSION: &str = "2012-10-17";

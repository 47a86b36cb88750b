/*!

`clusterops` inspects, creates and tears down an EKS cluster and the resources around it. The
library provides the operations used by the three binaries:

- `check-instances` lists running EC2 instances, EKS clusters and available RDS instances.
- `eks-create` ensures the cluster and node IAM roles, creates the cluster in the default VPC and
  waits for it to become active.
- `eks-delete` removes node groups, the cluster and the IAM roles, in that order.

The operations talk to AWS through the traits in [`clients`] so that they can be tested without
an account.

!*/

pub mod args;
pub mod clients;
pub mod confirm;
pub mod decommission;
pub mod error;
pub mod inventory;
pub mod network;
pub mod provision;
pub mod report;
pub mod roles;
pub mod wait;

pub use error::{Error, Result};

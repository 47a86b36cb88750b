/*!

Mock implementations of the client traits and of [`Reporter`] that let the operations be tested
without an AWS account.

[`MockCloud`] keeps a small in-memory model of one region and records every call made against it,
so tests can assert both on the resulting state and on the order of the calls. Clusters and node
groups move through their transitional states one observation at a time, which exercises the wait
loops when the tests run with paused time.

!*/

#![allow(dead_code)]

pub(crate) mod cloud;
pub(crate) mod reporter;

pub(crate) use cloud::{Call, MockCloud};
pub(crate) use reporter::RecordingReporter;

use clusterops_types::{OpsConfig, PollConfig, SubnetSummary};

pub(crate) const ACCOUNT: &str = "123456789012";

pub(crate) fn role_arn(name: &str) -> String {
    format!("arn:aws:iam::{}:role/{}", ACCOUNT, name)
}

pub(crate) fn subnet(id: &str, zone: &str) -> SubnetSummary {
    SubnetSummary {
        subnet_id: id.to_string(),
        availability_zone: Some(zone.to_string()),
    }
}

/// The default configuration with short waits. Tests run with paused time, so the waits only bound
/// the number of polls.
pub(crate) fn config() -> OpsConfig {
    let mut config = OpsConfig::default();
    let poll = PollConfig {
        interval_secs: 5,
        timeout_secs: 60,
    };
    config.waits.cluster_active = poll;
    config.waits.cluster_deleted = poll;
    config.waits.nodegroup_deleted = poll;
    config
}

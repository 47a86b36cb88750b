/*!

A generic poll loop for provider-side state transitions, and the classifiers for the transitions
the tools wait on. The classifiers follow the provider's own waiters: a state that can never lead
to the target fails the wait immediately instead of running out the clock.

!*/

use crate::clients::ClientResult;
use crate::error::{self, Result};
use clusterops_types::{ClusterState, NodegroupState, PollConfig};
use log::{debug, info};
use snafu::OptionExt;
use std::future::Future;

/// What a classifier makes of one observed state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Poll {
    /// The target state was reached.
    Ready,
    /// Not there yet; the string describes the current state for the log.
    Pending(String),
    /// The target state can no longer be reached.
    Failed(String),
}

/// Call `fetch` every `settings.interval()` until `classify` says the state is ready or failed,
/// or until `settings.timeout()` runs out. Errors from `fetch` end the wait immediately.
pub async fn wait_for<S, F, Fut, C>(
    what: &str,
    settings: &PollConfig,
    fetch: F,
    classify: C,
) -> Result<S>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ClientResult<S>>,
    C: Fn(&S) -> Poll,
{
    info!("Waiting for {}", what);
    tokio::time::timeout(settings.timeout(), poll_until(what, settings, fetch, classify))
        .await
        .ok()
        .context(error::WaitTimeoutSnafu {
            what,
            seconds: settings.timeout_secs,
        })?
}

async fn poll_until<S, F, Fut, C>(
    what: &str,
    settings: &PollConfig,
    mut fetch: F,
    classify: C,
) -> Result<S>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ClientResult<S>>,
    C: Fn(&S) -> Poll,
{
    loop {
        let state = fetch().await?;
        match classify(&state) {
            Poll::Ready => {
                debug!("Done waiting for {}", what);
                return Ok(state);
            }
            Poll::Failed(reason) => return error::WaitFailedSnafu { what, reason }.fail(),
            Poll::Pending(current) => {
                info!(
                    "Still waiting for {}, currently '{}'. Sleeping {}s",
                    what, current, settings.interval_secs
                );
                tokio::time::sleep(settings.interval()).await;
            }
        }
    }
}

pub fn cluster_active(state: &Option<ClusterState>) -> Poll {
    match state {
        Some(ClusterState::Active) => Poll::Ready,
        Some(state @ (ClusterState::Failed | ClusterState::Deleting)) => {
            Poll::Failed(format!("the cluster is {}", state))
        }
        Some(state) => Poll::Pending(state.to_string()),
        None => Poll::Failed("the cluster no longer exists".to_string()),
    }
}

pub fn cluster_deleted(state: &Option<ClusterState>) -> Poll {
    match state {
        None => Poll::Ready,
        Some(
            state @ (ClusterState::Active | ClusterState::Creating | ClusterState::Pending),
        ) => Poll::Failed(format!("the cluster is {}", state)),
        Some(state) => Poll::Pending(state.to_string()),
    }
}

pub fn nodegroup_deleted(state: &Option<NodegroupState>) -> Poll {
    match state {
        None => Poll::Ready,
        Some(NodegroupState::DeleteFailed) => {
            Poll::Failed(format!("the node group is {}", NodegroupState::DeleteFailed))
        }
        Some(state) => Poll::Pending(state.to_string()),
    }
}

use crate::clients::ClientError;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("No default VPC found in region '{}'", region))]
    NoDefaultVpc { region: String },

    #[snafu(display(
        "Default VPC '{}' has {} subnet(s) but the cluster needs {}",
        vpc_id,
        found,
        required
    ))]
    InsufficientSubnets {
        vpc_id: String,
        found: usize,
        required: usize,
    },

    #[snafu(display("Unable to serialize trust policy for role '{}': {}", role_name, source))]
    TrustPolicy {
        role_name: String,
        source: serde_json::Error,
    },

    #[snafu(display("Timed-out after {}s waiting for {}", seconds, what))]
    WaitTimeout { what: String, seconds: u64 },

    #[snafu(display("Gave up waiting for {}: {}", what, reason))]
    WaitFailed { what: String, reason: String },

    #[snafu(display("Unable to read confirmation: {}", source))]
    Confirmation { source: std::io::Error },

    #[snafu(context(false))]
    #[snafu(display("{}", source))]
    Client { source: ClientError },
}

pub type Result<T> = std::result::Result<T, Error>;

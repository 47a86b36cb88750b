use crate::constants::{ASSUME_ROLE_SESSION_NAME, DEFAULT_ASSUME_ROLE_SESSION_DURATION};
use aws_config::default_provider::credentials::default_provider;
use aws_config::sts::AssumeRoleProvider;
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_types::region::Region;
use aws_types::SdkConfig;
use log::info;
use std::time::Duration;

/// Set up the config for aws calls in `region`, using the default credential chain or, if
/// `assume_role` is provided, an `sts::assume_role` provider built on top of it.
pub async fn aws_config(region: &str, assume_role: &Option<String>) -> SdkConfig {
    info!(
        "Creating a custom region provider for '{}' to be used in the aws config.",
        region
    );
    let region = Region::new(region.to_string());
    let base_provider = SharedCredentialsProvider::new(default_provider().await);

    let config_loader = match assume_role {
        Some(role_arn) => {
            info!("Assuming role '{}'", role_arn);
            aws_config::from_env().credentials_provider(
                AssumeRoleProvider::builder(role_arn)
                    .region(region.clone())
                    .session_name(ASSUME_ROLE_SESSION_NAME)
                    .session_length(Duration::from_secs(DEFAULT_ASSUME_ROLE_SESSION_DURATION))
                    .build(base_provider),
            )
        }
        None => aws_config::from_env().credentials_provider(base_provider),
    };

    config_loader.region(region).load().await
}

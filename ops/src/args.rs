use clap::Args;
use clusterops_types::{ConfigError, OpsConfig};
use log::LevelFilter;
use std::path::PathBuf;

/// Arguments shared by every `clusterops` binary. All of them are optional; without any, the
/// binaries operate on the default region, cluster and roles.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Set logging verbosity [trace|debug|info|warn|error]. If the environment variable `RUST_LOG`
    /// is present, it overrides the default logging behavior. See https://docs.rs/env_logger/latest
    #[clap(long = "log-level", default_value = "info")]
    pub log_level: LevelFilter,

    /// Path to a TOML file overriding the default region, names, policies and wait times.
    #[clap(long = "config")]
    pub config: Option<PathBuf>,

    /// The AWS region to operate in. Overrides the config file.
    #[clap(long = "region")]
    pub region: Option<String>,

    /// The name of the EKS cluster. Overrides the config file.
    #[clap(long = "cluster-name")]
    pub cluster_name: Option<String>,
}

impl CommonArgs {
    /// Load the config file, if one was given, and apply the command line overrides.
    pub fn ops_config(&self) -> Result<OpsConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => OpsConfig::from_path(path)?,
            None => OpsConfig::default(),
        };
        if let Some(region) = &self.region {
            config.region = region.clone();
        }
        if let Some(cluster_name) = &self.cluster_name {
            config.cluster.name = cluster_name.clone();
        }
        Ok(config)
    }
}

/*!

`clusterops-utils` is a collection of functions shared by the `clusterops` binaries.
`aws` sets up the AWS SDK configuration for a region.

!*/

use constants::DEFAULT_LEVEL_FILTER;
use env_logger::Builder;
use log::LevelFilter;
use serde::Serialize;
use std::env;

pub mod aws;
pub mod constants;

/// Extract the value of `RUST_LOG` if it exists, otherwise log this application at `log_level`
/// (or `DEFAULT_LEVEL_FILTER`).
pub fn init_logger(bin_crate: &str, log_level: Option<LevelFilter>) {
    match env::var(env_logger::DEFAULT_FILTER_ENV).ok() {
        Some(_) => {
            // RUST_LOG exists; env_logger will use it.
            Builder::from_default_env().init();
        }
        None => {
            // RUST_LOG does not exist; use default log level except AWS SDK.
            let log_level = log_level.unwrap_or(DEFAULT_LEVEL_FILTER);
            Builder::new()
                // Set log level to Error for crates other than our own.
                .filter_level(LevelFilter::Error)
                // Set all of our crates to the desired level.
                .filter(Some(bin_crate), log_level)
                .filter(Some("clusterops"), log_level)
                .filter(Some("clusterops_types"), log_level)
                .filter(Some("clusterops_utils"), log_level)
                .init();
        }
    }
}

/// Print a value using `serde_json` `to_string_pretty` for types that implement Serialize.
pub fn json_display<T: Serialize>(object: T) -> String {
    serde_json::to_string_pretty(&object).unwrap_or_else(|e| format!("Serialization failed: {}", e))
}

/// Implement `Display` using `serde_json` `to_string_pretty` for types that implement Serialize.
#[macro_export]
macro_rules! impl_display_as_json {
    ($i:ident) => {
        impl std::fmt::Display for $i {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let s = serde_json::to_string_pretty(self)
                    .unwrap_or_else(|e| format!("Serialization failed: {}", e));
                std::fmt::Display::fmt(&s, f)
            }
        }
    };
}

#[test]
fn json_display_is_pretty() {
    #[derive(Serialize)]
    struct Named {
        name: &'static str,
    }
    assert_eq!(
        json_display(Named { name: "ng-1" }),
        "{\n  \"name\": \"ng-1\"\n}"
    );
}

use log::LevelFilter;

pub const DEFAULT_LEVEL_FILTER: LevelFilter = LevelFilter::Info;
pub const DEFAULT_ASSUME_ROLE_SESSION_DURATION: u64 = 3600;
pub const ASSUME_ROLE_SESSION_NAME: &str = "clusterops";

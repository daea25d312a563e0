pub mod config;
pub mod paths;

pub use config::{Config, ImdbConfig, LoggingConfig, StoreConfig};
pub use paths::{container_base_path, PathManager, BASE_PATH_ENV};

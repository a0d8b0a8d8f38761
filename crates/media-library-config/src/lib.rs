pub mod config;
pub mod paths;

pub use config::{CatalogConfig, Config, LoggingConfig, StorageConfig};
pub use paths::{home_override, PathManager};

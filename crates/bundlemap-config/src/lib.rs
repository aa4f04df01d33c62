//! Configuration for bundlemap, read from `bundlemap.toml`.

pub mod manager;
pub mod types;

pub use manager::{ConfigError, ConfigManager};
pub use types::{
    BundlemapConfig, LogLevel, LoggingSettings, ReportSettings, CONFIG_FILE_NAME, ENV_LOG_LEVEL,
    ENV_OUT_DIR, ENV_PROJECT_ROOT,
};

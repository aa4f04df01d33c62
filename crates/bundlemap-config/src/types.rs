use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up by [`crate::ConfigManager::discover`].
pub const CONFIG_FILE_NAME: &str = "bundlemap.toml";

/// Overrides `report.project_root`.
pub const ENV_PROJECT_ROOT: &str = "BUNDLEMAP_PROJECT_ROOT";
/// Overrides `report.out_dir`.
pub const ENV_OUT_DIR: &str = "BUNDLEMAP_OUT_DIR";
/// Overrides `logging.level`.
pub const ENV_LOG_LEVEL: &str = "BUNDLEMAP_LOG_LEVEL";

/// Log level for bundlemap output, as accepted by `logging.level`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// No logging output
    Silent,
    /// Only errors
    Error,
    /// Errors and warnings (default)
    #[default]
    Warn,
    /// Errors, warnings, and info
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Silent => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "off" => Ok(LogLevel::Silent),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(format!(
                "unknown log level '{}', expected one of: silent, off, error, warn, warning, info, debug, trace",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter())
    }
}

/// Main configuration structure for bundlemap
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BundlemapConfig {
    /// Schema version for migrations
    pub version: String,

    /// Report generation settings
    #[serde(default)]
    pub report: ReportSettings,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for BundlemapConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            report: ReportSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl BundlemapConfig {
    /// Applies `BUNDLEMAP_*` overrides looked up through `lookup`.
    ///
    /// Takes a lookup function rather than reading the process environment
    /// directly so callers (and tests) control the source.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup(ENV_PROJECT_ROOT) {
            self.report.project_root = Some(PathBuf::from(root));
        }
        if let Some(out_dir) = lookup(ENV_OUT_DIR) {
            self.report.out_dir = Some(PathBuf::from(out_dir));
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
    }
}

/// Settings for the `report` command
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportSettings {
    /// Root that asset paths are made relative to when the manifest names none.
    /// Relative values are resolved against the config file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_root: Option<PathBuf>,

    /// Directory to write `<target>.json` payloads into instead of stdout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,

    /// Pretty-print JSON output
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            project_root: None,
            out_dir: None,
            pretty: default_true(),
        }
    }
}

impl ReportSettings {
    /// Joins relative `project_root` / `out_dir` values onto `base`.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        for dir in [&mut self.project_root, &mut self.out_dir].into_iter().flatten() {
            if dir.is_relative() && !dir.as_os_str().is_empty() {
                *dir = base.join(&*dir);
            }
        }
    }
}

/// Settings for log output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// Default level when neither RUST_LOG nor a verbosity flag is given
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    LogLevel::default().to_string()
}

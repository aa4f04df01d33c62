use crate::types::{BundlemapConfig, LogLevel, CONFIG_FILE_NAME};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during config management
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("Config file already exists at {0}")]
    ConfigExists(PathBuf),

    #[error("No config file to save to (defaults are in use)")]
    NoConfigPath,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Manager for bundlemap configuration
///
/// Holds the configuration loaded from a `bundlemap.toml`, or the defaults
/// when no file was found.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: Option<PathBuf>,
    config: BundlemapConfig,
}

impl ConfigManager {
    /// Defaults, not backed by any file
    pub fn defaults() -> Self {
        Self {
            config_path: None,
            config: BundlemapConfig::default(),
        }
    }

    /// Load config from a specific path
    ///
    /// Relative `report` paths are resolved against the file's directory.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        let mut config: BundlemapConfig = toml::from_str(&contents)?;
        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.report.resolve_relative_to(base);
        }
        tracing::debug!(path = %path.display(), "loaded config");

        Ok(Self {
            config_path: Some(path.to_path_buf()),
            config,
        })
    }

    /// Find `bundlemap.toml` in `start` or its ancestors
    ///
    /// Falls back to [`ConfigManager::defaults`] when none exists.
    pub fn discover(start: &Path) -> Result<Self, ConfigError> {
        match start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
        {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!(start = %start.display(), "no config file found, using defaults");
                Ok(Self::defaults())
            }
        }
    }

    /// Initialize config at specific path
    ///
    /// Refuses to overwrite an existing file.
    pub fn init_at(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Err(ConfigError::ConfigExists(path.to_path_buf()));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let manager = Self {
            config_path: Some(path.to_path_buf()),
            config: BundlemapConfig::default(),
        };
        manager.save()?;

        Ok(manager)
    }

    /// Save config to disk atomically
    ///
    /// Uses a temporary file and atomic rename to prevent corruption
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self.config_path.as_deref().ok_or(ConfigError::NoConfigPath)?;
        let toml_str = toml::to_string_pretty(&self.config)?;

        let temp_path = path.with_extension("toml.tmp");
        fs::write(&temp_path, toml_str)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Check values that deserialize fine but cannot be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.log_level()?;

        if self
            .config
            .report
            .out_dir
            .as_ref()
            .is_some_and(|dir| dir.as_os_str().is_empty())
        {
            return Err(ConfigError::Invalid("report.out_dir is empty".to_string()));
        }

        Ok(())
    }

    /// Parsed `logging.level`
    pub fn log_level(&self) -> Result<LogLevel, ConfigError> {
        self.config
            .logging
            .level
            .parse()
            .map_err(ConfigError::Invalid)
    }

    /// Apply `BUNDLEMAP_*` environment variables on top of the loaded values
    pub fn with_env_overrides(mut self) -> Self {
        self.config.apply_overrides(|key| std::env::var(key).ok());
        self
    }

    /// Path of the backing file, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Get reference to config
    pub fn config(&self) -> &BundlemapConfig {
        &self.config
    }

    /// Get mutable reference to config (caller must call save())
    pub fn config_mut(&mut self) -> &mut BundlemapConfig {
        &mut self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_save_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join(CONFIG_FILE_NAME);

        let mut manager = ConfigManager::init_at(&path).unwrap();
        assert!(path.exists());

        manager.config_mut().report.out_dir = Some(temp.path().join("reports"));
        manager.config_mut().logging.level = "info".to_string();
        manager.save().unwrap();

        let loaded = ConfigManager::load_from(&path).unwrap();
        assert_eq!(loaded.config(), manager.config());
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "version = \"1.0\"\n").unwrap();

        let result = ConfigManager::init_at(&path);
        assert!(matches!(result, Err(ConfigError::ConfigExists(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = ConfigManager::load_from(&temp.path().join(CONFIG_FILE_NAME));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }

    #[test]
    fn test_discover_walks_up() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "version = \"1.0\"\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();
        let nested = temp.path().join("packages").join("app");
        fs::create_dir_all(&nested).unwrap();

        let manager = ConfigManager::discover(&nested).unwrap();
        assert_eq!(manager.config_path(), Some(temp.path().join(CONFIG_FILE_NAME).as_path()));
        assert_eq!(manager.config().logging.level, "debug");
    }

    #[test]
    fn test_defaults_cannot_be_saved() {
        let result = ConfigManager::defaults().save();
        assert!(matches!(result, Err(ConfigError::NoConfigPath)));
    }

    #[test]
    fn test_relative_report_paths_follow_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "version = \"1.0\"\n[report]\nproject_root = \"app\"\nout_dir = \"/tmp/reports\"\n",
        )
        .unwrap();

        let manager = ConfigManager::load_from(&path).unwrap();
        assert_eq!(manager.config().report.project_root, Some(temp.path().join("app")));
        assert_eq!(manager.config().report.out_dir, Some(PathBuf::from("/tmp/reports")));
    }

    #[test]
    fn test_log_level() {
        let mut manager = ConfigManager::defaults();
        assert_eq!(manager.log_level().unwrap(), LogLevel::Warn);

        manager.config_mut().logging.level = "Debug".to_string();
        assert_eq!(manager.log_level().unwrap(), LogLevel::Debug);

        manager.config_mut().logging.level = "loud".to_string();
        let err = manager.log_level().unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_validate() {
        let mut manager = ConfigManager::defaults();
        assert!(manager.validate().is_ok());

        manager.config_mut().logging.level = "loud".to_string();
        assert!(matches!(manager.validate(), Err(ConfigError::Invalid(_))));

        manager.config_mut().logging.level = "INFO".to_string();
        manager.config_mut().report.out_dir = Some(PathBuf::new());
        assert!(matches!(manager.validate(), Err(ConfigError::Invalid(_))));
    }
}

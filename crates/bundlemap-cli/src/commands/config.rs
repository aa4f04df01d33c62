use anyhow::{Context, Result};
use bundlemap_config::{ConfigManager, CONFIG_FILE_NAME};
use clap::Subcommand;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Create a bundlemap.toml with default settings
    Init {
        /// Where to create it (defaults to ./bundlemap.toml)
        path: Option<PathBuf>,
    },

    /// Show which config file is in effect
    Path,

    /// Print the effective configuration, including environment overrides
    Show,

    /// Validate the config file
    Validate,
}

/// Loads `path`, or the nearest `bundlemap.toml`, applies environment
/// overrides and rejects values that cannot be used.
pub fn load_config(path: Option<&Path>) -> Result<ConfigManager> {
    let manager = match path {
        Some(path) => ConfigManager::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => {
            let cwd = std::env::current_dir().context("Failed to get current working directory")?;
            ConfigManager::discover(&cwd).context("Failed to load bundlemap.toml")?
        }
    }
    .with_env_overrides();

    manager.validate().context("Invalid configuration")?;
    Ok(manager)
}

/// Runs a config subcommand against the already-resolved `manager`.
pub fn handle_config_command(cmd: ConfigCommand, manager: &ConfigManager) -> Result<()> {
    match cmd {
        ConfigCommand::Init { path } => init_config(path),
        ConfigCommand::Path => show_config_path(manager),
        ConfigCommand::Show => show_config(manager),
        ConfigCommand::Validate => validate_config(manager),
    }
}

fn init_config(path: Option<PathBuf>) -> Result<()> {
    let config_path = path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    if config_path.exists() {
        println!("Config already exists at: {}", config_path.display());
        println!("To reinitialize, please delete the existing config first.");
        return Ok(());
    }

    ConfigManager::init_at(&config_path)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;
    println!("✓ Initialized config at: {}", config_path.display());
    Ok(())
}

fn show_config_path(manager: &ConfigManager) -> Result<()> {
    match manager.config_path() {
        Some(path) => println!("{}", path.display()),
        None => println!("No {} found; using defaults.", CONFIG_FILE_NAME),
    }
    Ok(())
}

fn show_config(manager: &ConfigManager) -> Result<()> {
    let toml_str =
        toml::to_string_pretty(manager.config()).context("Failed to serialize configuration")?;
    print!("{}", toml_str);
    Ok(())
}

fn validate_config(manager: &ConfigManager) -> Result<()> {
    manager.validate().context("Configuration is invalid")?;

    match manager.config_path() {
        Some(path) => println!("✓ Config is valid: {}", path.display()),
        None => println!("✓ No config file; defaults are valid."),
    }
    Ok(())
}

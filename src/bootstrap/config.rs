//! # Configuration Loader
//!
//! Reads the TOML file into the [`AppConfig`] DTO. Pure data loading: no
//! validation and no defaults. Empty and zero values are facts that wiring
//! resolves later.

use anyhow::Context;
use std::path::{Path, PathBuf};
use lh_core::config::AppConfig;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Like [`load_config`], but a missing file yields an all-empty config.
pub fn load_config_if_present(config_path: &Path) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        tracing::info!(path = %config_path.display(), "no config file, using defaults");
        return Ok(AppConfig::default());
    }
    load_config(config_path.to_path_buf())
}

/// `<config dir>/learnhub/config.toml` on this platform.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("learnhub").join(CONFIG_FILE_NAME))
}

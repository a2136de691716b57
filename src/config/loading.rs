//! Configuration loading.
//!
//! Resolves the configuration directory, reads `config.json`, applies
//! defaults and reports validation warnings.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;
use super::validation::validate_config;
use crate::common::constants::*;
use crate::common::utils::path_for_display;

/// Default configuration directory: `$XDG_CONFIG_HOME/hellodays`.
pub fn default_config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_DIR_NAME))
}

/// Resolve the configuration directory from the `--config` flag.
///
/// The directory must already exist.
pub fn resolve_config_dir(custom: Option<&str>) -> Result<PathBuf> {
    let dir = match custom {
        Some(dir) => PathBuf::from(dir),
        None => default_config_dir()?,
    };

    if !dir.is_dir() {
        anyhow::bail!("Directory does not exist: {}", path_for_display(&dir));
    }

    Ok(dir)
}

/// Load `config.json` from `config_dir`.
///
/// A missing, unreadable or malformed file is an error. Validation problems
/// are only logged as warnings.
pub fn load_from_dir(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join(CONFIG_FILE_NAME);

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path_for_display(&path)))?;

    let mut config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path_for_display(&path)))?;

    config.apply_defaults();

    for warning in validate_config(&config) {
        log_warning!("{}", warning);
    }

    Ok(config)
}

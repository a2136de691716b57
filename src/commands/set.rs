//! Persisting configuration changes given on the command line.
//!
//! Only the keys being changed are touched; every other key in
//! `config.json` is written back as it was read.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::args::ConfigUpdates;
use crate::common::constants::CONFIG_FILE_NAME;
use crate::common::utils::{path_for_display, write_json_pretty};
use crate::config::Config;

impl ConfigUpdates {
    /// The JSON keys and values this update would write.
    fn fields(&self) -> Vec<(&'static str, Value)> {
        let mut fields = Vec::new();
        if let Some(value) = self.show_sun_times {
            fields.push(("showSunTimes", Value::from(value)));
        }
        if let Some(value) = self.show_daily_sentence {
            fields.push(("showDailySentence", Value::from(value)));
        }
        if let Some(value) = self.show_date_amount {
            fields.push(("showDateAmount", Value::from(value)));
        }
        fields
    }

    /// Apply the update to an already loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(value) = self.show_sun_times {
            config.show_sun_times = value;
        }
        if let Some(value) = self.show_daily_sentence {
            config.show_daily_sentence = value;
        }
        if let Some(value) = self.show_date_amount {
            config.show_date_amount = value;
        }
    }
}

/// Write `updates` into `config.json` inside `config_dir`.
///
/// Returns `false` without touching the file when nothing changes.
pub fn apply_config_updates(config_dir: &Path, updates: &ConfigUpdates) -> Result<bool> {
    let fields = updates.fields();
    if fields.is_empty() {
        return Ok(false);
    }

    let config_path = config_dir.join(CONFIG_FILE_NAME);
    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config from {}", path_for_display(&config_path)))?;
    let mut document: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path_for_display(&config_path)))?;
    let Some(object) = document.as_object_mut() else {
        bail!("Config {} is not a JSON object", path_for_display(&config_path));
    };

    let mut changed = false;
    for (key, value) in fields {
        if object.get(key) != Some(&value) {
            log_debug!("Setting {} = {}", key, value);
            object.insert(key.to_string(), value);
            changed = true;
        }
    }

    if changed {
        write_json_pretty(&config_path, &document).with_context(|| {
            format!("Failed to write config to {}", path_for_display(&config_path))
        })?;
        log_debug!("Updated configuration in {}", path_for_display(&config_path));
    } else {
        log_debug!("Configuration unchanged");
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_config(dir: &Path, json: &str) {
        fs::write(dir.join(CONFIG_FILE_NAME), json).unwrap();
    }

    fn read_config(dir: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(dir.join(CONFIG_FILE_NAME)).unwrap()).unwrap()
    }

    #[test]
    fn test_updates_preserve_unknown_keys() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"{"showSunTimes": true, "location": {"latitude": 1.5}, "myNote": "keep"}"#,
        );
        let updates = ConfigUpdates {
            show_sun_times: Some(false),
            show_daily_sentence: None,
            show_date_amount: Some(4),
        };

        assert!(apply_config_updates(dir.path(), &updates).unwrap());

        let written = read_config(dir.path());
        assert_eq!(written["showSunTimes"], false);
        assert_eq!(written["showDateAmount"], 4);
        assert_eq!(written["myNote"], "keep");
        assert_eq!(written["location"]["latitude"], 1.5);
        assert!(written.get("showDailySentence").is_none());
    }

    #[test]
    fn test_unchanged_values_do_not_rewrite() {
        let dir = tempdir().unwrap();
        let original = r#"{"showDailySentence":true}"#;
        write_config(dir.path(), original);
        let updates = ConfigUpdates {
            show_daily_sentence: Some(true),
            ..Default::default()
        };

        assert!(!apply_config_updates(dir.path(), &updates).unwrap());
        assert_eq!(
            fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap(),
            original
        );
    }

    #[test]
    fn test_empty_updates_need_no_file() {
        let dir = tempdir().unwrap();
        assert!(!apply_config_updates(dir.path(), &ConfigUpdates::default()).unwrap());
    }

    #[test]
    fn test_missing_or_malformed_config_fails() {
        let dir = tempdir().unwrap();
        let updates = ConfigUpdates {
            show_sun_times: Some(true),
            ..Default::default()
        };
        assert!(apply_config_updates(dir.path(), &updates).is_err());

        write_config(dir.path(), "[1, 2]");
        assert!(apply_config_updates(dir.path(), &updates).is_err());
    }

    #[test]
    fn test_apply_to_config() {
        let mut config = Config::default();
        ConfigUpdates {
            show_sun_times: Some(true),
            show_daily_sentence: Some(false),
            show_date_amount: Some(2),
        }
        .apply_to(&mut config);
        assert!(config.show_sun_times);
        assert!(!config.show_daily_sentence);
        assert_eq!(config.show_date_amount, 2);
    }
}

//! Configuration for hellodays.
//!
//! The configuration directory holds `config.json` next to the event file,
//! the sentence pool and the cache directory:
//!
//! ```json
//! {
//!   "datesFile": "dates.json",
//!   "sentencesFile": "sentences.json",
//!   "showDateAmount": 7,
//!   "dateFormat": "%Y/%m/%d",
//!   "location": { "latitude": 31.23, "longitude": 121.47, "timezone": 8 },
//!   "showSunTimes": true,
//!   "showDailySentence": true,
//!   "cacheDir": "cache",
//!   "sentenceUpdateMode": "time",
//!   "sentenceUpdateInterval": 24
//! }
//! ```
//!
//! The directory comes from `--config <dir>` or defaults to
//! `$XDG_CONFIG_HOME/hellodays`. Zero or empty values fall back to the
//! defaults in [`crate::common::constants`]. `dateFormat` accepts either a
//! strftime string or a reference-date layout such as `2006/01/02`.
//!
//! `sentenceUpdateInterval` is dual-purpose: hours in `"time"` mode, a usage
//! count in `"count"` mode. [`Config::refresh_policy`] maps the pair onto the
//! tagged [`RefreshPolicy`].

pub mod loading;
pub mod validation;


use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::common::constants::*;
use crate::common::utils::{path_for_display, to_strftime};
use crate::sentence::RefreshPolicy;

pub use loading::{default_config_dir, load_from_dir, resolve_config_dir};
pub use validation::validate_config;

/// Observer location for the sunrise/sunset countdown.
///
/// `timezone` is a fixed offset in whole hours east of UTC.
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: i32,
}

impl Location {
    /// A location at exactly 0/0 is treated as "not configured".
    pub fn is_configured(&self) -> bool {
        self.latitude != 0.0 && self.longitude != 0.0
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Event file, relative to the configuration directory.
    pub dates_file: String,
    /// Sentence pool, relative to the configuration directory.
    pub sentences_file: String,
    /// Cap on displayed events that are not marked always-show. Negative
    /// values list only always-show events.
    pub show_date_amount: i64,
    pub date_format: String,
    pub location: Location,
    pub show_sun_times: bool,
    pub show_daily_sentence: bool,
    /// Cache directory, relative to the configuration directory.
    pub cache_dir: String,
    pub sentence_update_mode: String,
    pub sentence_update_interval: i64,
}

impl Config {
    /// Fill zero/empty fields with their defaults.
    pub fn apply_defaults(&mut self) {
        if self.dates_file.is_empty() {
            self.dates_file = DEFAULT_DATES_FILE.to_string();
        }
        if self.sentences_file.is_empty() {
            self.sentences_file = DEFAULT_SENTENCES_FILE.to_string();
        }
        if self.show_date_amount == 0 {
            self.show_date_amount = DEFAULT_SHOW_DATE_AMOUNT;
        }
        if self.date_format.is_empty() {
            self.date_format = DEFAULT_DATE_FORMAT.to_string();
        }
        if self.cache_dir.is_empty() {
            self.cache_dir = DEFAULT_CACHE_DIR.to_string();
        }
    }

    /// The sentence refresh policy selected by mode and interval.
    pub fn refresh_policy(&self) -> RefreshPolicy {
        RefreshPolicy::from_mode(&self.sentence_update_mode, self.sentence_update_interval)
    }

    /// How many regular events may be shown.
    pub fn event_limit(&self) -> usize {
        usize::try_from(self.show_date_amount).unwrap_or(0)
    }

    /// `dateFormat` as a chrono format string.
    pub fn strftime_format(&self) -> String {
        to_strftime(&self.date_format)
    }

    pub fn dates_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.dates_file)
    }

    pub fn sentences_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.sentences_file)
    }

    pub fn sentence_cache_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.cache_dir).join(SENTENCE_CACHE_FILE)
    }

    /// Print the effective configuration (debug mode only).
    pub fn log_config(&self, config_dir: &Path) {
        if !crate::logger::Log::is_debug() {
            return;
        }
        log_block_start!("Loaded configuration from {}", path_for_display(config_dir));
        log_indented!("Events file: {}", self.dates_file);
        log_indented!("Sentences file: {}", self.sentences_file);
        log_indented!("Show date amount: {}", self.show_date_amount);
        log_indented!("Date format: {}", self.strftime_format());
        log_indented!("Show sun times: {}", self.show_sun_times);
        if self.show_sun_times {
            log_indented!(
                "Location: {:.4}°, {:.4}° (UTC{:+})",
                self.location.latitude,
                self.location.longitude,
                self.location.timezone
            );
        }
        log_indented!("Show daily sentence: {}", self.show_daily_sentence);
        if self.show_daily_sentence {
            log_indented!("Cache directory: {}", self.cache_dir);
            log_indented!("Sentence refresh: {}", self.refresh_policy());
        }
    }
}

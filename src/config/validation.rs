//! Configuration validation.
//!
//! Nothing in the configuration is fatal once it parses: a bad location only
//! disables the sun countdown and an unknown refresh mode only disables
//! automatic sentence rotation. Validation therefore reports warnings.

use chrono::NaiveDate;

use super::Config;
use crate::common::constants::*;
use crate::display::try_format_date;
use crate::sentence::RefreshPolicy;

/// Check the configuration and return one message per problem found.
pub fn validate_config(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.show_sun_times && config.location.is_configured() {
        let loc = &config.location;
        if !(MINIMUM_LATITUDE..=MAXIMUM_LATITUDE).contains(&loc.latitude) {
            warnings.push(format!(
                "location.latitude must be between {MINIMUM_LATITUDE} and {MAXIMUM_LATITUDE} degrees (got {})",
                loc.latitude
            ));
        }
        if !(MINIMUM_LONGITUDE..=MAXIMUM_LONGITUDE).contains(&loc.longitude) {
            warnings.push(format!(
                "location.longitude must be between {MINIMUM_LONGITUDE} and {MAXIMUM_LONGITUDE} degrees (got {})",
                loc.longitude
            ));
        }
        if !(MINIMUM_TIMEZONE_OFFSET..=MAXIMUM_TIMEZONE_OFFSET).contains(&loc.timezone) {
            warnings.push(format!(
                "location.timezone must be between {MINIMUM_TIMEZONE_OFFSET} and {MAXIMUM_TIMEZONE_OFFSET} hours (got {})",
                loc.timezone
            ));
        }
    }

    if config.show_daily_sentence {
        if matches!(config.refresh_policy(), RefreshPolicy::Manual) {
            warnings.push(format!(
                "sentenceUpdateMode '{}' is not \"time\" or \"count\"; the sentence only changes with --refresh-sentence",
                config.sentence_update_mode
            ));
        }
        if config.sentence_update_interval < 0 {
            warnings.push(format!(
                "sentenceUpdateInterval should not be negative (got {})",
                config.sentence_update_interval
            ));
        }
    }

    if config.show_date_amount < 0 {
        warnings.push(format!(
            "showDateAmount is negative ({}); only always-show events are listed",
            config.show_date_amount
        ));
    }

    if !is_valid_date_format(&config.strftime_format()) {
        warnings.push(format!("dateFormat '{}' is not a valid date format", config.date_format));
    }

    warnings
}

/// A format is valid if chrono can parse it and it only uses date fields.
fn is_valid_date_format(format: &str) -> bool {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|probe| try_format_date(probe, format))
        .is_some()
}

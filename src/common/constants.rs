//! Application-wide constants and default values.

// # Files

/// Main configuration file inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Name of the application directory under the XDG config home.
pub const APP_DIR_NAME: &str = "hellodays";

pub const DEFAULT_DATES_FILE: &str = "dates.json";
pub const DEFAULT_SENTENCES_FILE: &str = "sentences.json";
pub const DEFAULT_CACHE_DIR: &str = "cache";

/// File name of the rotating sentence cache inside the cache directory.
pub const SENTENCE_CACHE_FILE: &str = "sentence.cache";

// # Display defaults

pub const DEFAULT_SHOW_DATE_AMOUNT: i64 = 7;
pub const DEFAULT_DATE_FORMAT: &str = "%Y/%m/%d";

/// Printed as the first line of every display run.
pub const GREETING: &str = "Hello World!";

// # Validation limits

/// Non-recurring events must be anchored at or after this year.
pub const MINIMUM_EVENT_YEAR: i32 = 1900;
pub const MINIMUM_LATITUDE: f64 = -90.0;
pub const MAXIMUM_LATITUDE: f64 = 90.0;
pub const MINIMUM_LONGITUDE: f64 = -180.0;
pub const MAXIMUM_LONGITUDE: f64 = 180.0;
pub const MINIMUM_TIMEZONE_OFFSET: i32 = -12;
pub const MAXIMUM_TIMEZONE_OFFSET: i32 = 14;

// # Exit codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

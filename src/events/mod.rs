//! Birthdays and festivals: definitions, date resolution and display ranking.
//!
//! - [`recurrence`] turns an [`Event`] into the concrete date to show,
//!   applying solar/lunar mode and yearly rollover.
//! - [`ranking`] orders resolved events by proximity and applies the
//!   always-show rule and the display cap.
//! - [`store`] reads and appends the event file.

pub mod ranking;
pub mod recurrence;
pub mod store;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::constants::MINIMUM_EVENT_YEAR;
use crate::lunar::LunarError;

pub use ranking::{collect_occurrences, filter_occurrences, rank_and_filter};
pub use recurrence::{days_until, resolve};
pub use store::{append_event, load_events};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Birthday,
    /// Anything that is not a birthday.
    #[default]
    #[serde(other)]
    Festival,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Birthday => "birthday",
            EventKind::Festival => "festival",
        }
    }
}

/// A birthday or festival as stored in the event file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: EventKind,
    /// Anchor year; required when the event does not repeat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub repeat_yearly: bool,
    #[serde(default)]
    pub always_show: bool,
    #[serde(default)]
    pub is_lunar: bool,
}

impl Event {
    /// Check the stored fields form a usable event.
    ///
    /// Day ranges are not checked against actual month lengths.
    pub fn validate(&self) -> Result<(), EventError> {
        if !(1..=12).contains(&self.month) {
            return Err(EventError::InvalidMonth(self.month));
        }
        if !(1..=31).contains(&self.day) {
            return Err(EventError::InvalidDay(self.day));
        }
        if !self.repeat_yearly {
            match self.year {
                Some(year) if year >= MINIMUM_EVENT_YEAR => {}
                other => return Err(EventError::YearRequired(other)),
            }
        }
        Ok(())
    }
}

/// An event resolved against the current time.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOccurrence {
    pub event: Event,
    /// Whole days until `target_date`; negative once it has passed.
    pub days_until: i64,
    pub target_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventError {
    InvalidMonth(u32),
    InvalidDay(u32),
    /// Non-recurring events need a year of at least 1900.
    YearRequired(Option<i32>),
    /// The date cannot be represented.
    OutOfRange { year: i32, month: u32, day: u32 },
    Lunar(LunarError),
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::InvalidMonth(m) => write!(f, "month {m} is not between 1 and 12"),
            EventError::InvalidDay(d) => write!(f, "day {d} is not between 1 and 31"),
            EventError::YearRequired(Some(y)) => write!(
                f,
                "year {y} is before {MINIMUM_EVENT_YEAR} (required for one-off events)"
            ),
            EventError::YearRequired(None) => write!(f, "one-off events need a year"),
            EventError::OutOfRange { year, month, day } => {
                write!(f, "{year}-{month:02}-{day:02} is not a representable date")
            }
            EventError::Lunar(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EventError {}

impl From<LunarError> for EventError {
    fn from(e: LunarError) -> Self {
        EventError::Lunar(e)
    }
}

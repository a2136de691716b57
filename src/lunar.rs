//! Chinese lunar calendar to Gregorian conversion.
//!
//! The conversion itself is delegated to `icu_calendar`; this module only
//! adapts it to plain `(year, month, day)` numbers and to [`NaiveDate`].

use chrono::{Days, NaiveDate};
use icu_calendar::{Date, Iso};
use icu_calendar::cal::ChineseTraditional;
use icu_calendar::types::Month;
use std::fmt;

/// Failure to convert a lunar date.
#[derive(Debug, Clone, PartialEq)]
pub struct LunarError {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub reason: String,
}

impl fmt::Display for LunarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot convert lunar date {}-{:02}-{:02}: {}",
            self.year, self.month, self.day, self.reason
        )
    }
}

impl std::error::Error for LunarError {}

/// Converts a lunar `(year, month, day)` to the matching solar date.
#[cfg_attr(test, mockall::automock)]
pub trait LunarCalendar {
    fn to_solar(&self, year: i32, month: u32, day: u32) -> Result<NaiveDate, LunarError>;
}

/// The traditional Chinese calendar (regular, non-leap months).
///
/// `year` is the Gregorian year in which the lunar year begins. A day past
/// the end of a short (29-day) month rolls over into the following days.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChineseLunarCalendar;

impl LunarCalendar for ChineseLunarCalendar {
    fn to_solar(&self, year: i32, month: u32, day: u32) -> Result<NaiveDate, LunarError> {
        let error = |reason: String| LunarError {
            year,
            month,
            day,
            reason,
        };

        let month_number = u8::try_from(month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| error("month must be between 1 and 12".to_string()))?;
        if day == 0 {
            return Err(error("day must be at least 1".to_string()));
        }

        let first = Date::try_new_chinese_traditional(year, Month::new(month_number), 1)
            .map_err(|e| error(e.to_string()))?;
        let first = iso_to_naive(first).ok_or_else(|| error("outside supported range".to_string()))?;

        first
            .checked_add_days(Days::new(u64::from(day - 1)))
            .ok_or_else(|| error("outside supported range".to_string()))
    }
}

fn iso_to_naive(date: Date<ChineseTraditional>) -> Option<NaiveDate> {
    let iso = date.to_calendar(Iso);
    NaiveDate::from_ymd_opt(
        iso.year().extended_year(),
        u32::from(iso.month().ordinal),
        u32::from(iso.day_of_month().0),
    )
}

//! Resolution of an [`Event`] to the calendar date it should be shown for.
//!
//! Lunar events are converted for the current year and, when recurring and
//! already passed, for the following year. One-off lunar events are also
//! anchored to the current year; their stored `year` is not used.
//!
//! Solar dates are normalised: a day past the end of the month carries into
//! the next month, so a Feb 29 birthday falls on Mar 1 in common years.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

use super::{Event, EventError};
use crate::lunar::LunarCalendar;

/// The date `event` is shown for, relative to `now`.
///
/// Recurring solar events roll over to next year once their local
/// midnight is before `now`, so an event dated today only stays today at
/// exactly midnight. Recurring lunar events compare dates only and stay
/// today for the whole day.
pub fn resolve(
    event: &Event,
    now: NaiveDateTime,
    lunar: &impl LunarCalendar,
) -> Result<NaiveDate, EventError> {
    let today = now.date();
    let year = today.year();

    if event.is_lunar {
        let target = lunar.to_solar(year, event.month, event.day)?;
        if event.repeat_yearly && target < today {
            return Ok(lunar.to_solar(year + 1, event.month, event.day)?);
        }
        return Ok(target);
    }

    if !event.repeat_yearly {
        let year = event.year.ok_or(EventError::YearRequired(None))?;
        return solar_date(year, event.month, event.day);
    }

    let target = solar_date(year, event.month, event.day)?;
    if target.and_time(NaiveTime::MIN) < now {
        return solar_date(year + 1, event.month, event.day);
    }
    Ok(target)
}

/// Build `year-month-day`, carrying days past the month end forward.
pub fn solar_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, EventError> {
    let out_of_range = || EventError::OutOfRange { year, month, day };

    if day == 0 {
        return Err(EventError::InvalidDay(day));
    }
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_days(Days::new(u64::from(day - 1))))
        .ok_or_else(out_of_range)
}

/// Whole days from `now` until local midnight of `target`.
///
/// Elapsed hours are truncated toward zero before dividing by 24, so an
/// event earlier today reports 0 rather than -1.
pub fn days_until(target: NaiveDate, now: NaiveDateTime) -> i64 {
    (target.and_time(NaiveTime::MIN) - now).num_hours() / 24
}

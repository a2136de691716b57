//! Sunrise and sunset for the configured location.
//!
//! - [`SunCalculator`] is the seam to the astronomical calculation;
//!   [`SolarCalculator`] implements it with the `sunrise` crate.
//! - [`picker`] chooses the next upcoming sunrise/sunset and the countdown
//!   shown to the user.
//!
//! All instants are expressed in the location's fixed UTC offset.

pub mod picker;


use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use std::fmt;

use crate::common::constants::*;
use crate::config::Location;

pub use picker::{SunCountdown, SunEvent, choose_countdown, next_countdown, pick_next};

/// Failure to compute sun times for a location.
#[derive(Debug, Clone, PartialEq)]
pub enum AstroError {
    InvalidCoordinates { latitude: f64, longitude: f64 },
    /// Offset in hours that does not form a valid fixed zone.
    InvalidOffset(i32),
    /// The calendar date cannot be used for the calculation.
    InvalidDate(String),
    /// The sun does not rise or set on this date (polar day or night).
    NoSunEvent(NaiveDate),
}

impl fmt::Display for AstroError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstroError::InvalidCoordinates {
                latitude,
                longitude,
            } => write!(f, "invalid coordinates {latitude:.4}°, {longitude:.4}°"),
            AstroError::InvalidOffset(hours) => write!(f, "invalid UTC offset {hours:+} hours"),
            AstroError::InvalidDate(date) => write!(f, "cannot compute sun times for {date}"),
            AstroError::NoSunEvent(date) => write!(f, "no sunrise or sunset on {date}"),
        }
    }
}

impl std::error::Error for AstroError {}

/// Sunrise and sunset of one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunTimes {
    pub sunrise: DateTime<FixedOffset>,
    pub sunset: DateTime<FixedOffset>,
}

impl SunTimes {
    pub fn get(&self, event: SunEvent) -> DateTime<FixedOffset> {
        match event {
            SunEvent::Sunrise => self.sunrise,
            SunEvent::Sunset => self.sunset,
        }
    }
}

/// Computes sun times for the local day containing `at`.
#[cfg_attr(test, mockall::automock)]
pub trait SunCalculator {
    fn sun_times(&self, location: &Location, at: DateTime<Utc>) -> Result<SunTimes, AstroError>;
}

/// Build the fixed zone `hours` east of UTC.
pub fn fixed_offset(hours: i32) -> Result<FixedOffset, AstroError> {
    if !(MINIMUM_TIMEZONE_OFFSET..=MAXIMUM_TIMEZONE_OFFSET).contains(&hours) {
        return Err(AstroError::InvalidOffset(hours));
    }
    FixedOffset::east_opt(hours * 3600).ok_or(AstroError::InvalidOffset(hours))
}

/// Sea-level sunrise/sunset with standard refraction.
#[derive(Debug, Default, Clone, Copy)]
pub struct SolarCalculator;

impl SolarCalculator {
    fn times_for_date(
        &self,
        location: &Location,
        offset: FixedOffset,
        date: NaiveDate,
    ) -> Result<SunTimes, AstroError> {
        use sunrise::{Coordinates, SolarDay, SolarEvent};

        let coord = Coordinates::new(location.latitude, location.longitude).ok_or(
            AstroError::InvalidCoordinates {
                latitude: location.latitude,
                longitude: location.longitude,
            },
        )?;
        let solar_day = SolarDay::new(coord, date);
        let sunrise = solar_day.event_time(SolarEvent::Sunrise);
        let sunset = solar_day.event_time(SolarEvent::Sunset);

        // Polar day or night yields a NaN hour angle, which the crate turns
        // into the Unix epoch instead of an error
        let near_date = |t: DateTime<Utc>| (t.date_naive() - date).num_days().abs() <= 1;
        if !near_date(sunrise) || !near_date(sunset) {
            return Err(AstroError::NoSunEvent(date));
        }

        Ok(SunTimes {
            sunrise: sunrise.with_timezone(&offset),
            sunset: sunset.with_timezone(&offset),
        })
    }
}

impl SunCalculator for SolarCalculator {
    fn sun_times(&self, location: &Location, at: DateTime<Utc>) -> Result<SunTimes, AstroError> {
        let offset = fixed_offset(location.timezone)?;
        let date = at.with_timezone(&offset).date_naive();
        log_debug!(
            "Computing sun times for {} at {:.4}°, {:.4}° (UTC{:+})",
            date,
            location.latitude,
            location.longitude,
            location.timezone
        );
        self.times_for_date(location, offset, date)
    }
}

//! Selection of the next sunrise or sunset to count down to.

use chrono::{DateTime, Duration, FixedOffset, Utc};

use super::{AstroError, SunCalculator, SunTimes};
use crate::config::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunEvent {
    Sunrise,
    Sunset,
}

/// The countdown shown on the sun line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunCountdown {
    pub event: SunEvent,
    pub instant: DateTime<FixedOffset>,
    /// The instant belongs to tomorrow's calculation.
    pub is_next_day: bool,
    pub remaining: Duration,
}

impl SunCountdown {
    /// Whole hours and leftover minutes until the event.
    pub fn hours_minutes(&self) -> (i64, i64) {
        (self.remaining.num_hours(), self.remaining.num_minutes() % 60)
    }
}

/// Return `instant_today` if it is still ahead of `now`, otherwise the same
/// event computed for 24 hours later.
pub fn pick_next(
    instant_today: DateTime<FixedOffset>,
    now: DateTime<Utc>,
    location: &Location,
    event: SunEvent,
    calc: &impl SunCalculator,
) -> Result<(DateTime<FixedOffset>, bool), AstroError> {
    if instant_today > now {
        return Ok((instant_today, false));
    }

    let tomorrow = now
        .checked_add_signed(Duration::hours(24))
        .ok_or_else(|| AstroError::InvalidDate(now.to_rfc3339()))?;
    let times = calc.sun_times(location, tomorrow)?;
    Ok((times.get(event), true))
}

/// Pick whichever upcoming event is nearer to `now`. Ties go to sunset.
pub fn choose_countdown(
    sunrise: (DateTime<FixedOffset>, bool),
    sunset: (DateTime<FixedOffset>, bool),
    now: DateTime<Utc>,
) -> SunCountdown {
    let sunrise_remaining = sunrise.0.with_timezone(&Utc) - now;
    let sunset_remaining = sunset.0.with_timezone(&Utc) - now;

    if sunrise_remaining < sunset_remaining {
        SunCountdown {
            event: SunEvent::Sunrise,
            instant: sunrise.0,
            is_next_day: sunrise.1,
            remaining: sunrise_remaining,
        }
    } else {
        SunCountdown {
            event: SunEvent::Sunset,
            instant: sunset.0,
            is_next_day: sunset.1,
            remaining: sunset_remaining,
        }
    }
}

/// Compute today's times, advance each past `now` and pick the nearer one.
pub fn next_countdown(
    location: &Location,
    now: DateTime<Utc>,
    calc: &impl SunCalculator,
) -> Result<SunCountdown, AstroError> {
    let today: SunTimes = calc.sun_times(location, now)?;
    let sunrise = pick_next(today.sunrise, now, location, SunEvent::Sunrise, calc)?;
    let sunset = pick_next(today.sunset, now, location, SunEvent::Sunset, calc)?;
    Ok(choose_countdown(sunrise, sunset, now))
}

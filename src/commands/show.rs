//! The default command: print the greeting.
//!
//! Configuration and the event file are mandatory, so failures there abort
//! the run. The daily sentence and the sun countdown are optional and are
//! simply left out when they cannot be produced.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use std::path::Path;

use crate::args::ConfigUpdates;
use crate::config::{self, Config};
use crate::display::{self, Greeting};
use crate::events::{self, Event};
use crate::geo::{self, SolarCalculator, SunCalculator};
use crate::lunar::{ChineseLunarCalendar, LunarCalendar};
use crate::sentence;

use super::set::apply_config_updates;

/// The current moment as both local wall-clock time and UTC instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    pub local: NaiveDateTime,
    pub utc: DateTime<Utc>,
}

impl Clock {
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            local: now.naive_local(),
            utc: now.with_timezone(&Utc),
        }
    }

    /// A clock pinned to a local wall-clock time.
    pub fn at_local(local: NaiveDateTime) -> Result<Self> {
        let utc = Local
            .from_local_datetime(&local)
            .earliest()
            .with_context(|| format!("{local} does not exist in the local time zone"))?
            .with_timezone(&Utc);
        Ok(Self { local, utc })
    }
}

/// Options for a display run, straight from the command line.
#[derive(Debug, Default, Clone)]
pub struct ShowOptions {
    pub config_dir: Option<String>,
    pub refresh_sentence: bool,
    pub at: Option<NaiveDateTime>,
    pub updates: ConfigUpdates,
}

/// Handle the default command.
pub fn handle_show_command(options: &ShowOptions) -> Result<()> {
    let config_dir = config::resolve_config_dir(options.config_dir.as_deref())?;
    let mut config = config::load_from_dir(&config_dir)?;

    if !options.updates.is_empty() {
        apply_config_updates(&config_dir, &options.updates)?;
        options.updates.apply_to(&mut config);
    }
    config.log_config(&config_dir);

    let events = events::load_events(&config.dates_path(&config_dir))?;
    let clock = match options.at {
        Some(local) => Clock::at_local(local)?,
        None => Clock::now(),
    };
    log_debug!("Rendering for {}", clock.local);

    let greeting = build_greeting(
        &config_dir,
        &config,
        &events,
        clock,
        options.refresh_sentence,
        &SolarCalculator,
        &ChineseLunarCalendar,
    );

    let mut stdout = std::io::stdout().lock();
    display::render(&mut stdout, &greeting).context("Failed to write output")
}

/// Compute everything the greeting shows.
pub fn build_greeting(
    config_dir: &Path,
    config: &Config,
    events: &[Event],
    clock: Clock,
    refresh_sentence: bool,
    sun: &impl SunCalculator,
    lunar: &impl LunarCalendar,
) -> Greeting {
    let sentence = if config.show_daily_sentence {
        match sentence::daily_sentence_for(config_dir, config, refresh_sentence, clock.utc) {
            Ok(sentence) => Some(sentence),
            Err(e) => {
                log_debug!("Daily sentence skipped: {}", e);
                None
            }
        }
    } else {
        None
    };

    let countdown = if config.show_sun_times && config.location.is_configured() {
        match geo::next_countdown(&config.location, clock.utc, sun) {
            Ok(countdown) => Some(countdown),
            Err(e) => {
                log_debug!("Sun times skipped: {}", e);
                None
            }
        }
    } else {
        None
    };

    let events = events::rank_and_filter(events, clock.local, config.event_limit(), lunar);

    Greeting {
        sentence,
        countdown,
        events,
        date_format: config.strftime_format(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Location;
    use crate::events::EventKind;
    use crate::geo::{AstroError, MockSunCalculator, SunEvent, SunTimes};
    use crate::lunar::MockLunarCalendar;
    use chrono::{FixedOffset, NaiveDate};
    use std::fs;
    use tempfile::tempdir;

    fn clock() -> Clock {
        let local = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Clock {
            local,
            utc: Utc.from_utc_datetime(&(local - chrono::Duration::hours(8))),
        }
    }

    fn config() -> Config {
        let mut config = Config {
            show_date_amount: 2,
            show_sun_times: true,
            show_daily_sentence: true,
            location: Location {
                latitude: 31.2,
                longitude: 121.5,
                timezone: 8,
            },
            sentence_update_mode: "time".to_string(),
            sentence_update_interval: 24,
            ..Default::default()
        };
        config.apply_defaults();
        config
    }

    fn event(name: &str, month: u32, day: u32) -> Event {
        Event {
            name: name.to_string(),
            kind: EventKind::Festival,
            year: None,
            month,
            day,
            repeat_yearly: true,
            always_show: false,
            is_lunar: false,
        }
    }

    fn fixed_sun() -> MockSunCalculator {
        let mut sun = MockSunCalculator::new();
        sun.expect_sun_times().returning(|_, at| {
            let cst = FixedOffset::east_opt(8 * 3600).unwrap();
            let day = at.with_timezone(&cst).date_naive();
            let at_hour = |h| cst.from_local_datetime(&day.and_hms_opt(h, 0, 0).unwrap()).unwrap();
            Ok(SunTimes {
                sunrise: at_hour(5),
                sunset: at_hour(19),
            })
        });
        sun
    }

    fn no_lunar() -> MockLunarCalendar {
        let mut lunar = MockLunarCalendar::new();
        lunar.expect_to_solar().never();
        lunar
    }

    #[test]
    fn test_build_greeting_all_sections() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("sentences.json"), r#"{"sentences": ["Hi."]}"#).unwrap();
        let events = vec![event("a", 6, 2), event("b", 6, 3), event("c", 6, 4)];

        let greeting = build_greeting(
            dir.path(),
            &config(),
            &events,
            clock(),
            false,
            &fixed_sun(),
            &no_lunar(),
        );

        assert_eq!(greeting.sentence.as_deref(), Some("Hi."));
        let countdown = greeting.countdown.unwrap();
        assert_eq!(countdown.event, SunEvent::Sunset);
        assert_eq!(countdown.hours_minutes(), (7, 0));
        assert_eq!(greeting.events.len(), 2);
        assert_eq!(greeting.date_format, "%Y/%m/%d");
    }

    #[test]
    fn test_optional_sections_degrade() {
        let dir = tempdir().unwrap();
        let mut sun = MockSunCalculator::new();
        sun.expect_sun_times()
            .returning(|_, _| Err(AstroError::InvalidOffset(8)));

        // No sentence pool and a failing calculator: both lines are omitted
        let greeting = build_greeting(
            dir.path(),
            &config(),
            &[event("a", 6, 2)],
            clock(),
            false,
            &sun,
            &no_lunar(),
        );

        assert!(greeting.sentence.is_none());
        assert!(greeting.countdown.is_none());
        assert_eq!(greeting.events.len(), 1);
    }

    #[test]
    fn test_polar_day_omits_sun_line() {
        let dir = tempdir().unwrap();
        let mut polar = config();
        polar.location = Location {
            latitude: 69.65,
            longitude: 18.96,
            timezone: 1,
        };

        let greeting = build_greeting(
            dir.path(),
            &polar,
            &[],
            clock(),
            false,
            &SolarCalculator,
            &no_lunar(),
        );

        assert!(greeting.countdown.is_none());
    }

    #[test]
    fn test_disabled_or_unconfigured_sections_are_not_computed() {
        let dir = tempdir().unwrap();
        let mut sun = MockSunCalculator::new();
        sun.expect_sun_times().never();

        let mut unconfigured = config();
        unconfigured.show_daily_sentence = false;
        unconfigured.location.latitude = 0.0;

        let greeting = build_greeting(
            dir.path(),
            &unconfigured,
            &[],
            clock(),
            false,
            &sun,
            &no_lunar(),
        );

        assert!(greeting.sentence.is_none());
        assert!(greeting.countdown.is_none());
        assert!(greeting.events.is_empty());
        assert!(!dir.path().join("cache").exists());
    }

    #[test]
    fn test_clock_at_local_keeps_wall_time() {
        let local = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let clock = Clock::at_local(local).unwrap();
        assert_eq!(clock.local, local);
        assert_eq!(clock.utc.with_timezone(&Local).naive_local(), local);
    }
}

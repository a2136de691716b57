//! Rendering of the greeter's product output.
//!
//! These lines are what the user runs the tool for, so they bypass the
//! diagnostic logger and are written directly with `crossterm` colours.
//! The `format_*` functions build the plain text; [`render`] adds styling.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use crossterm::style::Stylize;
use std::fmt::Write as _;
use std::io::{self, Write};

use crate::common::constants::{DEFAULT_DATE_FORMAT, GREETING};
use crate::events::{EventKind, ResolvedOccurrence};
use crate::geo::{SunCountdown, SunEvent};

/// Everything a display run prints, already computed.
#[derive(Debug, Default)]
pub struct Greeting {
    pub sentence: Option<String>,
    pub countdown: Option<SunCountdown>,
    pub events: Vec<ResolvedOccurrence>,
    /// chrono format string for event dates.
    pub date_format: String,
}

/// Format `date`, or `None` if `format` is invalid or needs time fields.
pub fn try_format_date(date: NaiveDate, format: &str) -> Option<String> {
    let items: Vec<Item> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }
    let mut out = String::new();
    write!(out, "{}", date.format_with_items(items.into_iter())).ok()?;
    Some(out)
}

/// Format `date`, falling back to the default format.
pub fn format_date(date: NaiveDate, format: &str) -> String {
    try_format_date(date, format)
        .or_else(|| try_format_date(date, DEFAULT_DATE_FORMAT))
        .unwrap_or_else(|| date.to_string())
}

pub fn format_sentence(sentence: &str) -> String {
    format!("📜 {sentence}")
}

pub fn format_countdown(countdown: &SunCountdown) -> String {
    let which = if countdown.is_next_day { "Next" } else { "This" };
    let (hours, minutes) = countdown.hours_minutes();
    match countdown.event {
        SunEvent::Sunrise => format!("☀️ {which} sunrise in {hours}h {minutes}m"),
        SunEvent::Sunset => format!("🌙 {which} sunset in {hours}h {minutes}m"),
    }
}

pub fn format_event(occurrence: &ResolvedOccurrence, date_format: &str) -> String {
    let emoji = match occurrence.event.kind {
        EventKind::Birthday => "🎂",
        EventKind::Festival => "🎉",
    };
    let name = &occurrence.event.name;
    let date = format_date(occurrence.target_date, date_format);
    let days = occurrence.days_until;

    if days >= 0 {
        format!("{emoji} {name} in {days} {} ({date})", day_word(days))
    } else {
        format!("{emoji} {name} was {} {} ago ({date})", -days, day_word(-days))
    }
}

fn day_word(days: i64) -> &'static str {
    if days == 1 { "day" } else { "days" }
}

/// Write the full greeting to `out`.
pub fn render(out: &mut impl Write, greeting: &Greeting) -> io::Result<()> {
    writeln!(out, "{}", GREETING.cyan().bold())?;
    writeln!(out)?;

    if let Some(sentence) = &greeting.sentence {
        writeln!(out, "  {}", format_sentence(sentence).magenta())?;
        writeln!(out)?;
    }

    if let Some(countdown) = &greeting.countdown {
        writeln!(out, "  {}", format_countdown(countdown).yellow())?;
    }

    for occurrence in &greeting.events {
        let line = format_event(occurrence, &greeting.date_format);
        match occurrence.event.kind {
            EventKind::Birthday => writeln!(out, "  {}", line.green())?,
            EventKind::Festival => writeln!(out, "  {}", line.blue())?,
        }
    }

    writeln!(out)?;
    out.flush()
}

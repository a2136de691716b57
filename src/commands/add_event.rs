//! Interactive creation of a new event.

use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};

use crate::config;
use crate::events::{self, Event, EventKind};

/// Read one trimmed answer after printing `prompt`. End of input reads as
/// an empty answer so every default applies.
fn ask(input: &mut impl BufRead, out: &mut impl Write, prompt: &str) -> Result<String> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read input")?;
    Ok(line.trim().to_string())
}

fn is_yes(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("y")
}

/// Parse `count` whitespace-separated integers, or `None` if malformed.
fn parse_numbers(answer: &str, count: usize) -> Option<Vec<i64>> {
    let numbers: Vec<i64> = answer
        .split_whitespace()
        .map(|part| part.parse().ok())
        .collect::<Option<_>>()?;
    (numbers.len() == count).then_some(numbers)
}

/// Ask for every field of a new event.
///
/// Returns `Ok(None)` if the user declines the final confirmation.
pub fn prompt_event(
    input: &mut impl BufRead,
    out: &mut impl Write,
    name: Option<String>,
) -> Result<Option<Event>> {
    writeln!(out, "\n=== Add a new event ===\n")?;

    let name = match name.filter(|n| !n.trim().is_empty()) {
        Some(name) => {
            writeln!(out, "Event name: {name}")?;
            name
        }
        None => ask(input, out, "Event name: ")?,
    };
    if name.is_empty() {
        bail!("Event name cannot be empty");
    }

    let kind = match ask(input, out, "Event type (birthday/festival) [festival]: ")?.as_str() {
        "" | "festival" => EventKind::Festival,
        "birthday" => EventKind::Birthday,
        _ => {
            writeln!(out, "Unknown event type, using festival")?;
            EventKind::Festival
        }
    };

    let is_lunar = is_yes(&ask(input, out, "Lunar calendar (y/n) [n]: ")?);
    let repeat_answer = ask(input, out, "Repeat every year (y/n) [y]: ")?;
    let repeat_yearly = repeat_answer.is_empty() || is_yes(&repeat_answer);

    let (year, month, day) = if repeat_yearly {
        let answer = ask(input, out, "Date (month day, e.g. 1 1): ")?;
        match parse_numbers(&answer, 2).as_deref() {
            Some(&[month, day]) => (None, month, day),
            _ => bail!("Invalid date '{answer}'"),
        }
    } else {
        let answer = ask(input, out, "Full date (year month day, e.g. 2025 1 1): ")?;
        match parse_numbers(&answer, 3).as_deref() {
            Some(&[year, month, day]) => (Some(year), month, day),
            _ => bail!("Invalid date '{answer}'"),
        }
    };

    let mut event = Event {
        name,
        kind,
        year: match year {
            Some(y) => Some(i32::try_from(y).context("Year out of range")?),
            None => None,
        },
        month: u32::try_from(month).unwrap_or(0),
        day: u32::try_from(day).unwrap_or(0),
        repeat_yearly,
        always_show: false,
        is_lunar,
    };
    event.validate().context("Invalid date")?;

    event.always_show = is_yes(&ask(input, out, "Always show (y/n) [n]: ")?);

    writeln!(out, "\nEvent details:")?;
    writeln!(out, "  Name: {}", event.name)?;
    writeln!(out, "  Type: {}", event.kind.as_str())?;
    writeln!(
        out,
        "  Calendar: {}",
        if event.is_lunar { "lunar" } else { "solar" }
    )?;
    match event.year {
        Some(year) if !event.repeat_yearly => {
            writeln!(out, "  Date: {year}-{:02}-{:02}", event.month, event.day)?
        }
        _ => writeln!(out, "  Date: every year on {:02}-{:02}", event.month, event.day)?,
    }
    writeln!(out, "  Always show: {}", event.always_show)?;

    let confirm = ask(input, out, "\nAdd this event? (y/n) [y]: ")?;
    if !confirm.is_empty() && !is_yes(&confirm) {
        writeln!(out, "Cancelled")?;
        return Ok(None);
    }
    Ok(Some(event))
}

/// Handle `--add-event`: prompt on the terminal and append to the event file.
pub fn handle_add_event_command(config_dir: Option<&str>, name: Option<String>) -> Result<()> {
    let config_dir = config::resolve_config_dir(config_dir)?;
    let config = config::load_from_dir(&config_dir)?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();

    let Some(event) = prompt_event(&mut input, &mut out, name)? else {
        return Ok(());
    };

    events::append_event(&config.dates_path(&config_dir), &event)?;
    writeln!(out, "\n✓ Added event: {}", event.name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(answers: &str, name: Option<&str>) -> (Result<Option<Event>>, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = prompt_event(&mut input, &mut out, name.map(str::to_string));
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_defaults_for_recurring_event() {
        let (result, output) = run("Anniversary\n\n\n\n6 18\n\n\n", None);

        let event = result.unwrap().unwrap();
        assert_eq!(
            event,
            Event {
                name: "Anniversary".to_string(),
                kind: EventKind::Festival,
                year: None,
                month: 6,
                day: 18,
                repeat_yearly: true,
                always_show: false,
                is_lunar: false,
            }
        );
        assert!(output.contains("Date: every year on 06-18"));
    }

    #[test]
    fn test_one_off_lunar_birthday_with_given_name() {
        let (result, output) = run("birthday\ny\nn\n2030 8 15\ny\ny\n", Some("Grandpa"));

        let event = result.unwrap().unwrap();
        assert_eq!(event.name, "Grandpa");
        assert_eq!(event.kind, EventKind::Birthday);
        assert_eq!(event.year, Some(2030));
        assert!(event.is_lunar && event.always_show && !event.repeat_yearly);
        assert!(output.contains("Event name: Grandpa"));
        assert!(output.contains("Calendar: lunar"));
    }

    #[test]
    fn test_unknown_type_falls_back_to_festival() {
        let (result, output) = run("x\nholiday\nn\ny\n1 1\nn\ny\n", None);
        assert_eq!(result.unwrap().unwrap().kind, EventKind::Festival);
        assert!(output.contains("Unknown event type"));
    }

    #[test]
    fn test_declined_confirmation_cancels() {
        let (result, output) = run("x\n\n\n\n1 1\n\nno\n", None);
        assert!(result.unwrap().is_none());
        assert!(output.contains("Cancelled"));
    }

    #[test]
    fn test_invalid_input_is_an_error() {
        assert!(run("\n", None).0.is_err());
        assert!(run("x\n\n\n\n13 1\n", None).0.is_err());
        assert!(run("x\n\n\n\nJan 1\n", None).0.is_err());
        assert!(run("x\n\n\nn\n1899 1 1\n", None).0.is_err());
        assert!(run("x\n\n\nn\n1 1\n", None).0.is_err());
    }
}

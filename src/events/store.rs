//! The event file: `{ "events": [ {...}, ... ] }`.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::fs;
use std::path::Path;

use super::Event;
use crate::common::utils::{path_for_display, write_json_pretty};

const EVENTS_KEY: &str = "events";

fn read_document(path: &Path) -> Result<Value> {
    let data = fs::read(path)
        .with_context(|| format!("Failed to read events file {}", path_for_display(path)))?;
    let document: Value = serde_json::from_slice(&data)
        .with_context(|| format!("Failed to parse events file {}", path_for_display(path)))?;

    if !document.is_object() {
        bail!("Events file {} is not a JSON object", path_for_display(path));
    }
    Ok(document)
}

/// Load all valid events.
///
/// A missing or malformed file is an error. Individual entries that do not
/// parse or fail [`Event::validate`] are skipped with a warning.
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    let document = read_document(path)?;

    let entries = match document.get(EVENTS_KEY) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => bail!(
            "'{}' in {} must be an array",
            EVENTS_KEY,
            path_for_display(path)
        ),
    };

    let mut events = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let event: Event = match serde_json::from_value(entry.clone()) {
            Ok(event) => event,
            Err(e) => {
                log_warning!("Skipping event #{}: {}", index + 1, e);
                continue;
            }
        };
        if let Err(e) = event.validate() {
            log_warning!("Skipping event '{}': {}", event.name, e);
            continue;
        }
        events.push(event);
    }
    Ok(events)
}

/// Append `event` to the file, keeping every other top-level key intact.
pub fn append_event(path: &Path, event: &Event) -> Result<()> {
    let mut document = read_document(path)?;
    let new_entry = serde_json::to_value(event).context("Failed to serialize event")?;

    let Some(object) = document.as_object_mut() else {
        bail!("Events file {} is not a JSON object", path_for_display(path));
    };
    let slot = object
        .entry(EVENTS_KEY)
        .or_insert_with(|| Value::Array(Vec::new()));
    if slot.is_null() {
        *slot = Value::Array(Vec::new());
    }
    let Some(entries) = slot.as_array_mut() else {
        bail!(
            "'{}' in {} must be an array",
            EVENTS_KEY,
            path_for_display(path)
        );
    };
    entries.push(new_entry);

    write_json_pretty(path, &document)
}

//! Ordering and selection of events for display.

use chrono::NaiveDateTime;

use super::recurrence::{days_until, resolve};
use super::{Event, ResolvedOccurrence};
use crate::lunar::LunarCalendar;

/// Resolve every event against `now`, nearest first.
///
/// Events that cannot be resolved are dropped with a debug trace. The sort
/// is stable, so events with equal distance keep their file order.
pub fn collect_occurrences(
    events: &[Event],
    now: NaiveDateTime,
    lunar: &impl LunarCalendar,
) -> Vec<ResolvedOccurrence> {
    let mut occurrences: Vec<ResolvedOccurrence> = events
        .iter()
        .filter_map(|event| match resolve(event, now, lunar) {
            Ok(target_date) => Some(ResolvedOccurrence {
                event: event.clone(),
                days_until: days_until(target_date, now),
                target_date,
            }),
            Err(e) => {
                log_debug!("Skipping event '{}': {}", event.name, e);
                None
            }
        })
        .collect();

    occurrences.sort_by_key(|o| o.days_until);
    occurrences
}

/// Keep every always-show occurrence, then fill up to `max_count` with the
/// rest in order. The result is re-sorted by distance.
pub fn filter_occurrences(all: &[ResolvedOccurrence], max_count: usize) -> Vec<ResolvedOccurrence> {
    let mut selected: Vec<ResolvedOccurrence> =
        all.iter().filter(|o| o.event.always_show).cloned().collect();

    for occurrence in all.iter().filter(|o| !o.event.always_show) {
        if selected.len() >= max_count {
            break;
        }
        selected.push(occurrence.clone());
    }

    selected.sort_by_key(|o| o.days_until);
    selected
}

pub fn rank_and_filter(
    events: &[Event],
    now: NaiveDateTime,
    max_count: usize,
    lunar: &impl LunarCalendar,
) -> Vec<ResolvedOccurrence> {
    filter_occurrences(&collect_occurrences(events, now, lunar), max_count)
}

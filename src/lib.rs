//! hellodays: a terminal greeter.
//!
//! Each run prints a greeting, a rotating "daily sentence", a countdown to
//! the next sunrise or sunset and the nearest birthdays and festivals
//! (solar or Chinese lunar dates).
//!
//! The binary only parses arguments and dispatches to [`commands`]; all
//! logic lives in this library so it can be exercised by tests.

#[macro_use]
pub mod logger;

pub mod args;
pub mod commands;
pub mod common;
pub mod config;
pub mod display;
pub mod events;
pub mod geo;
pub mod lunar;
pub mod sentence;

pub use config::Config;
pub use events::{Event, EventKind, ResolvedOccurrence};

//! Command handlers for hellodays.
//!
//! - [`show`]: the default greeting, including config updates from flags
//! - [`add_event`]: interactive event creation
//! - [`add_sentence`]: append to the sentence pool
//! - [`set`]: persisting configuration changes

pub mod add_event;
pub mod add_sentence;
pub mod set;
pub mod show;

pub use add_event::handle_add_event_command;
pub use add_sentence::handle_add_sentence_command;
pub use show::{ShowOptions, handle_show_command};

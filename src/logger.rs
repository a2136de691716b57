//! Structured diagnostic logging with box-drawing decoration.
//!
//! Everything that is not the greeter's product output (the greeting, the
//! sentence, sun countdown and event lines) goes through this module: help and
//! version text, warnings about the configuration, fatal errors and debug
//! traces.
//!
//! ## Conventions
//!
//! - **`log_block_start!`** opens a new conceptual block: an empty pipe `┃`
//!   followed by `┣ message`.
//! - **`log_decorated!`** continues a block with `┣ message`.
//! - **`log_indented!`** prints nested details as `┃   message`.
//! - **`log_pipe!`** inserts a single `┃` spacer, typically before a
//!   `log_warning!`/`log_error!` that starts its own block.
//! - **`log_version!`** prints the `┏ hellodays vX.Y.Z ━━╸` header and
//!   **`log_end!`** the closing `╹`.
//! - **`log_error_exit!`** closes the flow with `┗[ERROR] message`.
//! - **`log_info!`, `log_warning!`, `log_error!`, `log_critical!`** carry a
//!   coloured `[LEVEL]` tag.
//! - **`log_debug!`** is only printed after [`Log::set_debug`] was enabled
//!   (the `--debug` flag).

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Line decoration applied by [`Log::emit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Decorated,
    Indented,
    Pipe,
    BlockStart,
    Version,
    End,
    Info,
    Warning,
    Error,
    ErrorExit,
    Debug,
    Critical,
}

pub struct Log;

impl Log {
    /// Enable or disable all diagnostic output.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Enable `log_debug!` output.
    pub fn set_debug(enabled: bool) {
        DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_debug() -> bool {
        DEBUG_ENABLED.load(Ordering::SeqCst)
    }

    /// Format and write one diagnostic line. Used by the macros.
    pub fn emit(style: Style, message: &str) {
        if !Self::is_enabled() || (style == Style::Debug && !Self::is_debug()) {
            return;
        }
        write_output(&format_line(style, message));
    }
}

/// Render a message with the decoration for `style`, including the newline.
pub fn format_line(style: Style, message: &str) -> String {
    match style {
        Style::Decorated => format!("┣ {message}\n"),
        Style::Indented => format!("┃   {message}\n"),
        Style::Pipe => "┃\n".to_string(),
        Style::BlockStart => format!("┃\n┣ {message}\n"),
        Style::Version => format!("┏ hellodays v{} ━━╸\n", env!("CARGO_PKG_VERSION")),
        Style::End => "╹\n".to_string(),
        Style::Info => format!("┣[\x1b[32mINFO\x1b[0m] {message}\n"),
        Style::Warning => format!("┣[\x1b[33mWARNING\x1b[0m] {message}\n"),
        Style::Error => format!("┣[\x1b[31mERROR\x1b[0m] {message}\n"),
        Style::ErrorExit => format!("┃\n┗[\x1b[31mERROR\x1b[0m] {message}\n"),
        Style::Debug => format!("┣[\x1b[36mDEBUG\x1b[0m] {message}\n"),
        Style::Critical => format!("┣[\x1b[31mCRITICAL\x1b[0m] {message}\n"),
    }
}

pub fn write_output(text: &str) {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

// # Logging Macros

#[macro_export]
macro_rules! log_decorated {
    ($fmt:literal $($arg:tt)*) => {{
        $crate::logger::Log::emit($crate::logger::Style::Decorated, &format!($fmt $($arg)*));
    }};
    ($expr:expr) => {{
        $crate::logger::Log::emit($crate::logger::Style::Decorated, &format!("{}", $expr));
    }};
}

#[macro_export]
macro_rules! log_indented {
    ($fmt:literal $($arg:tt)*) => {{
        $crate::logger::Log::emit($crate::logger::Style::Indented, &format!($fmt $($arg)*));
    }};
    ($expr:expr) => {{
        $crate::logger::Log::emit($crate::logger::Style::Indented, &format!("{}", $expr));
    }};
}

#[macro_export]
macro_rules! log_pipe {
    () => {{
        $crate::logger::Log::emit($crate::logger::Style::Pipe, "");
    }};
}

#[macro_export]
macro_rules! log_block_start {
    ($fmt:literal $($arg:tt)*) => {{
        $crate::logger::Log::emit($crate::logger::Style::BlockStart, &format!($fmt $($arg)*));
    }};
    ($expr:expr) => {{
        $crate::logger::Log::emit($crate::logger::Style::BlockStart, &format!("{}", $expr));
    }};
}

#[macro_export]
macro_rules! log_version {
    () => {{
        $crate::logger::Log::emit($crate::logger::Style::Version, "");
    }};
}

#[macro_export]
macro_rules! log_end {
    () => {{
        $crate::logger::Log::emit($crate::logger::Style::End, "");
    }};
}

#[macro_export]
macro_rules! log_info {
    ($fmt:literal $($arg:tt)*) => {{
        $crate::logger::Log::emit($crate::logger::Style::Info, &format!($fmt $($arg)*));
    }};
    ($expr:expr) => {{
        $crate::logger::Log::emit($crate::logger::Style::Info, &format!("{}", $expr));
    }};
}

#[macro_export]
macro_rules! log_warning {
    ($fmt:literal $($arg:tt)*) => {{
        $crate::logger::Log::emit($crate::logger::Style::Warning, &format!($fmt $($arg)*));
    }};
    ($expr:expr) => {{
        $crate::logger::Log::emit($crate::logger::Style::Warning, &format!("{}", $expr));
    }};
}

#[macro_export]
macro_rules! log_error {
    ($fmt:literal $($arg:tt)*) => {{
        $crate::logger::Log::emit($crate::logger::Style::Error, &format!($fmt $($arg)*));
    }};
    ($expr:expr) => {{
        $crate::logger::Log::emit($crate::logger::Style::Error, &format!("{}", $expr));
    }};
}

/// Terminates the visual flow with `┗[ERROR]`; callers exit afterwards.
#[macro_export]
macro_rules! log_error_exit {
    ($fmt:literal $($arg:tt)*) => {{
        $crate::logger::Log::emit($crate::logger::Style::ErrorExit, &format!($fmt $($arg)*));
    }};
    ($expr:expr) => {{
        $crate::logger::Log::emit($crate::logger::Style::ErrorExit, &format!("{}", $expr));
    }};
}

#[macro_export]
macro_rules! log_debug {
    ($fmt:literal $($arg:tt)*) => {{
        if $crate::logger::Log::is_debug() {
            $crate::logger::Log::emit($crate::logger::Style::Debug, &format!($fmt $($arg)*));
        }
    }};
    ($expr:expr) => {{
        if $crate::logger::Log::is_debug() {
            $crate::logger::Log::emit($crate::logger::Style::Debug, &format!("{}", $expr));
        }
    }};
}

#[macro_export]
macro_rules! log_critical {
    ($fmt:literal $($arg:tt)*) => {{
        $crate::logger::Log::emit($crate::logger::Style::Critical, &format!($fmt $($arg)*));
    }};
    ($expr:expr) => {{
        $crate::logger::Log::emit($crate::logger::Style::Critical, &format!("{}", $expr));
    }};
}

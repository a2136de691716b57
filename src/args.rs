//! Command-line argument parsing.
//!
//! Every option is accepted with one or two leading dashes (`-config` and
//! `--config`) and values may be given either as the next argument or inline
//! with `=` (`--show-date-amount=5`).

use chrono::NaiveDateTime;

use crate::common::utils::parse_bool_flag;

/// Format accepted by `--at`.
pub const AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Configuration changes requested on the command line.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConfigUpdates {
    pub show_sun_times: Option<bool>,
    pub show_daily_sentence: Option<bool>,
    pub show_date_amount: Option<i64>,
}

impl ConfigUpdates {
    pub fn is_empty(&self) -> bool {
        self.show_sun_times.is_none()
            && self.show_daily_sentence.is_none()
            && self.show_date_amount.is_none()
    }
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Print the greeting, optionally after persisting config changes.
    Show {
        debug_enabled: bool,
        config_dir: Option<String>,
        refresh_sentence: bool,
        /// Render as if the local time were this instead of now.
        at: Option<NaiveDateTime>,
        updates: ConfigUpdates,
    },
    /// Append a sentence to the sentence pool.
    AddSentence {
        debug_enabled: bool,
        config_dir: Option<String>,
        sentence: String,
    },
    /// Interactively create an event, optionally with its name given.
    AddEvent {
        debug_enabled: bool,
        config_dir: Option<String>,
        name: Option<String>,
    },
    ShowHelp,
    ShowVersion,
    /// Show help due to invalid arguments and exit with failure.
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

/// Split `--name=value` / `-name` into the bare option name and inline value.
fn split_option(arg: &str) -> Option<(&str, Option<&str>)> {
    let stripped = arg
        .strip_prefix("--")
        .or_else(|| arg.strip_prefix('-'))
        .filter(|rest| !rest.is_empty())?;
    Some(match stripped.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (stripped, None),
    })
}

impl ParsedArgs {
    /// Parse command-line arguments (including the program name) into an action.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let action = match Self::parse_action(args) {
            Ok(action) => action,
            Err(message) => {
                log_warning!("{}", message);
                CliAction::ShowHelpDueToError
            }
        };
        ParsedArgs { action }
    }

    fn parse_action<I, S>(args: I) -> Result<CliAction, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut config_dir: Option<String> = None;
        let mut add_sentence: Option<String> = None;
        let mut add_event = false;
        let mut refresh_sentence = false;
        let mut at: Option<NaiveDateTime> = None;
        let mut updates = ConfigUpdates::default();
        let mut positional: Vec<String> = Vec::new();

        let mut iter = args_vec.into_iter();
        while let Some(arg) = iter.next() {
            let Some((name, inline)) = split_option(&arg) else {
                positional.push(arg);
                continue;
            };
            let mut value = |name: &str| -> Result<String, String> {
                match inline {
                    Some(v) => Ok(v.to_string()),
                    None => iter
                        .next()
                        .ok_or_else(|| format!("Missing value for option '{name}'")),
                }
            };

            match name {
                "h" | "help" => display_help = true,
                "V" | "version" => display_version = true,
                "d" | "debug" => debug_enabled = true,
                "c" | "config" => config_dir = Some(value(name)?),
                "add-sentence" => add_sentence = Some(value(name)?),
                "add-event" => add_event = true,
                "refresh-sentence" => refresh_sentence = true,
                "show-sun-times" => updates.show_sun_times = parse_bool_flag(&value(name)?),
                "show-daily-sentence" => {
                    updates.show_daily_sentence = parse_bool_flag(&value(name)?)
                }
                "show-date-amount" => {
                    let raw = value(name)?;
                    let amount: i64 = raw
                        .trim()
                        .parse()
                        .map_err(|_| format!("Invalid value '{raw}' for option '{name}'"))?;
                    updates.show_date_amount = Some(amount).filter(|n| *n > 0);
                }
                "at" => {
                    let raw = value(name)?;
                    let parsed = NaiveDateTime::parse_from_str(raw.trim(), AT_FORMAT)
                        .map_err(|_| format!("Invalid time '{raw}', expected YYYY-MM-DD HH:MM:SS"))?;
                    at = Some(parsed);
                }
                _ => return Err(format!("Unknown option: {arg}")),
            }
        }

        if display_help {
            return Ok(CliAction::ShowHelp);
        }
        if display_version {
            return Ok(CliAction::ShowVersion);
        }

        if let Some(sentence) = add_sentence.filter(|s| !s.is_empty()) {
            return Ok(CliAction::AddSentence {
                debug_enabled,
                config_dir,
                sentence,
            });
        }

        if add_event {
            return Ok(CliAction::AddEvent {
                debug_enabled,
                config_dir,
                name: positional.into_iter().next(),
            });
        }

        if let Some(extra) = positional.first() {
            return Err(format!("Unexpected argument: {extra}"));
        }

        Ok(CliAction::Show {
            debug_enabled,
            config_dir,
            refresh_sentence,
            at,
            updates,
        })
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    log_decorated!(env!("CARGO_PKG_DESCRIPTION"));
    log_end!();
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("hellodays [OPTIONS]");
    log_indented!("hellodays --add-event [name]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>              Use custom configuration directory");
    log_indented!("    --add-sentence <text>       Add a sentence to the sentence pool");
    log_indented!("    --add-event [name]          Add an event interactively");
    log_indented!("    --show-sun-times <bool>     Save whether to show the sunrise/sunset line");
    log_indented!("    --show-daily-sentence <bool> Save whether to show the daily sentence");
    log_indented!("    --show-date-amount <n>      Save how many events to show");
    log_indented!("    --refresh-sentence          Pick a new daily sentence now");
    log_indented!("    --at \"YYYY-MM-DD HH:MM:SS\"  Show the greeting for another local time");
    log_indented!("-d, --debug                     Enable detailed debug output");
    log_indented!("-h, --help                      Print help information");
    log_indented!("-V, --version                   Print version information");
    log_block_start!("Examples:");
    log_indented!("hellodays --add-event               Ask for every field");
    log_indented!("hellodays --add-event \"Moon Festival\" Name given, ask for the rest");
    log_end!();
}

//! Entry point: parse arguments and dispatch to the command handlers.
//!
//! Fatal errors are reported with `log_error_exit!` and exit with status 1.

use anyhow::Result;

use hellodays::args::{self, CliAction, ParsedArgs};
use hellodays::commands::{self, ShowOptions};
use hellodays::common::constants::EXIT_FAILURE;
use hellodays::logger::Log;
use hellodays::log_error_exit;

fn run(action: CliAction) -> Result<()> {
    match action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::AddSentence {
            debug_enabled,
            config_dir,
            sentence,
        } => {
            Log::set_debug(debug_enabled);
            commands::handle_add_sentence_command(config_dir.as_deref(), &sentence)
        }
        CliAction::AddEvent {
            debug_enabled,
            config_dir,
            name,
        } => {
            Log::set_debug(debug_enabled);
            commands::handle_add_event_command(config_dir.as_deref(), name)
        }
        CliAction::Show {
            debug_enabled,
            config_dir,
            refresh_sentence,
            at,
            updates,
        } => {
            Log::set_debug(debug_enabled);
            commands::handle_show_command(&ShowOptions {
                config_dir,
                refresh_sentence,
                at,
                updates,
            })
        }
    }
}

fn main() {
    let parsed_args = ParsedArgs::parse(std::env::args());

    if let Err(e) = run(parsed_args.action) {
        log_error_exit!("{:#}", e);
        std::process::exit(EXIT_FAILURE);
    }
}

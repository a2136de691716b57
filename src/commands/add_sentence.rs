//! `--add-sentence`: append a sentence to the pool.

use anyhow::Result;

use crate::common::constants::DEFAULT_SENTENCES_FILE;
use crate::common::utils::path_for_display;
use crate::config;
use crate::sentence;

/// Append `text` to `sentences.json` in the configuration directory.
///
/// The pool file name is fixed here; `sentencesFile` from the configuration
/// is not consulted, so this works before `config.json` exists.
pub fn handle_add_sentence_command(config_dir: Option<&str>, text: &str) -> Result<()> {
    let config_dir = config::resolve_config_dir(config_dir)?;
    let path = config_dir.join(DEFAULT_SENTENCES_FILE);

    sentence::add_sentence(&path, text)?;

    log_block_start!("Added sentence: {}", text);
    log_indented!("to {}", path_for_display(&path));
    log_end!();
    Ok(())
}

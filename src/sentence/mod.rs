//! The rotating "daily sentence".
//!
//! A sentence is drawn at random from the pool file and cached. Each run
//! consults the cache under the configured [`RefreshPolicy`]:
//!
//! - **Miss** (no file, unreadable, corrupt): draw a new sentence.
//! - **Fresh**: reuse the cached sentence. In count mode the usage counter is
//!   incremented and persisted first, so the sentence ages by use.
//! - **Stale** or forced: draw a new sentence. The counter is reset on a
//!   forced refresh and in count mode; a time-mode refresh only replaces the
//!   sentence and its timestamp.
//!
//! Cache writes are best-effort. Only a missing, malformed or empty pool is an
//! error, and callers treat that as "no sentence today".

pub mod cache;
pub mod pool;

use chrono::{DateTime, Utc};
use rand::Rng;
use std::fmt;
use std::path::Path;

pub use cache::{CacheLookup, CacheMiss, RefreshPolicy, SentenceCacheEntry};
pub use pool::{add_sentence, load_sentences};

use crate::common::utils::path_for_display;
use crate::config::Config;

/// Failure to produce a sentence.
#[derive(Debug, Clone, PartialEq)]
pub enum SentenceError {
    /// The pool file could not be read.
    PoolUnreadable(String),
    /// The pool file is not valid JSON of the expected shape.
    PoolMalformed(String),
    /// The pool contains no sentences.
    PoolEmpty,
    /// The cache directory could not be created.
    CacheDir(String),
}

impl fmt::Display for SentenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentenceError::PoolUnreadable(e) => write!(f, "failed to read sentence pool: {e}"),
            SentenceError::PoolMalformed(e) => write!(f, "failed to parse sentence pool: {e}"),
            SentenceError::PoolEmpty => write!(f, "sentence pool is empty"),
            SentenceError::CacheDir(e) => write!(f, "failed to create cache directory: {e}"),
        }
    }
}

impl std::error::Error for SentenceError {}

/// Return the sentence to show for this run, updating the cache as needed.
pub fn get_daily_sentence<R: Rng + ?Sized>(
    cache_path: &Path,
    pool_path: &Path,
    policy: &RefreshPolicy,
    force_refresh: bool,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<String, SentenceError> {
    let mut entry = if force_refresh {
        SentenceCacheEntry::empty()
    } else {
        match cache::lookup(cache_path, policy, now) {
            CacheLookup::Fresh(mut entry) => {
                if policy.is_count() {
                    entry.update_count += 1;
                    persist(cache_path, &entry);
                }
                return Ok(entry.sentence);
            }
            CacheLookup::Stale(entry) => {
                log_debug!("Cached sentence is stale ({})", policy);
                entry
            }
            CacheLookup::Miss(miss) => {
                log_debug!("{}", miss);
                SentenceCacheEntry::empty()
            }
        }
    };

    let sentences = load_sentences(pool_path)?;
    let sentence = pool::choose_sentence(&sentences, rng).ok_or(SentenceError::PoolEmpty)?;

    entry.sentence = sentence.clone();
    entry.last_update = now;
    if force_refresh || policy.is_count() {
        entry.update_count = 0;
    }
    persist(cache_path, &entry);

    Ok(sentence)
}

/// Resolve the cache and pool paths from the configuration and fetch the
/// sentence with a thread-local random source.
pub fn daily_sentence_for(
    config_dir: &Path,
    config: &Config,
    force_refresh: bool,
    now: DateTime<Utc>,
) -> Result<String, SentenceError> {
    let cache_path = config.sentence_cache_path(config_dir);
    if let Some(cache_dir) = cache_path.parent() {
        std::fs::create_dir_all(cache_dir).map_err(|e| SentenceError::CacheDir(e.to_string()))?;
    }

    get_daily_sentence(
        &cache_path,
        &config.sentences_path(config_dir),
        &config.refresh_policy(),
        force_refresh,
        now,
        &mut rand::thread_rng(),
    )
}

fn persist(path: &Path, entry: &SentenceCacheEntry) {
    if let Err(e) = cache::save_cache(path, entry) {
        log_debug!("Could not write sentence cache {}: {:#}", path_for_display(path), e);
    }
}

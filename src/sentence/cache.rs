//! Rotating sentence cache: record format, refresh policy and persistence.
//!
//! The cache file holds exactly one [`SentenceCacheEntry`]. Reading never
//! fails: a missing, unreadable or corrupt file is reported as a
//! [`CacheLookup::Miss`] so the caller can regenerate it. Writing is
//! best-effort and goes through a temporary file plus rename, so a failed
//! write leaves the previous cache intact.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::common::utils::write_atomic;

/// The single record stored in the cache file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceCacheEntry {
    pub sentence: String,
    pub last_update: DateTime<Utc>,
    pub update_count: i64,
}

impl SentenceCacheEntry {
    /// An empty record, used when no usable cache exists yet.
    pub fn empty() -> Self {
        Self {
            sentence: String::new(),
            last_update: DateTime::<Utc>::UNIX_EPOCH,
            update_count: 0,
        }
    }
}

/// When a cached sentence goes stale.
///
/// The configuration stores a single integer whose meaning depends on the
/// mode; this type makes the active meaning explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Stale once more than `hours` have passed since the last update.
    Time { hours: i64 },
    /// Stale once the sentence has been shown `uses` times.
    Count { uses: i64 },
    /// Never stale by itself; only a forced refresh replaces the sentence.
    Manual,
}

impl RefreshPolicy {
    /// Map `sentenceUpdateMode`/`sentenceUpdateInterval` onto a policy.
    pub fn from_mode(mode: &str, interval: i64) -> Self {
        match mode {
            "time" => RefreshPolicy::Time { hours: interval },
            "count" => RefreshPolicy::Count { uses: interval },
            _ => RefreshPolicy::Manual,
        }
    }

    pub fn is_stale(&self, entry: &SentenceCacheEntry, now: DateTime<Utc>) -> bool {
        match *self {
            RefreshPolicy::Time { hours } => match Duration::try_hours(hours) {
                Some(interval) => now - entry.last_update > interval,
                None => false,
            },
            RefreshPolicy::Count { uses } => entry.update_count >= uses,
            RefreshPolicy::Manual => false,
        }
    }

    pub fn is_count(&self) -> bool {
        matches!(self, RefreshPolicy::Count { .. })
    }
}

impl fmt::Display for RefreshPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshPolicy::Time { hours } => write!(f, "every {hours} hours"),
            RefreshPolicy::Count { uses } => write!(f, "every {uses} uses"),
            RefreshPolicy::Manual => write!(f, "manual"),
        }
    }
}

/// Why no cached entry could be used.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheMiss {
    NotFound,
    Unreadable(String),
    Corrupt(String),
}

impl fmt::Display for CacheMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheMiss::NotFound => write!(f, "no sentence cache yet"),
            CacheMiss::Unreadable(e) => write!(f, "sentence cache unreadable: {e}"),
            CacheMiss::Corrupt(e) => write!(f, "sentence cache corrupt: {e}"),
        }
    }
}

/// Result of consulting the cache.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    Fresh(SentenceCacheEntry),
    Stale(SentenceCacheEntry),
    Miss(CacheMiss),
}

/// Read the cache file.
pub fn read_cache(path: &Path) -> Result<SentenceCacheEntry, CacheMiss> {
    let data = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CacheMiss::NotFound,
        _ => CacheMiss::Unreadable(e.to_string()),
    })?;
    serde_json::from_slice(&data).map_err(|e| CacheMiss::Corrupt(e.to_string()))
}

/// Read the cache file and classify it under `policy`.
pub fn lookup(path: &Path, policy: &RefreshPolicy, now: DateTime<Utc>) -> CacheLookup {
    match read_cache(path) {
        Ok(entry) if policy.is_stale(&entry, now) => CacheLookup::Stale(entry),
        Ok(entry) => CacheLookup::Fresh(entry),
        Err(miss) => CacheLookup::Miss(miss),
    }
}

/// Persist `entry`, replacing the cache file atomically.
pub fn save_cache(path: &Path, entry: &SentenceCacheEntry) -> Result<()> {
    let data = serde_json::to_vec(entry)?;
    write_atomic(path, &data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn entry_at(last_update: DateTime<Utc>, update_count: i64) -> SentenceCacheEntry {
        SentenceCacheEntry {
            sentence: "cached".to_string(),
            last_update,
            update_count,
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_policy_from_mode() {
        assert_eq!(RefreshPolicy::from_mode("time", 24), RefreshPolicy::Time { hours: 24 });
        assert_eq!(RefreshPolicy::from_mode("count", 3), RefreshPolicy::Count { uses: 3 });
        assert_eq!(RefreshPolicy::from_mode("", 3), RefreshPolicy::Manual);
        assert_eq!(RefreshPolicy::from_mode("Time", 3), RefreshPolicy::Manual);
    }

    #[test]
    fn test_time_policy_staleness() {
        let policy = RefreshPolicy::Time { hours: 24 };
        let now = noon();
        assert!(policy.is_stale(&entry_at(now - Duration::hours(25), 0), now));
        assert!(!policy.is_stale(&entry_at(now - Duration::hours(1), 0), now));
        // Exactly at the threshold is not yet stale
        assert!(!policy.is_stale(&entry_at(now - Duration::hours(24), 0), now));
    }

    #[test]
    fn test_count_policy_staleness() {
        let policy = RefreshPolicy::Count { uses: 3 };
        let now = noon();
        assert!(!policy.is_stale(&entry_at(now, 2), now));
        assert!(policy.is_stale(&entry_at(now, 3), now));
        assert!(policy.is_stale(&entry_at(now, 7), now));
    }

    #[test]
    fn test_manual_policy_never_stale() {
        let now = noon();
        let ancient = entry_at(now - Duration::days(3650), 1_000_000);
        assert!(!RefreshPolicy::Manual.is_stale(&ancient, now));
    }

    #[test]
    fn test_lookup_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sentence.cache");
        assert_eq!(
            lookup(&path, &RefreshPolicy::Manual, noon()),
            CacheLookup::Miss(CacheMiss::NotFound)
        );
    }

    #[test]
    fn test_lookup_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sentence.cache");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            lookup(&path, &RefreshPolicy::Manual, noon()),
            CacheLookup::Miss(CacheMiss::Corrupt(_))
        ));
    }

    #[test]
    fn test_save_then_lookup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sentence.cache");
        let entry = entry_at(noon(), 2);
        save_cache(&path, &entry).unwrap();

        let policy = RefreshPolicy::Count { uses: 3 };
        assert_eq!(lookup(&path, &policy, noon()), CacheLookup::Fresh(entry.clone()));

        let policy = RefreshPolicy::Count { uses: 2 };
        assert_eq!(lookup(&path, &policy, noon()), CacheLookup::Stale(entry));
    }

    #[test]
    fn test_reads_offset_timestamps() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sentence.cache");
        fs::write(
            &path,
            r#"{"sentence":"hi","lastUpdate":"2025-03-10T20:00:00.123456789+08:00","updateCount":4}"#,
        )
        .unwrap();

        let entry = read_cache(&path).unwrap();
        assert_eq!(entry.sentence, "hi");
        assert_eq!(entry.update_count, 4);
        assert_eq!(entry.last_update.timestamp(), noon().timestamp());
    }

    #[test]
    fn test_wire_format_uses_camel_case() {
        let json = serde_json::to_string(&entry_at(noon(), 1)).unwrap();
        assert!(json.contains("\"lastUpdate\""));
        assert!(json.contains("\"updateCount\":1"));
    }
}

//! The sentence pool file: `{ "sentences": ["...", ...] }`.

use anyhow::{Context, Result};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::SentenceError;
use crate::common::utils::{path_for_display, write_json_pretty};

#[derive(Debug, Default, Deserialize, Serialize)]
struct SentencePool {
    #[serde(default)]
    sentences: Vec<String>,
}

/// Load the non-empty list of sentences.
pub fn load_sentences(path: &Path) -> Result<Vec<String>, SentenceError> {
    let data = fs::read(path).map_err(|e| SentenceError::PoolUnreadable(e.to_string()))?;
    let pool: SentencePool =
        serde_json::from_slice(&data).map_err(|e| SentenceError::PoolMalformed(e.to_string()))?;

    if pool.sentences.is_empty() {
        return Err(SentenceError::PoolEmpty);
    }
    Ok(pool.sentences)
}

/// Pick one sentence uniformly at random.
pub fn choose_sentence<R: Rng + ?Sized>(sentences: &[String], rng: &mut R) -> Option<String> {
    sentences.choose(rng).cloned()
}

/// Append `sentence` to the pool file and rewrite it.
pub fn add_sentence(path: &Path, sentence: &str) -> Result<()> {
    let data = fs::read(path)
        .with_context(|| format!("Failed to read {}", path_for_display(path)))?;
    let mut pool: SentencePool = serde_json::from_slice(&data)
        .with_context(|| format!("Failed to parse {}", path_for_display(path)))?;

    pool.sentences.push(sentence.to_string());
    write_json_pretty(path, &pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::tempdir;

    #[test]
    fn test_load_sentences() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sentences.json");
        fs::write(&path, r#"{"sentences": ["a", "b"]}"#).unwrap();
        assert_eq!(load_sentences(&path).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_load_sentences_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sentences.json");
        assert!(matches!(load_sentences(&path), Err(SentenceError::PoolUnreadable(_))));

        fs::write(&path, "sentences: a").unwrap();
        assert!(matches!(load_sentences(&path), Err(SentenceError::PoolMalformed(_))));

        fs::write(&path, r#"{"sentences": []}"#).unwrap();
        assert!(matches!(load_sentences(&path), Err(SentenceError::PoolEmpty)));

        fs::write(&path, "{}").unwrap();
        assert!(matches!(load_sentences(&path), Err(SentenceError::PoolEmpty)));
    }

    #[test]
    fn test_choose_sentence_stays_in_pool() {
        let pool: Vec<String> = ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let picked = choose_sentence(&pool, &mut rng).unwrap();
            assert!(pool.contains(&picked));
        }
        assert_eq!(choose_sentence(&[], &mut rng), None);
    }

    #[test]
    fn test_add_sentence_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sentences.json");
        fs::write(&path, r#"{"sentences": ["first"]}"#).unwrap();

        add_sentence(&path, "second").unwrap();

        assert_eq!(load_sentences(&path).unwrap(), vec!["first", "second"]);
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n  \"sentences\""));
    }

    #[test]
    fn test_add_sentence_requires_existing_pool() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sentences.json");
        assert!(add_sentence(&path, "orphan").is_err());
        assert!(!path.exists());
    }
}

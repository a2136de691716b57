use chrono::{Duration, TimeZone, Utc};
use hellodays::config::load_from_dir;
use hellodays::sentence::{self, SentenceError, cache};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn setup(dir: &Path, mode: &str, interval: i64, sentences: &[&str]) {
    let config = serde_json::json!({
        "showDailySentence": true,
        "sentenceUpdateMode": mode,
        "sentenceUpdateInterval": interval,
    });
    fs::write(dir.join("config.json"), config.to_string()).unwrap();
    let pool = serde_json::json!({ "sentences": sentences });
    fs::write(dir.join("sentences.json"), pool.to_string()).unwrap();
}

#[test]
fn test_count_mode_through_config() {
    let dir = tempdir().unwrap();
    setup(dir.path(), "count", 2, &["only"]);
    let config = load_from_dir(dir.path()).unwrap();
    let cache_path = config.sentence_cache_path(dir.path());
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();

    let counts: Vec<i64> = (0..4)
        .map(|_| {
            let s = sentence::daily_sentence_for(dir.path(), &config, false, now).unwrap();
            assert_eq!(s, "only");
            cache::read_cache(&cache_path).unwrap().update_count
        })
        .collect();

    // Miss writes 0, then two uses, then stale at 2 and reset
    assert_eq!(counts, [0, 1, 2, 0]);
}

#[test]
fn test_time_mode_refreshes_after_interval() {
    let dir = tempdir().unwrap();
    setup(dir.path(), "time", 24, &["first"]);
    let config = load_from_dir(dir.path()).unwrap();
    let cache_path = config.sentence_cache_path(dir.path());
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();

    sentence::daily_sentence_for(dir.path(), &config, false, start).unwrap();
    fs::write(
        config.sentences_path(dir.path()),
        r#"{"sentences": ["second"]}"#,
    )
    .unwrap();

    let same_day = start + Duration::hours(23);
    assert_eq!(
        sentence::daily_sentence_for(dir.path(), &config, false, same_day).unwrap(),
        "first"
    );

    let next_day = start + Duration::hours(25);
    assert_eq!(
        sentence::daily_sentence_for(dir.path(), &config, false, next_day).unwrap(),
        "second"
    );
    assert_eq!(cache::read_cache(&cache_path).unwrap().last_update, next_day);
}

#[test]
fn test_missing_pool_is_reported() {
    let dir = tempdir().unwrap();
    setup(dir.path(), "time", 24, &[]);
    let config = load_from_dir(dir.path()).unwrap();
    let now = Utc::now();

    assert_eq!(
        sentence::daily_sentence_for(dir.path(), &config, true, now),
        Err(SentenceError::PoolEmpty)
    );

    fs::remove_file(config.sentences_path(dir.path())).unwrap();
    assert!(matches!(
        sentence::daily_sentence_for(dir.path(), &config, true, now),
        Err(SentenceError::PoolUnreadable(_))
    ));
}

//! Config file to running pipeline.

use std::fs;
use std::time::Duration;

use tempfile::TempDir;
use tokio::time::Instant;

use anagramator::config::Config;
use anagramator::pipeline::QueryPipeline;
use anagramator::tea::Message;
use anagramator::Error;

use crate::fixtures::{kot_reply, results_header, MockSource};

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, body).unwrap();
    path
}

#[tokio::test(start_paused = true)]
async fn test_config_delay_and_guard_reach_pipeline() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "api_url = \"http://localhost:9000/words\"\ndebounce_ms = 50\nstale_guard = true\n",
    );
    let config = Config::load_from(&path).unwrap();

    let source = MockSource::new().reply("kot", Duration::from_millis(10), kot_reply());
    let mut pipeline = QueryPipeline::from_config(&config, source.clone());
    assert!(pipeline.model().stale_guard);

    let start = Instant::now();
    pipeline.dispatch(Message::InputChanged("kot".to_string()));
    pipeline.step().await;
    let settled = start.elapsed();
    assert!(settled >= Duration::from_millis(50));
    assert!(settled < Duration::from_millis(300));

    pipeline.step().await;
    assert!(results_header(&pipeline).is_some());
    assert_eq!(source.calls(), vec!["kot"]);
}

#[tokio::test(start_paused = true)]
async fn test_missing_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config, Config::default());

    let source = MockSource::new().reply("kot", Duration::from_millis(10), kot_reply());
    let mut pipeline = QueryPipeline::from_config(&config, source);
    assert!(!pipeline.model().stale_guard);

    let start = Instant::now();
    pipeline.dispatch(Message::InputChanged("kot".to_string()));
    pipeline.step().await;
    assert!(start.elapsed() >= Duration::from_millis(300));
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    for body in [
        "debounce_ms = 0\n",
        "api_url = \"ftp://example.com\"\n",
        "log_level = \"loud\"\n",
    ] {
        let path = write_config(&dir, body);
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "{}", body);
    }
}

#[test]
fn test_malformed_config_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "debounce_ms = \"soon\"\n");
    assert!(matches!(
        Config::load_from(&path).unwrap_err(),
        Error::TomlParse(_)
    ));
}

#[test]
fn test_saved_config_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let config = Config {
        debounce_ms: Some(120),
        stale_guard: true,
        ..Config::default()
    };
    config.save_to(&path).unwrap();
    assert_eq!(Config::load_from(&path).unwrap(), config);
}

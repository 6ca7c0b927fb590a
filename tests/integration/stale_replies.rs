//! Out-of-order reply tests.
//!
//! A slow lookup for "ko" is overtaken by a fast one for "kot". Without the
//! stale guard the last reply to arrive wins; with it, only the reply for the
//! most recent query may change what is shown.

use std::time::Duration;

use anagramator::pipeline::QueryPipeline;
use anagramator::tea::{Message, UiState};

use crate::fixtures::{kot_reply, pipeline, results_header, words_reply, MockSource};

fn racing_source() -> MockSource {
    MockSource::new()
        .reply(
            "ko",
            Duration::from_millis(500),
            words_reply(&[(2, &["ok"])]),
        )
        .reply("kot", Duration::from_millis(50), kot_reply())
}

/// Type "ko", let it settle, then type "kot" while "ko" is still in flight.
/// Returns after the "kot" reply has been applied.
async fn race(pipeline: &mut QueryPipeline<MockSource>) {
    pipeline.dispatch(Message::InputChanged("ko".to_string()));
    pipeline.step().await; // "ko" issued at 300ms, answers at 800ms
    pipeline.dispatch(Message::InputChanged("kot".to_string()));
    pipeline.step().await; // "kot" issued at 600ms, answers at 650ms
    pipeline.step().await;
    assert_eq!(
        results_header(pipeline).as_deref(),
        Some("Znaleziono 2 słowa")
    );
}

#[tokio::test(start_paused = true)]
async fn test_late_reply_overwrites_without_guard() {
    let source = racing_source();
    let mut pipeline = pipeline(source.clone(), false);

    race(&mut pipeline).await;
    pipeline.step().await;

    assert_eq!(source.calls(), vec!["ko", "kot"]);
    assert_eq!(
        results_header(&pipeline).as_deref(),
        Some("Znaleziono 1 słowo"),
        "Last reply to resolve is displayed"
    );
    assert_eq!(pipeline.model().input, "kot");
}

#[tokio::test(start_paused = true)]
async fn test_late_reply_dropped_with_guard() {
    let source = racing_source();
    let mut pipeline = pipeline(source.clone(), true);

    race(&mut pipeline).await;
    pipeline.step().await;

    assert_eq!(source.calls(), vec!["ko", "kot"]);
    assert_eq!(
        results_header(&pipeline).as_deref(),
        Some("Znaleziono 2 słowa")
    );
    assert!(pipeline.model().snapshot().stale_guard);
}

/// Test: Clear While Loading
/// Given a lookup in flight
/// When the input is cleared
/// Then the guard keeps the description, while without it the reply lands
#[tokio::test(start_paused = true)]
async fn test_reply_after_clear() {
    for (guard, expect_description) in [(true, true), (false, false)] {
        let source = MockSource::new().reply("kot", Duration::from_millis(100), kot_reply());
        let mut pipeline = pipeline(source, guard);

        pipeline.dispatch(Message::InputChanged("kot".to_string()));
        pipeline.step().await;
        assert_eq!(pipeline.model().ui, UiState::Loading);

        pipeline.dispatch(Message::Clear);
        assert_eq!(pipeline.model().ui, UiState::Description);
        pipeline.step().await;

        assert_eq!(
            pipeline.model().ui == UiState::Description,
            expect_description,
            "stale_guard={}",
            guard
        );
        assert_eq!(pipeline.model().input, "");
    }
}

/// The guard still lets the reply for the current query through.
#[tokio::test(start_paused = true)]
async fn test_guard_accepts_reply_for_latest_generation() {
    let source = MockSource::new().reply("kot", Duration::from_millis(10), kot_reply());
    let mut pipeline = pipeline(source, true);

    pipeline.dispatch(Message::InputChanged("kot".to_string()));
    pipeline.step().await;
    let generation = pipeline.model().generation;
    assert_eq!(pipeline.model().accepting, Some(generation));

    pipeline.step().await;
    assert!(results_header(&pipeline).is_some());
}

/// Test: Clear After The Timer Fired But Before It Was Handled
/// Given a settled query whose timer message is still queued
/// When the input is cleared first
/// Then the queued firing is ignored and nothing is looked up
#[tokio::test(start_paused = true)]
async fn test_clear_while_timer_message_is_queued() {
    for guard in [true, false] {
        let source = MockSource::new().reply("kot", Duration::from_millis(10), kot_reply());
        let mut pipeline = pipeline(source.clone(), guard);

        pipeline.dispatch(Message::InputChanged("kot".to_string()));
        tokio::time::sleep(Duration::from_millis(301)).await;
        assert!(!pipeline.query_pending(), "Timer has fired");

        pipeline.dispatch(Message::Clear);
        pipeline.pump(50);
        tokio::time::sleep(Duration::from_secs(1)).await;
        pipeline.pump(50);

        assert_eq!(pipeline.model().input, "", "stale_guard={}", guard);
        assert_eq!(pipeline.model().ui, UiState::Description);
        assert!(source.calls().is_empty());
        assert_eq!(pipeline.requests_issued(), 0);
    }
}

/// A timer queued for "kot" is ignored once the input has moved on to "kota".
#[tokio::test(start_paused = true)]
async fn test_edit_while_timer_message_is_queued() {
    let source = MockSource::new()
        .reply("kot", Duration::from_millis(10), kot_reply())
        .reply("kota", Duration::from_millis(10), words_reply(&[(4, &["kota"])]));
    let mut pipeline = pipeline(source.clone(), true);

    pipeline.dispatch(Message::InputChanged("kot".to_string()));
    tokio::time::sleep(Duration::from_millis(301)).await;
    pipeline.dispatch(Message::InputChanged("kota".to_string()));
    pipeline.pump(50);
    assert_eq!(pipeline.requests_issued(), 0);

    pipeline.step().await;
    pipeline.step().await;
    assert_eq!(source.calls(), vec!["kota"]);
    assert_eq!(
        results_header(&pipeline).as_deref(),
        Some("Znaleziono 1 słowo")
    );
}

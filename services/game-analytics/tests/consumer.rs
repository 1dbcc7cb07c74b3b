//! Stream consumer tests
//!
//! Feed records through an mpsc channel the way a subscription would and
//! check snapshot publishing, end of stream, and mid-stream shutdown.

use std::time::Duration;

use game_analytics::consumer::{run_consumer, ChannelSource, SnapshotPublisher};
use game_analytics::AnalyticsEngine;
use tokio::sync::watch;

fn record(team: &str, points: u32, home: u32, away: u32) -> String {
    serde_json::json!({
        "timestamp": "2025-01-15 19:32:10",
        "game_time": "Q4 01:12",
        "team": team,
        "player": "Player",
        "points": points,
        "score_home": home,
        "score_away": away
    })
    .to_string()
}

#[tokio::test]
async fn test_consumes_until_stream_end() {
    let mut engine = AnalyticsEngine::with_defaults();
    let (publisher, reader) = SnapshotPublisher::for_engine(&engine);
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    let (tx, source) = ChannelSource::channel(16);

    tx.send(record("Lakers", 3, 3, 0)).await.unwrap();
    tx.send("not json".to_string()).await.unwrap();
    tx.send(record("Lakers", 3, 6, 0)).await.unwrap();
    tx.send(record("Warriors", 2, 6, 2)).await.unwrap();
    drop(tx);

    let summary = run_consumer(&mut engine, source, shutdown_rx, &publisher)
        .await
        .unwrap();

    assert_eq!(summary.total_events, 3);
    assert_eq!(summary.validation_failures, 1);
    assert_eq!(summary.alert_count(), 1);
    assert_eq!(summary.final_quarter, Some(4));
    assert!(!engine.is_running());

    let latest = reader.latest();
    assert_eq!(latest.sequence, 4);
    assert_eq!(latest.game_state.score_away, 2);
    assert_eq!(engine.metrics().export()["snapshots_published"], 4);
}

#[tokio::test]
async fn test_shutdown_signal_stops_mid_stream() {
    let mut engine = AnalyticsEngine::with_defaults();
    let (publisher, mut reader) = SnapshotPublisher::for_engine(&engine);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (tx, source) = ChannelSource::channel(16);

    let producer = tokio::spawn(async move {
        tx.send(record("Lakers", 2, 2, 0)).await.unwrap();
        // Wait for the consumer to pick it up, then cancel with the channel still open.
        assert!(reader.changed().await);
        shutdown_tx.send(true).unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        // The subscription is closed; later records are refused.
        tx.send(record("Lakers", 2, 4, 0)).await.is_err()
    });

    let summary = run_consumer(&mut engine, source, shutdown_rx, &publisher)
        .await
        .unwrap();

    assert_eq!(summary.total_events, 1);
    assert_eq!(summary.score_home, 2);
    assert!(producer.await.unwrap(), "channel should be closed after shutdown");
}

#[tokio::test]
async fn test_shutdown_before_any_record() {
    let mut engine = AnalyticsEngine::with_defaults();
    let (publisher, _reader) = SnapshotPublisher::for_engine(&engine);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (_tx, source) = ChannelSource::channel(16);

    shutdown_tx.send(true).unwrap();
    let summary = run_consumer(&mut engine, source, shutdown_rx, &publisher)
        .await
        .unwrap();

    assert_eq!(summary.total_events, 0);
    assert!(engine.summary().is_some());
}

#[tokio::test]
async fn test_reader_polls_on_its_own_cadence() {
    let mut engine = AnalyticsEngine::with_defaults();
    let (publisher, reader) = SnapshotPublisher::for_engine(&engine);
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    let (tx, source) = ChannelSource::channel(64);

    for i in 1..=20u32 {
        tx.send(record("Warriors", 2, 0, i * 2)).await.unwrap();
    }
    drop(tx);

    let held = reader.latest();
    run_consumer(&mut engine, source, shutdown_rx, &publisher)
        .await
        .unwrap();

    // A snapshot taken earlier is never mutated by later processing.
    assert_eq!(held.event_count, 0);
    assert_eq!(reader.latest().event_count, 20);
    assert_eq!(reader.latest().history.len(), 20);
}

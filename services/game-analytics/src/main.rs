use std::io::BufRead;
use std::time::Duration;

use game_analytics::consumer::{run_consumer, ChannelSource, SnapshotPublisher};
use game_analytics::{AnalyticsConfig, AnalyticsEngine};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

/// Interval at which the latest snapshot is reported.
const REPORT_INTERVAL: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        version = game_analytics::SERVICE_VERSION,
        "Starting game analytics consumer"
    );

    let config = AnalyticsConfig::from_env()?;
    let mut engine = AnalyticsEngine::new(config)?;
    let (publisher, reader) = SnapshotPublisher::for_engine(&engine);

    // Each stdin line is one published record. A plain thread, so a pending
    // read never holds up runtime shutdown.
    let (tx, source) = ChannelSource::channel(1024);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Consumer interrupted by user");
            let _ = shutdown_tx.send(true);
        }
    });

    // Independent reader on its own cadence.
    let reporter = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(REPORT_INTERVAL);
        loop {
            ticker.tick().await;
            let latest = reader.latest();
            let state = &latest.game_state;
            let last_play = latest
                .latest_event()
                .map(|event| format!("{} {} +{}", event.game_time, event.player, event.points))
                .unwrap_or_default();
            tracing::info!(
                events = latest.event_count,
                score_home = state.score_home,
                score_away = state.score_away,
                differential = state.differential,
                validation_failures = latest.validation_failures,
                last_play = %last_play,
                "Snapshot"
            );
        }
    });

    let result = run_consumer(&mut engine, source, shutdown_rx, &publisher).await;
    reporter.abort();

    let summary = result?;
    println!("{}", summary);

    Ok(())
}

//! Stream consumer
//!
//! Drives an `AnalyticsEngine` from an ordered record source until the
//! stream ends, a shutdown signal arrives, or the transport fails. Each
//! record is processed to completion before the next is awaited; the
//! await on the source is the only suspension point.
//!
//! Snapshots go out through a `watch` channel so a renderer can poll the
//! latest result on its own timer without ever blocking the consumer.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tracing::{error, info};
use types::errors::{EngineError, TransportError};

use crate::engine::AnalyticsEngine;
use crate::metrics::EngineMetrics;
use crate::snapshot::AnalyticsResult;
use crate::summary::Summary;

/// An ordered source of raw records, e.g. a pub/sub subscription.
#[async_trait]
pub trait EventSource: Send {
    /// Next raw record. `None` means the stream has ended.
    async fn next_record(&mut self) -> Option<Result<String, TransportError>>;

    /// Release the subscription. Called once on every consumer exit path.
    fn close(&mut self) {}
}

/// `EventSource` over an in-process mpsc channel.
pub struct ChannelSource {
    rx: mpsc::Receiver<String>,
}

impl ChannelSource {
    pub fn new(rx: mpsc::Receiver<String>) -> Self {
        Self { rx }
    }

    /// Create a bounded channel and wrap its receiving half.
    pub fn channel(buffer: usize) -> (mpsc::Sender<String>, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        (tx, Self::new(rx))
    }
}

#[async_trait]
impl EventSource for ChannelSource {
    async fn next_record(&mut self) -> Option<Result<String, TransportError>> {
        self.rx.recv().await.map(Ok)
    }

    fn close(&mut self) {
        self.rx.close();
    }
}

/// Write side of the snapshot channel.
pub struct SnapshotPublisher {
    tx: watch::Sender<Arc<AnalyticsResult>>,
    metrics: Arc<EngineMetrics>,
}

impl SnapshotPublisher {
    /// Publisher seeded with the engine's current snapshot.
    pub fn for_engine(engine: &AnalyticsEngine) -> (Self, SnapshotReader) {
        let (tx, rx) = watch::channel(engine.latest_result());
        (
            Self {
                tx,
                metrics: engine.metrics(),
            },
            SnapshotReader { rx },
        )
    }

    /// Replace the published snapshot. Never blocks, even with no readers.
    pub fn publish(&self, result: Arc<AnalyticsResult>) {
        self.tx.send_replace(result);
        self.metrics.record_snapshot_published();
    }
}

/// Read side of the snapshot channel. Cheap to clone.
#[derive(Clone)]
pub struct SnapshotReader {
    rx: watch::Receiver<Arc<AnalyticsResult>>,
}

impl SnapshotReader {
    /// The most recently published snapshot.
    pub fn latest(&self) -> Arc<AnalyticsResult> {
        Arc::clone(&self.rx.borrow())
    }

    /// Wait for a newer snapshot. Returns false once the publisher is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

/// Consume `source` into `engine` until end of stream, shutdown, or failure.
///
/// The engine is always shut down and the source always closed before
/// returning. On a transport failure the summary remains available through
/// `engine.summary()` and the error is returned.
pub async fn run_consumer<S: EventSource>(
    engine: &mut AnalyticsEngine,
    mut source: S,
    mut shutdown: watch::Receiver<bool>,
    publisher: &SnapshotPublisher,
) -> Result<Summary, EngineError> {
    info!(game_id = %engine.game_id(), "Consumer ready, waiting for records");

    let mut shutdown_open = true;
    let outcome: Result<(), EngineError> = loop {
        if *shutdown.borrow() {
            info!(game_id = %engine.game_id(), "Shutdown requested");
            break Ok(());
        }

        tokio::select! {
            biased;

            changed = shutdown.changed(), if shutdown_open => {
                // A dropped sender can never signal again; keep consuming.
                if changed.is_err() {
                    shutdown_open = false;
                }
            }

            next = source.next_record() => match next {
                Some(Ok(raw)) => match engine.process_str(&raw) {
                    Ok(result) => publisher.publish(result),
                    Err(err) => break Err(err),
                },
                Some(Err(err)) => {
                    error!(game_id = %engine.game_id(), error = %err, "Transport failure");
                    break Err(err.into());
                }
                None => {
                    info!(game_id = %engine.game_id(), "Stream ended");
                    break Ok(());
                }
            },
        }
    };

    source.close();
    drop(source);

    let summary = engine.shutdown();
    info!(game_id = %engine.game_id(), "\n{}", summary);

    outcome.map(|()| summary)
}

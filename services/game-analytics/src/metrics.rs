//! Observability counters for the analytics engine
//!
//! Counters are atomics so a monitoring task can read them while the
//! processing path writes. Shared through `Arc<EngineMetrics>`.

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Core metrics for one analytics engine.
pub struct EngineMetrics {
    // Event processing
    pub events_processed: AtomicU64,
    pub validation_failures: AtomicU64,
    pub event_processing_ns: Mutex<LatencyTracker>,

    // Failures by kind (MissingField, InvalidPoints, ...)
    pub failures_by_kind: Mutex<BTreeMap<&'static str, u64>>,

    // Momentum
    pub momentum_alerts: AtomicU64,

    // Snapshot publishing
    pub snapshots_published: AtomicU64,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self {
            events_processed: AtomicU64::new(0),
            validation_failures: AtomicU64::new(0),
            event_processing_ns: Mutex::new(LatencyTracker::new(1000)),
            failures_by_kind: Mutex::new(BTreeMap::new()),
            momentum_alerts: AtomicU64::new(0),
            snapshots_published: AtomicU64::new(0),
        }
    }

    /// Record a validated event applied to state.
    pub fn record_event_processed(&self, latency_ns: u64) {
        self.events_processed.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut tracker) = self.event_processing_ns.lock() {
            tracker.record(latency_ns);
        }
    }

    /// Record a dropped record.
    pub fn record_validation_failure(&self, kind: &'static str) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut by_kind) = self.failures_by_kind.lock() {
            *by_kind.entry(kind).or_insert(0) += 1;
        }
    }

    pub fn record_momentum_alert(&self) {
        self.momentum_alerts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_snapshot_published(&self) {
        self.snapshots_published.fetch_add(1, Ordering::Relaxed);
    }

    /// Failure count for one validation error kind.
    pub fn failures_of_kind(&self, kind: &str) -> u64 {
        self.failures_by_kind
            .lock()
            .map(|by_kind| by_kind.get(kind).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Export metrics as a BTreeMap for Prometheus-style exposition.
    pub fn export(&self) -> BTreeMap<String, u64> {
        let counters = [
            ("events_processed", &self.events_processed),
            ("validation_failures", &self.validation_failures),
            ("momentum_alerts", &self.momentum_alerts),
            ("snapshots_published", &self.snapshots_published),
        ];
        let mut m: BTreeMap<String, u64> = counters
            .into_iter()
            .map(|(name, counter)| (name.to_string(), counter.load(Ordering::Relaxed)))
            .collect();

        if let Ok(by_kind) = self.failures_by_kind.lock() {
            for (kind, count) in by_kind.iter() {
                m.insert(format!("validation_failures.{}", kind), *count);
            }
        }
        if let Ok(tracker) = self.event_processing_ns.lock() {
            if let Some(p99) = tracker.percentile(99) {
                m.insert("event_processing_p99_ns".to_string(), p99);
            }
            if let Some(mean) = tracker.mean() {
                m.insert("event_processing_mean_ns".to_string(), mean);
            }
        }
        m
    }
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Sliding window of per-event processing latencies, in nanoseconds.
///
/// Keeps a running sum so the mean is O(1); percentiles sort a copy of the
/// window on demand.
pub struct LatencyTracker {
    window: VecDeque<u64>,
    limit: usize,
    sum: u128,
}

impl LatencyTracker {
    pub fn new(limit: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(limit),
            limit,
            sum: 0,
        }
    }

    pub fn record(&mut self, latency_ns: u64) {
        if self.limit == 0 {
            return;
        }
        if self.window.len() == self.limit {
            if let Some(dropped) = self.window.pop_front() {
                self.sum -= u128::from(dropped);
            }
        }
        self.window.push_back(latency_ns);
        self.sum += u128::from(latency_ns);
    }

    /// Nearest-rank percentile, `p` clamped to 0..=100.
    pub fn percentile(&self, p: usize) -> Option<u64> {
        if self.window.is_empty() {
            return None;
        }
        let mut sorted: Vec<u64> = self.window.iter().copied().collect();
        sorted.sort_unstable();

        let rank = (p.min(100) * sorted.len()).div_ceil(100).max(1);
        sorted.get(rank - 1).copied()
    }

    /// Mean of the window, rounded down.
    pub fn mean(&self) -> Option<u64> {
        let len = self.window.len() as u128;
        if len == 0 {
            return None;
        }
        u64::try_from(self.sum / len).ok()
    }
}

//! Bounded recent-event history
//!
//! Fixed-capacity ring buffer over the most recent validated events, in
//! arrival order. When full, a push evicts the oldest entry. Events are
//! stored behind `Arc`, so a snapshot shares them with the ring and with
//! earlier snapshots instead of copying them.

use std::collections::VecDeque;
use std::sync::Arc;

use types::event::ScoringEvent;

/// Default number of events retained for display.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Immutable view of the history at one point in time, oldest first.
pub type HistorySnapshot = Arc<[Arc<ScoringEvent>]>;

#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    /// Ring storage, oldest at the front.
    events: VecDeque<Arc<ScoringEvent>>,
    /// Maximum retained events.
    capacity: usize,
    /// Events evicted since creation.
    evicted: u64,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            evicted: 0,
        }
    }

    /// Append an event, evicting the oldest if at capacity.
    pub fn push(&mut self, event: ScoringEvent) {
        if self.capacity == 0 {
            self.evicted += 1;
            return;
        }
        if self.events.len() >= self.capacity {
            self.events.pop_front();
            self.evicted += 1;
        }
        self.events.push_back(Arc::new(event));
    }

    /// Contents as of now. Later pushes never show up in a taken snapshot.
    pub fn snapshot(&self) -> HistorySnapshot {
        self.events.iter().cloned().collect()
    }

    pub fn oldest(&self) -> Option<&ScoringEvent> {
        self.events.front().map(Arc::as_ref)
    }

    pub fn latest(&self) -> Option<&ScoringEvent> {
        self.events.back().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn evicted(&self) -> u64 {
        self.evicted
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

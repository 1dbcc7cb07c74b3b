//! Game Analytics Service
//!
//! Consumes an ordered stream of scoring events for one two-team game and
//! produces:
//! - Running totals, differential, and leader
//! - Scoring-run (momentum) alerts, once per run
//! - A bounded recent-event history for charting
//! - An end-of-game summary
//!
//! # Architecture
//!
//! ```text
//!   Pub/Sub subscription
//!          │
//!     ┌────▼─────┐
//!     │Validator │  ← Schema + team checks; failures are counted, not fatal
//!     └────┬─────┘
//!          │
//!   ┌──────┼─────────────┐
//!   │      │             │
//! ┌─▼───┐ ┌▼────────┐ ┌──▼─────┐
//! │Game │ │Momentum │ │History │
//! │State│ │Tracker  │ │Buffer  │
//! └─┬───┘ └┬────────┘ └──┬─────┘
//!   │      │             │
//! ┌─▼──────▼─────────────▼──┐
//! │  AnalyticsResult (watch) │ → renderer polls on its own timer
//! └────────────┬────────────┘
//!              │ shutdown
//!        ┌─────▼──────┐
//!        │  Summary   │
//!        └────────────┘
//! ```

pub mod config;
pub mod consumer;
pub mod engine;
pub mod game_state;
pub mod history;
pub mod metrics;
pub mod momentum;
pub mod snapshot;
pub mod summary;
pub mod validator;

pub use config::AnalyticsConfig;
pub use engine::{AnalyticsEngine, EngineStatus};
pub use snapshot::{AnalyticsResult, ScoreSeries};
pub use summary::Summary;

// Library version
pub const SERVICE_VERSION: &str = "0.1.0";

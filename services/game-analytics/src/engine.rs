//! Analytics engine
//!
//! Owns all per-game state and runs the per-record pipeline:
//!
//! ```text
//! raw record → Validator → GameState.apply → MomentumTracker.observe → HistoryBuffer.push
//!                  │
//!                  └─ on failure: count + last error, state untouched
//! ```
//!
//! Records are applied strictly one at a time; momentum depends on run
//! order. After each record the engine stores an immutable
//! `Arc<AnalyticsResult>` that readers may hold on to at their own pace.
//!
//! Lifecycle: `Running` → `shutdown()` → `Stopped` (terminal).

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, warn};
use types::errors::{EngineError, ValidationError};
use types::event::ScoringEvent;
use types::ids::GameId;

use crate::config::AnalyticsConfig;
use crate::game_state::GameState;
use crate::history::{HistoryBuffer, HistorySnapshot};
use crate::metrics::EngineMetrics;
use crate::momentum::{AlertRecord, MomentumAlert, MomentumTracker};
use crate::snapshot::{AnalyticsResult, ScoreSeries};
use crate::summary::{GameTimeSpan, Summary, SummaryReporter};
use crate::validator::Validator;

/// Engine lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// Accepting records.
    Running,
    /// Shut down; every further `process` call fails.
    Stopped,
}

/// Streaming analytics for one game.
pub struct AnalyticsEngine {
    game_id: GameId,
    config: AnalyticsConfig,
    validator: Validator,
    game_state: GameState,
    momentum: MomentumTracker,
    history: HistoryBuffer,
    reporter: SummaryReporter,
    span: GameTimeSpan,
    /// Every alert emitted, in order.
    alerts: Vec<AlertRecord>,
    /// Records seen, valid or not.
    records_seen: u64,
    validation_failures: u64,
    last_error: Option<ValidationError>,
    latest: Arc<AnalyticsResult>,
    summary: Option<Summary>,
    status: EngineStatus,
    metrics: Arc<EngineMetrics>,
}

impl AnalyticsEngine {
    /// Create an engine for a new game, validating the configuration.
    pub fn new(config: AnalyticsConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::build(GameId::new(), config))
    }

    /// Create an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::build(GameId::new(), AnalyticsConfig::default())
    }

    fn build(game_id: GameId, config: AnalyticsConfig) -> Self {
        info!(
            game_id = %game_id,
            home = %config.teams.home.name,
            away = %config.teams.away.name,
            momentum_threshold = config.momentum_threshold,
            history_capacity = config.history_capacity,
            "AnalyticsEngine initialized"
        );

        let game_state = GameState::new();
        let momentum = MomentumTracker::new(config.momentum_threshold);
        let latest = Arc::new(AnalyticsResult {
            sequence: 0,
            game_state: game_state.clone(),
            momentum: momentum.state(),
            momentum_alert: None,
            history: HistorySnapshot::from(Vec::new()),
            event_count: 0,
            skipped: false,
            validation_failures: 0,
            last_error: None,
        });

        Self {
            game_id,
            validator: Validator::new(config.teams.clone()),
            reporter: SummaryReporter::new(config.teams.clone()),
            history: HistoryBuffer::new(config.history_capacity),
            game_state,
            momentum,
            span: GameTimeSpan::default(),
            alerts: Vec::new(),
            records_seen: 0,
            validation_failures: 0,
            last_error: None,
            latest,
            summary: None,
            status: EngineStatus::Running,
            metrics: Arc::new(EngineMetrics::new()),
            config,
        }
    }

    /// Process one decoded record.
    pub fn process(&mut self, raw: &Value) -> Result<Arc<AnalyticsResult>, EngineError> {
        self.ensure_running()?;
        let validated = self.validator.validate(raw);
        Ok(self.apply(validated))
    }

    /// Process one JSON payload as delivered by the transport.
    pub fn process_str(&mut self, raw: &str) -> Result<Arc<AnalyticsResult>, EngineError> {
        self.ensure_running()?;
        let validated = self.validator.validate_str(raw);
        Ok(self.apply(validated))
    }

    fn ensure_running(&self) -> Result<(), EngineError> {
        match self.status {
            EngineStatus::Running => Ok(()),
            EngineStatus::Stopped => Err(EngineError::TerminalState),
        }
    }

    fn apply(&mut self, validated: Result<ScoringEvent, ValidationError>) -> Arc<AnalyticsResult> {
        let started = Instant::now();
        self.records_seen += 1;

        let result = match validated.and_then(|event| self.check_non_decreasing(event)) {
            Ok(event) => self.apply_event(event, started),
            Err(err) => self.record_failure(err),
        };

        self.latest = Arc::new(result);
        Arc::clone(&self.latest)
    }

    /// Cumulative totals may never go backwards.
    fn check_non_decreasing(&self, event: ScoringEvent) -> Result<ScoringEvent, ValidationError> {
        let checks = [
            ("score_home", self.game_state.score_home, event.score_home),
            ("score_away", self.game_state.score_away, event.score_away),
        ];
        for (field, previous, received) in checks {
            if received < previous {
                return Err(ValidationError::ScoreRegression {
                    field,
                    previous,
                    received,
                });
            }
        }
        Ok(event)
    }

    fn apply_event(&mut self, event: ScoringEvent, started: Instant) -> AnalyticsResult {
        self.game_state.apply(&event);

        let momentum_alert = self.momentum.observe(event.side, event.points.as_u32());
        if let Some(alert) = momentum_alert {
            self.alerts.push(AlertRecord {
                alert,
                game_time: event.game_time.clone(),
                event_number: self.game_state.event_count,
            });
            self.metrics.record_momentum_alert();
        }

        self.span.observe(&event);

        debug!(
            game_id = %self.game_id,
            event_number = self.game_state.event_count,
            game_time = %event.game_time,
            team = %event.team,
            player = %event.player,
            points = event.points.value(),
            score_home = event.score_home,
            score_away = event.score_away,
            differential = self.game_state.differential,
            "Event applied"
        );

        self.history.push(event);
        self.metrics
            .record_event_processed(started.elapsed().as_nanos() as u64);

        self.result(momentum_alert, self.history.snapshot(), false)
    }

    fn record_failure(&mut self, err: ValidationError) -> AnalyticsResult {
        self.validation_failures += 1;
        self.metrics.record_validation_failure(err.kind());
        warn!(
            game_id = %self.game_id,
            record = self.records_seen,
            kind = err.kind(),
            error = %err,
            "Dropping invalid record"
        );
        self.last_error = Some(err);

        // History is untouched, so the previous snapshot's view still holds.
        let history = Arc::clone(&self.latest.history);
        self.result(None, history, true)
    }

    fn result(
        &self,
        momentum_alert: Option<MomentumAlert>,
        history: HistorySnapshot,
        skipped: bool,
    ) -> AnalyticsResult {
        AnalyticsResult {
            sequence: self.records_seen,
            game_state: self.game_state.clone(),
            momentum: self.momentum.state(),
            momentum_alert,
            history,
            event_count: self.game_state.event_count,
            skipped,
            validation_failures: self.validation_failures,
            last_error: self.last_error.clone(),
        }
    }

    /// Stop accepting records and produce the final summary.
    ///
    /// Calling again returns the summary computed by the first call.
    pub fn shutdown(&mut self) -> Summary {
        if let Some(summary) = &self.summary {
            return summary.clone();
        }

        self.status = EngineStatus::Stopped;
        let summary = self.reporter.summarize(
            &self.game_state,
            &self.alerts,
            &self.history,
            &self.span,
            self.validation_failures,
        );

        info!(
            game_id = %self.game_id,
            score_home = summary.score_home,
            score_away = summary.score_away,
            total_events = summary.total_events,
            validation_failures = summary.validation_failures,
            momentum_alerts = summary.alert_count(),
            history_retained = self.history.len(),
            history_evicted = self.history.evicted(),
            "AnalyticsEngine stopped"
        );

        self.summary = Some(summary.clone());
        summary
    }

    /// Snapshot after the most recent record.
    pub fn latest_result(&self) -> Arc<AnalyticsResult> {
        Arc::clone(&self.latest)
    }

    /// Final summary, once stopped.
    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    /// Chart columns for the current history.
    pub fn score_series(&self) -> ScoreSeries {
        ScoreSeries::from_result(&self.latest, &self.config.teams)
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == EngineStatus::Running
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    pub fn alerts(&self) -> &[AlertRecord] {
        &self.alerts
    }

    pub fn metrics(&self) -> Arc<EngineMetrics> {
        Arc::clone(&self.metrics)
    }
}

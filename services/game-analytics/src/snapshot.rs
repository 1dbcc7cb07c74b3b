//! Read-side snapshots
//!
//! `AnalyticsResult` is the immutable, point-in-time view handed to readers
//! after each processed record. `ScoreSeries` reshapes it into the parallel
//! columns a score chart plots.

use serde::{Deserialize, Serialize};
use types::errors::ValidationError;
use types::event::ScoringEvent;
use types::team::{TeamConfig, TeamSide};

use crate::game_state::GameState;
use crate::history::HistorySnapshot;
use crate::momentum::{MomentumAlert, MomentumState};

/// Derived view of the engine after one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsResult {
    /// Records seen so far, valid or not.
    pub sequence: u64,
    pub game_state: GameState,
    pub momentum: MomentumState,
    /// Present only on the record whose run crossed the threshold.
    pub momentum_alert: Option<MomentumAlert>,
    /// Recent events, oldest first.
    pub history: HistorySnapshot,
    /// Validated events applied.
    pub event_count: u64,
    /// True when the record was rejected and state left unchanged.
    pub skipped: bool,
    pub validation_failures: u64,
    pub last_error: Option<ValidationError>,
}

impl AnalyticsResult {
    /// Most recent validated event still in the history.
    pub fn latest_event(&self) -> Option<&ScoringEvent> {
        self.history.last().map(|event| event.as_ref())
    }
}

/// Chart-ready score progression over the retained history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSeries {
    pub home_team: String,
    pub away_team: String,
    pub game_times: Vec<String>,
    pub home_scores: Vec<u32>,
    pub away_scores: Vec<u32>,
    pub current_home_score: u32,
    pub current_away_score: u32,
}

impl ScoreSeries {
    pub fn from_result(result: &AnalyticsResult, teams: &TeamConfig) -> Self {
        let len = result.history.len();
        let mut game_times = Vec::with_capacity(len);
        let mut home_scores = Vec::with_capacity(len);
        let mut away_scores = Vec::with_capacity(len);

        for event in result.history.iter() {
            game_times.push(event.game_time.clone());
            home_scores.push(event.score_home);
            away_scores.push(event.score_away);
        }

        Self {
            home_team: teams.name(TeamSide::Home).to_string(),
            away_team: teams.name(TeamSide::Away).to_string(),
            game_times,
            home_scores,
            away_scores,
            current_home_score: result.game_state.score_home,
            current_away_score: result.game_state.score_away,
        }
    }
}

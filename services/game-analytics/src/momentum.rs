//! Momentum (scoring run) detection
//!
//! A run is a maximal sequence of consecutive scoring plays by one team,
//! measured in points. Alerts are edge-triggered: a run produces at most one
//! alert, at the play where its total first reaches the threshold. Any score
//! by the other team ends the run and re-arms the alert.

use serde::{Deserialize, Serialize};
use tracing::info;
use types::team::TeamSide;

/// Default run length, in points, that counts as a momentum swing.
pub const DEFAULT_MOMENTUM_THRESHOLD: u32 = 6;

/// Emitted once when a run first reaches the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentumAlert {
    pub team: TeamSide,
    /// Run length in points at the moment of crossing.
    pub streak: u32,
}

/// An alert together with where in the game it fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub alert: MomentumAlert,
    pub game_time: String,
    /// 1-based index of the validated event that triggered the alert.
    pub event_number: u64,
}

/// Snapshot of the tracker's run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentumState {
    pub last_scoring_team: Option<TeamSide>,
    pub current_streak: u32,
    pub threshold: u32,
    pub alerted_this_run: bool,
}

/// Tracks the current scoring run.
#[derive(Debug, Clone)]
pub struct MomentumTracker {
    state: MomentumState,
}

impl MomentumTracker {
    pub fn new(threshold: u32) -> Self {
        Self {
            state: MomentumState {
                last_scoring_team: None,
                current_streak: 0,
                threshold,
                alerted_this_run: false,
            },
        }
    }

    /// Feed one scoring play. Returns an alert only on the threshold edge.
    pub fn observe(&mut self, team: TeamSide, points: u32) -> Option<MomentumAlert> {
        let state = &mut self.state;

        if state.last_scoring_team == Some(team) {
            state.current_streak = state.current_streak.saturating_add(points);
        } else {
            state.last_scoring_team = Some(team);
            state.current_streak = points;
            state.alerted_this_run = false;
        }

        if state.current_streak >= state.threshold && !state.alerted_this_run {
            state.alerted_this_run = true;
            info!(
                team = %team,
                streak = state.current_streak,
                threshold = state.threshold,
                "Momentum shift detected"
            );
            return Some(MomentumAlert {
                team,
                streak: state.current_streak,
            });
        }

        None
    }

    pub fn state(&self) -> MomentumState {
        self.state
    }
}

impl Default for MomentumTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MOMENTUM_THRESHOLD)
    }
}

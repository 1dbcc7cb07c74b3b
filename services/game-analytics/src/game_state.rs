//! Cumulative game state
//!
//! Mirrors the authoritative totals carried by the latest validated event.
//! Scores are copied from the event, never re-summed from points, so a
//! dropped record upstream cannot cause drift.

use serde::{Deserialize, Serialize};
use types::event::ScoringEvent;
use types::team::{Leader, TeamSide};

/// Running score, lead, and event counts for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub score_home: u32,
    pub score_away: u32,
    /// Home minus away.
    pub differential: i64,
    pub leader: Leader,
    /// Validated events applied.
    pub event_count: u64,
    /// Scoring plays credited to the home team.
    pub events_home: u64,
    /// Scoring plays credited to the away team.
    pub events_away: u64,
}

impl GameState {
    /// State at tip-off: 0-0, tied.
    pub fn new() -> Self {
        Self {
            score_home: 0,
            score_away: 0,
            differential: 0,
            leader: Leader::Tied,
            event_count: 0,
            events_home: 0,
            events_away: 0,
        }
    }

    /// Apply a validated event.
    pub fn apply(&mut self, event: &ScoringEvent) {
        self.score_home = event.score_home;
        self.score_away = event.score_away;
        self.differential = event.differential();
        self.leader = Leader::from_scores(self.score_home, self.score_away);
        self.event_count += 1;
        match event.side {
            TeamSide::Home => self.events_home += 1,
            TeamSide::Away => self.events_away += 1,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

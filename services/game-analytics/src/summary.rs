//! End-of-game summary
//!
//! Derived once at shutdown from frozen engine state. Pure: the same inputs
//! always produce the same summary.

use std::fmt;

use serde::{Deserialize, Serialize};
use types::event::{GameClock, ScoringEvent};
use types::team::{Leader, TeamConfig, TeamSide};

use crate::game_state::GameState;
use crate::history::HistoryBuffer;
use crate::momentum::AlertRecord;

/// First and last game-time values observed across the whole stream.
///
/// Tracked outside the history so eviction cannot lose the opening play.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTimeSpan {
    pub first: Option<String>,
    pub last: Option<String>,
    /// Parsed clock of the last play, when its game time is well-formed.
    pub last_clock: Option<GameClock>,
}

impl GameTimeSpan {
    pub fn observe(&mut self, event: &ScoringEvent) {
        if self.first.is_none() {
            self.first = Some(event.game_time.clone());
        }
        self.last = Some(event.game_time.clone());
        self.last_clock = event.clock();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub home_team: String,
    pub away_team: String,
    pub score_home: u32,
    pub score_away: u32,
    pub differential: i64,
    pub leader: Leader,
    pub events_home: u64,
    pub events_away: u64,
    pub total_events: u64,
    pub validation_failures: u64,
    pub momentum_alerts: Vec<AlertRecord>,
    pub game_time_span: GameTimeSpan,
    /// Quarter of the last play, when its game time parses.
    pub final_quarter: Option<u8>,
    /// The last play came after regulation.
    pub overtime: bool,
}

impl Summary {
    pub fn alert_count(&self) -> usize {
        self.momentum_alerts.len()
    }

    pub fn leader_name(&self) -> Option<&str> {
        match self.leader {
            Leader::Home => Some(self.home_team.as_str()),
            Leader::Away => Some(self.away_team.as_str()),
            Leader::Tied => None,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        writeln!(f, "{}", rule)?;
        writeln!(f, "GAME SUMMARY")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "{}: {} ({} scores)", self.home_team, self.score_home, self.events_home)?;
        writeln!(f, "{}: {} ({} scores)", self.away_team, self.score_away, self.events_away)?;
        match self.leader_name() {
            Some(name) => writeln!(
                f,
                "Leader: {} by {} points",
                name,
                self.differential.unsigned_abs()
            )?,
            None => writeln!(f, "Leader: tied")?,
        }
        writeln!(f, "Total events processed: {}", self.total_events)?;
        writeln!(f, "Validation failures: {}", self.validation_failures)?;
        if let (Some(first), Some(last)) = (&self.game_time_span.first, &self.game_time_span.last) {
            writeln!(f, "Game time: {} to {}", first, last)?;
        }
        if let Some(quarter) = self.final_quarter {
            if self.overtime {
                writeln!(f, "Final period: OT{}", quarter - 4)?;
            } else {
                writeln!(f, "Final period: Q{}", quarter)?;
            }
        }
        writeln!(f, "Momentum alerts: {}", self.momentum_alerts.len())?;
        for record in &self.momentum_alerts {
            writeln!(
                f,
                "  #{} {} {} run of {} points",
                record.event_number, record.game_time, record.alert.team, record.alert.streak
            )?;
        }
        write!(f, "{}", rule)
    }
}

/// Builds the summary from frozen engine state.
#[derive(Debug, Clone)]
pub struct SummaryReporter {
    teams: TeamConfig,
}

impl SummaryReporter {
    pub fn new(teams: TeamConfig) -> Self {
        Self { teams }
    }

    pub fn summarize(
        &self,
        game_state: &GameState,
        momentum_history: &[AlertRecord],
        history: &HistoryBuffer,
        span: &GameTimeSpan,
        validation_failures: u64,
    ) -> Summary {
        let mut game_time_span = span.clone();
        if game_time_span.first.is_none() {
            game_time_span.first = history.oldest().map(|e| e.game_time.clone());
        }
        if game_time_span.last.is_none() {
            if let Some(latest) = history.latest() {
                game_time_span.last = Some(latest.game_time.clone());
                game_time_span.last_clock = latest.clock();
            }
        }

        let final_clock = game_time_span.last_clock;

        Summary {
            home_team: self.teams.name(TeamSide::Home).to_string(),
            away_team: self.teams.name(TeamSide::Away).to_string(),
            score_home: game_state.score_home,
            score_away: game_state.score_away,
            differential: game_state.differential,
            leader: game_state.leader,
            events_home: game_state.events_home,
            events_away: game_state.events_away,
            total_events: game_state.event_count,
            validation_failures,
            momentum_alerts: momentum_history.to_vec(),
            game_time_span,
            final_quarter: final_clock.map(|clock| clock.quarter),
            overtime: final_clock.is_some_and(|clock| clock.is_overtime()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::momentum::MomentumAlert;
    use types::event::Points;

    fn event(side: TeamSide, game_time: &str, home: u32, away: u32) -> ScoringEvent {
        ScoringEvent {
            timestamp: "2025-01-15 19:32:10".to_string(),
            game_time: game_time.to_string(),
            team: side.as_str().to_string(),
            side,
            player: "Player".to_string(),
            points: Points::THREE,
            score_home: home,
            score_away: away,
        }
    }

    fn fixture() -> (GameState, Vec<AlertRecord>, HistoryBuffer, GameTimeSpan) {
        let mut state = GameState::new();
        let mut history = HistoryBuffer::new(2);
        let mut span = GameTimeSpan::default();
        for e in [
            event(TeamSide::Home, "Q1 11:40", 3, 0),
            event(TeamSide::Home, "Q1 11:05", 6, 0),
            event(TeamSide::Away, "Q2 09:12", 6, 3),
        ] {
            state.apply(&e);
            span.observe(&e);
            history.push(e);
        }
        let alerts = vec![AlertRecord {
            alert: MomentumAlert {
                team: TeamSide::Home,
                streak: 6,
            },
            game_time: "Q1 11:05".to_string(),
            event_number: 2,
        }];
        (state, alerts, history, span)
    }

    #[test]
    fn test_summarize() {
        let (state, alerts, history, span) = fixture();
        let reporter = SummaryReporter::new(TeamConfig::default());
        let summary = reporter.summarize(&state, &alerts, &history, &span, 4);

        assert_eq!(summary.score_home, 6);
        assert_eq!(summary.score_away, 3);
        assert_eq!(summary.leader, Leader::Home);
        assert_eq!(summary.total_events, 3);
        assert_eq!(summary.validation_failures, 4);
        assert_eq!(summary.alert_count(), 1);
        // First play was evicted from history but the span still has it.
        assert_eq!(summary.game_time_span.first.as_deref(), Some("Q1 11:40"));
        assert_eq!(summary.game_time_span.last.as_deref(), Some("Q2 09:12"));
        assert_eq!(summary.final_quarter, Some(2));
        assert_eq!(summary.leader_name(), Some("Lakers"));
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let (state, alerts, history, span) = fixture();
        let reporter = SummaryReporter::new(TeamConfig::default());
        let first = reporter.summarize(&state, &alerts, &history, &span, 0);
        let second = reporter.summarize(&state, &alerts, &history, &span, 0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_game_summary() {
        let reporter = SummaryReporter::new(TeamConfig::default());
        let summary = reporter.summarize(
            &GameState::new(),
            &[],
            &HistoryBuffer::default(),
            &GameTimeSpan::default(),
            0,
        );
        assert_eq!(summary.leader, Leader::Tied);
        assert_eq!(summary.game_time_span, GameTimeSpan::default());
        assert_eq!(summary.final_quarter, None);
        assert!(summary.to_string().contains("Leader: tied"));
    }

    #[test]
    fn test_display_lists_alerts() {
        let (state, alerts, history, span) = fixture();
        let reporter = SummaryReporter::new(TeamConfig::default());
        let text = reporter.summarize(&state, &alerts, &history, &span, 0).to_string();

        assert!(text.contains("GAME SUMMARY"));
        assert!(text.contains("Lakers: 6 (2 scores)"));
        assert!(text.contains("Warriors: 3 (1 scores)"));
        assert!(text.contains("Leader: Lakers by 3 points"));
        assert!(text.contains("#2 Q1 11:05 home run of 6 points"));
        assert!(text.contains("Game time: Q1 11:40 to Q2 09:12"));
        assert!(text.contains("Final period: Q2"));
    }

    #[test]
    fn test_overtime_final_period() {
        let mut state = GameState::new();
        let mut history = HistoryBuffer::new(5);
        let mut span = GameTimeSpan::default();
        for e in [
            event(TeamSide::Home, "Q4 00:03", 98, 98),
            event(TeamSide::Away, "Q5 02:10", 98, 101),
        ] {
            state.apply(&e);
            span.observe(&e);
            history.push(e);
        }

        let reporter = SummaryReporter::new(TeamConfig::default());
        let summary = reporter.summarize(&state, &[], &history, &span, 0);

        assert_eq!(summary.final_quarter, Some(5));
        assert!(summary.overtime);
        assert!(summary.to_string().contains("Final period: OT1"));
    }

    #[test]
    fn test_unparsable_game_time_has_no_final_period() {
        let mut span = GameTimeSpan::default();
        let e = event(TeamSide::Home, "second half", 3, 0);
        span.observe(&e);
        assert_eq!(span.last.as_deref(), Some("second half"));
        assert_eq!(span.last_clock, None);

        let summary = SummaryReporter::new(TeamConfig::default()).summarize(
            &GameState::new(),
            &[],
            &HistoryBuffer::default(),
            &span,
            0,
        );
        assert_eq!(summary.final_quarter, None);
        assert!(!summary.overtime);
        assert!(!summary.to_string().contains("Final period"));
    }
}

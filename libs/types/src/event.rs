//! Scoring event types
//!
//! A `ScoringEvent` is one basket attributed to one team. Once validated it
//! is immutable; the cumulative scores it carries are authoritative.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ClockParseError;
use crate::team::TeamSide;

/// Points awarded for a single scoring play.
///
/// Only field goals are modelled: a value is always 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Points(u8);

impl Points {
    pub const TWO: Points = Points(2);
    pub const THREE: Points = Points(3);

    /// Create from a raw value, returning `None` unless it is 2 or 3.
    pub fn try_new(value: u8) -> Option<Self> {
        match value {
            2 | 3 => Some(Self(value)),
            _ => None,
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn as_u32(&self) -> u32 {
        u32::from(self.0)
    }
}

impl TryFrom<u8> for Points {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Points::try_new(value).ok_or_else(|| format!("points must be 2 or 3, got {}", value))
    }
}

impl From<Points> for u8 {
    fn from(points: Points) -> u8 {
        points.0
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structured view of a `"Q# MM:SS"` game-time string.
///
/// Quarters above 4 are overtime periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameClock {
    pub quarter: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl GameClock {
    pub fn is_overtime(&self) -> bool {
        self.quarter > 4
    }
}

impl FromStr for GameClock {
    type Err = ClockParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ClockParseError::Malformed(s.to_string());

        let (quarter, clock) = s.trim().split_once(' ').ok_or_else(malformed)?;
        let quarter = quarter
            .strip_prefix('Q')
            .and_then(|q| q.parse::<u8>().ok())
            .filter(|q| *q >= 1)
            .ok_or_else(malformed)?;

        let (minutes, seconds) = clock.split_once(':').ok_or_else(malformed)?;
        let minutes = minutes.parse::<u8>().map_err(|_| malformed())?;
        let seconds = seconds.parse::<u8>().map_err(|_| malformed())?;
        if seconds >= 60 {
            return Err(ClockParseError::SecondsOutOfRange(seconds));
        }

        Ok(Self {
            quarter,
            minutes,
            seconds,
        })
    }
}

impl fmt::Display for GameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{} {:02}:{:02}", self.quarter, self.minutes, self.seconds)
    }
}

/// A validated scoring play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringEvent {
    /// Wall-clock time of the play as sent by the producer.
    pub timestamp: String,
    /// Quarter and clock, e.g. `"Q2 08:45"`.
    pub game_time: String,
    /// Team identifier exactly as received.
    pub team: String,
    /// Side the team identifier resolved to.
    pub side: TeamSide,
    pub player: String,
    pub points: Points,
    /// Cumulative home score as of this play.
    pub score_home: u32,
    /// Cumulative away score as of this play.
    pub score_away: u32,
}

impl ScoringEvent {
    /// Parse `game_time` into a structured clock, if well-formed.
    pub fn clock(&self) -> Option<GameClock> {
        self.game_time.parse().ok()
    }

    /// Home minus away as of this play.
    pub fn differential(&self) -> i64 {
        i64::from(self.score_home) - i64::from(self.score_away)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> ScoringEvent {
        ScoringEvent {
            timestamp: "2025-01-15 19:32:10".to_string(),
            game_time: "Q2 08:45".to_string(),
            team: "Lakers".to_string(),
            side: TeamSide::Home,
            player: "LeBron James".to_string(),
            points: Points::THREE,
            score_home: 41,
            score_away: 38,
        }
    }

    #[test]
    fn test_points_try_new() {
        assert_eq!(Points::try_new(2), Some(Points::TWO));
        assert_eq!(Points::try_new(3), Some(Points::THREE));
        assert!(Points::try_new(0).is_none());
        assert!(Points::try_new(1).is_none());
        assert!(Points::try_new(4).is_none());
    }

    #[test]
    fn test_points_deserialize_rejects_free_throw() {
        assert!(serde_json::from_str::<Points>("1").is_err());
        assert_eq!(serde_json::from_str::<Points>("2").unwrap(), Points::TWO);
    }

    #[test]
    fn test_clock_parse() {
        let clock: GameClock = "Q2 08:45".parse().unwrap();
        assert_eq!(
            clock,
            GameClock {
                quarter: 2,
                minutes: 8,
                seconds: 45
            }
        );
        assert_eq!(clock.to_string(), "Q2 08:45");
        assert!(!clock.is_overtime());
    }

    #[test]
    fn test_clock_parse_overtime() {
        let clock: GameClock = "Q5 4:59".parse().unwrap();
        assert!(clock.is_overtime());
    }

    #[test]
    fn test_clock_parse_rejects_garbage() {
        assert!(matches!(
            "second quarter".parse::<GameClock>(),
            Err(ClockParseError::Malformed(_))
        ));
        assert!("Q0 10:00".parse::<GameClock>().is_err());
        assert!("Q1 10-00".parse::<GameClock>().is_err());
        assert_eq!(
            "Q1 10:75".parse::<GameClock>(),
            Err(ClockParseError::SecondsOutOfRange(75))
        );
    }

    #[test]
    fn test_event_helpers() {
        let event = sample_event();
        assert_eq!(event.differential(), 3);
        assert_eq!(event.clock().unwrap().quarter, 2);
    }

    #[test]
    fn test_event_serialization_roundtrip() {
        let event = sample_event();
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"side\":\"home\""));
        assert!(json.contains("\"points\":3"));
        let deserialized: ScoringEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}

//! Team types
//!
//! A game is always contested by exactly two teams. Events name a team by
//! its configured identifier; internally everything is keyed by `TeamSide`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two teams an event or streak belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    /// Home team
    Home,
    /// Away team
    Away,
}

impl TeamSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamSide::Home => "home",
            TeamSide::Away => "away",
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current leader of the game. A tie is its own state, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leader {
    Home,
    Away,
    Tied,
}

impl Leader {
    /// Derive the leader from cumulative scores.
    pub fn from_scores(score_home: u32, score_away: u32) -> Self {
        match score_home.cmp(&score_away) {
            std::cmp::Ordering::Greater => Leader::Home,
            std::cmp::Ordering::Less => Leader::Away,
            std::cmp::Ordering::Equal => Leader::Tied,
        }
    }
}

/// One team of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    /// Identifier carried in the `team` field of scoring events.
    pub name: String,
}

impl TeamInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The two teams of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamConfig {
    pub home: TeamInfo,
    pub away: TeamInfo,
}

impl TeamConfig {
    pub fn new(home: TeamInfo, away: TeamInfo) -> Self {
        Self { home, away }
    }

    /// Resolve an event's team identifier to a side.
    ///
    /// Matching is exact; `"lakers"` does not match a team named `"Lakers"`.
    pub fn side_of(&self, team: &str) -> Option<TeamSide> {
        if team == self.home.name {
            Some(TeamSide::Home)
        } else if team == self.away.name {
            Some(TeamSide::Away)
        } else {
            None
        }
    }

    pub fn team(&self, side: TeamSide) -> &TeamInfo {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn name(&self, side: TeamSide) -> &str {
        &self.team(side).name
    }
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self::new(TeamInfo::new("Lakers"), TeamInfo::new("Warriors"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leader_from_scores() {
        assert_eq!(Leader::from_scores(7, 2), Leader::Home);
        assert_eq!(Leader::from_scores(2, 7), Leader::Away);
        assert_eq!(Leader::from_scores(0, 0), Leader::Tied);
    }

    #[test]
    fn test_side_of_is_exact() {
        let teams = TeamConfig::default();
        assert_eq!(teams.side_of("Lakers"), Some(TeamSide::Home));
        assert_eq!(teams.side_of("Warriors"), Some(TeamSide::Away));
        assert_eq!(teams.side_of("lakers"), None);
        assert_eq!(teams.side_of("Celtics"), None);
    }

    #[test]
    fn test_default_teams() {
        let teams = TeamConfig::default();
        assert_eq!(teams.name(TeamSide::Home), "Lakers");
        assert_eq!(teams.name(TeamSide::Away), "Warriors");
    }

    #[test]
    fn test_side_serialization() {
        let json = serde_json::to_string(&TeamSide::Home).unwrap();
        assert_eq!(json, "\"home\"");
        let leader: Leader = serde_json::from_str("\"tied\"").unwrap();
        assert_eq!(leader, Leader::Tied);
    }

    #[test]
    fn test_team_config_from_json() {
        let teams: TeamConfig = serde_json::from_str(
            r#"{"home":{"name":"Celtics"},"away":{"name":"Knicks"}}"#,
        )
        .unwrap();
        assert_eq!(teams.side_of("Knicks"), Some(TeamSide::Away));
    }
}

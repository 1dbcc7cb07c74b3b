//! Analytics configuration
//!
//! Supplied to the engine at construction. Defaults match a standard
//! broadcast setup: run alerts at 6 points, 50 events of history.

use serde::{Deserialize, Serialize};
use types::errors::ConfigError;
use types::team::{TeamConfig, TeamInfo};

use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::momentum::DEFAULT_MOMENTUM_THRESHOLD;

pub const ENV_HOME_TEAM: &str = "GAME_HOME_TEAM";
pub const ENV_AWAY_TEAM: &str = "GAME_AWAY_TEAM";
pub const ENV_MOMENTUM_THRESHOLD: &str = "GAME_MOMENTUM_THRESHOLD";
pub const ENV_HISTORY_CAPACITY: &str = "GAME_HISTORY_CAPACITY";

/// Configuration for one analytics engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub teams: TeamConfig,
    /// Run length in points that triggers a momentum alert.
    pub momentum_threshold: u32,
    /// Maximum events kept in the recent history.
    pub history_capacity: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            teams: TeamConfig::default(),
            momentum_threshold: DEFAULT_MOMENTUM_THRESHOLD,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl AnalyticsConfig {
    /// Parse from JSON. Omitted keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `GAME_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `GAME_*` key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(home) = lookup(ENV_HOME_TEAM) {
            config.teams.home = TeamInfo::new(home);
        }
        if let Some(away) = lookup(ENV_AWAY_TEAM) {
            config.teams.away = TeamInfo::new(away);
        }
        if let Some(raw) = lookup(ENV_MOMENTUM_THRESHOLD) {
            config.momentum_threshold = parse_env(ENV_MOMENTUM_THRESHOLD, &raw)?;
        }
        if let Some(raw) = lookup(ENV_HISTORY_CAPACITY) {
            config.history_capacity = parse_env(ENV_HISTORY_CAPACITY, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }
        if self.momentum_threshold == 0 {
            return Err(ConfigError::ZeroMomentumThreshold);
        }
        if self.teams.home.name.trim().is_empty() || self.teams.away.name.trim().is_empty() {
            return Err(ConfigError::EmptyTeamName);
        }
        if self.teams.home.name == self.teams.away.name {
            return Err(ConfigError::DuplicateTeam(self.teams.home.name.clone()));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidEnvValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

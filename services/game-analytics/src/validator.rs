//! Record validation for the analytics pipeline
//!
//! Checks a raw record against the scoring-event schema and the configured
//! teams. Stateless: the result depends only on the record and the team
//! configuration, so the same record always validates the same way.
//!
//! Checks run in a fixed order and the first failure wins:
//! 1. Required fields present
//! 2. Primitive types correct
//! 3. Points are 2 or 3
//! 4. Team is one of the two configured identifiers
//! 5. Scores are non-negative and fit the score range

use serde_json::{Map, Value};
use types::event::{Points, ScoringEvent};
use types::team::TeamConfig;
use types::errors::ValidationError;

/// Fields every scoring record must carry.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "timestamp",
    "game_time",
    "team",
    "player",
    "points",
    "score_home",
    "score_away",
];

/// Validates raw records into `ScoringEvent`s.
#[derive(Debug, Clone)]
pub struct Validator {
    teams: TeamConfig,
}

impl Validator {
    pub fn new(teams: TeamConfig) -> Self {
        Self { teams }
    }

    /// Decode a JSON payload and validate it.
    pub fn validate_str(&self, raw: &str) -> Result<ScoringEvent, ValidationError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| ValidationError::MalformedRecord(format!("invalid JSON: {}", e)))?;
        self.validate(&value)
    }

    /// Validate an already-decoded record.
    pub fn validate(&self, raw: &Value) -> Result<ScoringEvent, ValidationError> {
        let record = raw.as_object().ok_or_else(|| {
            ValidationError::MalformedRecord("expected a JSON object".to_string())
        })?;

        if let Some(missing) = REQUIRED_FIELDS
            .iter()
            .find(|field| !record.contains_key(**field))
        {
            return Err(ValidationError::MissingField(*missing));
        }

        let timestamp = string_field(record, "timestamp")?;
        let game_time = string_field(record, "game_time")?;
        let team = string_field(record, "team")?;
        let player = string_field(record, "player")?;
        let points = integer_field(record, "points")?;
        let score_home = integer_field(record, "score_home")?;
        let score_away = integer_field(record, "score_away")?;

        let points = u8::try_from(points)
            .ok()
            .and_then(Points::try_new)
            .ok_or(ValidationError::InvalidPoints(points))?;

        let side = self
            .teams
            .side_of(team)
            .ok_or_else(|| ValidationError::UnknownTeam(team.to_string()))?;

        let score_home = score_value("score_home", score_home)?;
        let score_away = score_value("score_away", score_away)?;

        Ok(ScoringEvent {
            timestamp: timestamp.to_string(),
            game_time: game_time.to_string(),
            team: team.to_string(),
            side,
            player: player.to_string(),
            points,
            score_home,
            score_away,
        })
    }
}

fn string_field<'a>(
    record: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    record
        .get(field)
        .and_then(Value::as_str)
        .ok_or(ValidationError::InvalidType {
            field,
            expected: "string",
        })
}

/// Integers only: floats, booleans, and numeric strings are type errors.
///
/// Widened to `i128` so every JSON integer, signed or not, is reported
/// back exactly as sent.
fn integer_field(
    record: &Map<String, Value>,
    field: &'static str,
) -> Result<i128, ValidationError> {
    let value = record.get(field).ok_or(ValidationError::MissingField(field))?;
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
        .ok_or(ValidationError::InvalidType {
            field,
            expected: "integer",
        })
}

fn score_value(field: &'static str, value: i128) -> Result<u32, ValidationError> {
    u32::try_from(value).map_err(|_| ValidationError::InvalidScore { field, value })
}

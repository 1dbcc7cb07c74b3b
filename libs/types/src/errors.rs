//! Error types for the analytics pipeline
//!
//! Comprehensive error taxonomy using thiserror

use thiserror::Error;

/// Top-level engine error
///
/// Only `TerminalState` indicates a caller bug; `Transport` is surfaced so
/// the caller can decide between retry and abort.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("engine is stopped; no further events can be processed")]
    TerminalState,

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Record-level validation failures.
///
/// Recovered locally: the record is dropped and processing continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid type for field {field}: expected {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("invalid points value: {0}. Must be 2 or 3")]
    InvalidPoints(i128),

    #[error("unknown team: {0}")]
    UnknownTeam(String),

    #[error("invalid {field}: {value}")]
    InvalidScore { field: &'static str, value: i128 },

    #[error("{field} decreased from {previous} to {received}")]
    ScoreRegression {
        field: &'static str,
        previous: u32,
        received: u32,
    },
}

impl ValidationError {
    /// Short label for logging and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MalformedRecord(_) => "MalformedRecord",
            ValidationError::MissingField(_) => "MissingField",
            ValidationError::InvalidType { .. } => "InvalidType",
            ValidationError::InvalidPoints(_) => "InvalidPoints",
            ValidationError::UnknownTeam(_) => "UnknownTeam",
            ValidationError::InvalidScore { .. } => "InvalidScore",
            ValidationError::ScoreRegression { .. } => "ScoreRegression",
        }
    }
}

/// Failures of the channel delivering records. Owned by the transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("stream broken: {0}")]
    StreamBroken(String),
}

/// Invalid analytics configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("history capacity must be at least 1")]
    ZeroHistoryCapacity,

    #[error("momentum threshold must be at least 1")]
    ZeroMomentumThreshold,

    #[error("team identifiers must be non-empty")]
    EmptyTeamName,

    #[error("home and away teams share the identifier {0}")]
    DuplicateTeam(String),

    #[error("invalid value for {key}: {value}")]
    InvalidEnvValue { key: String, value: String },

    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

/// Game-clock parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockParseError {
    #[error("game time not in 'Q# MM:SS' form: {0}")]
    Malformed(String),

    #[error("seconds out of range: {0}")]
    SecondsOutOfRange(u8),
}

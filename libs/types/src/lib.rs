//! Types library for the live game analytics pipeline
//!
//! This library provides the core type definitions shared by every service
//! that consumes the scoring-event stream, so producers, analytics, and
//! presentation layers agree on one event shape.
//!
//! # Version
//! v1.0.0 - Frozen event schema
//!
//! # Modules
//! - `ids`: Unique identifiers (GameId)
//! - `team`: Team sides, leader, and team configuration
//! - `event`: Scoring events, points, and game clock
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod team;
pub mod event;
pub mod errors;

//! # pa_core - Participation & Performance Analytics Engine
//!
//! Reconstructs, for every player in every recorded match, the span of
//! match-clock minutes they spent on the field (starting eleven,
//! substitutions, dismissals) and aggregates raw match events into absolute
//! and per-90-minute statistics comparable across players and matches of
//! different lengths.
//!
//! ## Features
//! - Single monotonic match-clock scale across both halves and stoppage time
//! - Total, exhaustively tested participation decision table
//! - Scope filters (everything / one competition / one fixture) plus an
//!   optional minute window for event counting
//! - Per-player (per-90) and per-team (per-match) statistic views
//! - Inconsistent source rows are isolated and reported, never guessed at
//!
//! The engine is a pure computation over a read-only snapshot served by a
//! [`store::MatchStore`]; persistence, HTTP, and auth live elsewhere.

pub mod api;
pub mod classify;
pub mod engine;
pub mod error;
pub mod minutes;
pub mod models;
pub mod participation;
pub mod stats;
pub mod store;
pub mod timeline;

// Re-export the main API surface
pub use api::{player_statistics_json, team_statistics_json, StatsRequest};
pub use engine::{AnalyticsEngine, DataIssue, EngineConfig, MinuteWindow, PlayerStatistics};
pub use error::{EngineError, Result};
pub use models::{
    Competition, EventCatalog, EventKind, Fixture, Lineup, MatchEvent, Player, Position,
    Substitution,
};
pub use participation::{resolve, Participation, ParticipationIssueKind, PlayerMatchFacts};
pub use stats::{PlayerStatRecord, TeamStatRecord};
pub use store::{Dataset, EventQuery, InMemoryStore, MatchStore, Scope};
pub use timeline::{Half, HalfMark, MatchClock, NOMINAL_MINUTES};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

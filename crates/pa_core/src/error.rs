use thiserror::Error;

use crate::participation::ParticipationIssueKind;

/// Engine-level failures.
///
/// Data-consistency problems inside a single (player, fixture) pair are
/// normally carried as [`crate::engine::DataIssue`] entries next to the
/// partial result; they only surface as `InconsistentParticipation` when the
/// caller asked about that pair specifically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: u32 },

    #[error("inconsistent participation data for player {player} in fixture {fixture}: {reason}")]
    InconsistentParticipation { fixture: u32, player: u32, reason: ParticipationIssueKind },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl EngineError {
    pub fn not_found(what: &'static str, id: u32) -> Self {
        EngineError::NotFound { what, id }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

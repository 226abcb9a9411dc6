//! # Storage collaborator interface
//!
//! The engine is a pure computation over a read-only snapshot; everything it
//! knows about matches comes through [`MatchStore`]. Any datastore exposing
//! these reads can back the engine; the bundled [`InMemoryStore`] serves
//! the test suite and the report binary.
//!
//! Scope semantics: an unknown id used as the *primary* scope target is a
//! not-found error; unknown ids inside a narrowing [`EventQuery`] merely
//! select nothing.

pub mod memory;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{
    CompetitionId, EventKind, EventKindId, Fixture, FixtureId, Lineup, MatchEvent, PitchZone,
    Player, PlayerId, Substitution,
};
use crate::timeline::Half;

pub use memory::{Dataset, InMemoryStore};

/// Which matches contribute to a statistics computation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Every recorded fixture.
    #[default]
    All,
    /// One competition's fixtures.
    Competition(CompetitionId),
    /// A single fixture.
    Fixture(FixtureId),
}

/// Narrowing filters for event reads. Every field is optional; `default()`
/// selects everything in scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EventQuery {
    /// Inclusive raw-minute window.
    pub minute_range: Option<(u16, u16)>,
    /// Keep events of one half only; rows with an unset half mark count as
    /// first-half.
    pub half: Option<Half>,
    /// Keep events of these kinds only.
    pub kinds: Option<Vec<EventKindId>>,
    /// Keep events by these players only.
    pub players: Option<Vec<PlayerId>>,
    /// Keep events whose start coordinates fall in this pitch zone.
    pub zone: Option<PitchZone>,
}

impl EventQuery {
    /// Window-only query, the common case for the statistics views.
    pub fn minute_window(range: Option<(u16, u16)>) -> Self {
        Self { minute_range: range, ..Default::default() }
    }

    /// Whether a single event row passes every configured filter.
    pub fn matches(&self, event: &MatchEvent) -> bool {
        if let Some((from, to)) = self.minute_range {
            if event.minute < from || event.minute > to {
                return false;
            }
        }
        if let Some(half) = self.half {
            if event.half.or_first() != half {
                return false;
            }
        }
        if let Some(kinds) = &self.kinds {
            if !kinds.contains(&event.kind) {
                return false;
            }
        }
        if let Some(players) = &self.players {
            if !players.contains(&event.player) {
                return false;
            }
        }
        if let Some(zone) = self.zone {
            if event.zone() != Some(zone) {
                return false;
            }
        }
        true
    }
}

/// Read operations the engine requires from the datastore.
///
/// Implementations must serve a consistent snapshot for the duration of one
/// request; the engine fetches once per scope and never writes back.
pub trait MatchStore: Sync {
    /// Every player in the reference data, including the opponent sentinel
    /// if the dataset carries one (the engine excludes it itself).
    fn list_players(&self) -> Result<Vec<Player>>;

    /// The open-ended event-kind catalog.
    fn event_kinds(&self) -> Result<Vec<EventKind>>;

    /// Fixtures selected by scope. Unknown primary targets are an error:
    /// `Scope::Fixture` with a missing id, or `Scope::Competition` for a
    /// competition that does not exist.
    fn list_fixtures(&self, scope: Scope) -> Result<Vec<Fixture>>;

    /// The starting lineup for a fixture, if one was entered.
    fn lineup(&self, fixture: FixtureId) -> Result<Option<Lineup>>;

    /// All substitutions recorded for a fixture.
    fn substitutions(&self, fixture: FixtureId) -> Result<Vec<Substitution>>;

    /// Events in scope, narrowed by the query.
    fn list_events(&self, scope: Scope, query: &EventQuery) -> Result<Vec<MatchEvent>>;
}

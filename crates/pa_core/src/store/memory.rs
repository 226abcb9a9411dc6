//! In-memory [`MatchStore`] over a deserialized [`Dataset`] document.
//! Backs the test suite and the `stats_report` binary; a production
//! deployment would implement the trait over its own datastore instead.

use serde::{Deserialize, Serialize};

use super::{EventQuery, MatchStore, Scope};
use crate::error::{EngineError, Result};
use crate::models::{
    Competition, EventKind, Fixture, FixtureId, Lineup, MatchEvent, Player, Substitution,
};

/// Serializable snapshot of everything the engine reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub competitions: Vec<Competition>,
    #[serde(default)]
    pub event_kinds: Vec<EventKind>,
    #[serde(default)]
    pub fixtures: Vec<Fixture>,
    #[serde(default)]
    pub lineups: Vec<Lineup>,
    #[serde(default)]
    pub substitutions: Vec<Substitution>,
    #[serde(default)]
    pub events: Vec<MatchEvent>,
}

/// A [`MatchStore`] that serves a `Dataset` held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    dataset: Dataset,
}

impl InMemoryStore {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    /// Parse a JSON dataset document.
    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidRequest(format!("dataset parse failed: {e}")))?;
        Ok(Self::new(dataset))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    // Builder-style helpers for assembling fixtures in tests.

    pub fn with_player(mut self, player: Player) -> Self {
        self.dataset.players.push(player);
        self
    }

    pub fn with_competition(mut self, competition: Competition) -> Self {
        self.dataset.competitions.push(competition);
        self
    }

    pub fn with_kind(mut self, kind: EventKind) -> Self {
        self.dataset.event_kinds.push(kind);
        self
    }

    pub fn with_fixture(mut self, fixture: Fixture) -> Self {
        self.dataset.fixtures.push(fixture);
        self
    }

    pub fn with_lineup(mut self, lineup: Lineup) -> Self {
        self.dataset.lineups.push(lineup);
        self
    }

    pub fn with_substitution(mut self, substitution: Substitution) -> Self {
        self.dataset.substitutions.push(substitution);
        self
    }

    pub fn with_event(mut self, event: MatchEvent) -> Self {
        self.dataset.events.push(event);
        self
    }

    fn scope_contains(&self, scope: Scope, fixture: FixtureId) -> bool {
        match scope {
            Scope::All => true,
            Scope::Fixture(id) => fixture == id,
            Scope::Competition(id) => self
                .dataset
                .fixtures
                .iter()
                .any(|f| f.id == fixture && f.competition == id),
        }
    }
}

impl MatchStore for InMemoryStore {
    fn list_players(&self) -> Result<Vec<Player>> {
        Ok(self.dataset.players.clone())
    }

    fn event_kinds(&self) -> Result<Vec<EventKind>> {
        Ok(self.dataset.event_kinds.clone())
    }

    fn list_fixtures(&self, scope: Scope) -> Result<Vec<Fixture>> {
        match scope {
            Scope::All => Ok(self.dataset.fixtures.clone()),
            Scope::Fixture(id) => {
                let found: Vec<Fixture> =
                    self.dataset.fixtures.iter().filter(|f| f.id == id).cloned().collect();
                if found.is_empty() {
                    return Err(EngineError::not_found("fixture", id));
                }
                Ok(found)
            }
            Scope::Competition(id) => {
                let known = self.dataset.competitions.iter().any(|c| c.id == id)
                    || self.dataset.fixtures.iter().any(|f| f.competition == id);
                if !known {
                    return Err(EngineError::not_found("competition", id));
                }
                Ok(self
                    .dataset
                    .fixtures
                    .iter()
                    .filter(|f| f.competition == id)
                    .cloned()
                    .collect())
            }
        }
    }

    fn lineup(&self, fixture: FixtureId) -> Result<Option<Lineup>> {
        Ok(self.dataset.lineups.iter().find(|l| l.fixture == fixture).cloned())
    }

    fn substitutions(&self, fixture: FixtureId) -> Result<Vec<Substitution>> {
        Ok(self
            .dataset
            .substitutions
            .iter()
            .filter(|s| s.fixture == fixture)
            .cloned()
            .collect())
    }

    fn list_events(&self, scope: Scope, query: &EventQuery) -> Result<Vec<MatchEvent>> {
        Ok(self
            .dataset
            .events
            .iter()
            .filter(|e| self.scope_contains(scope, e.fixture) && query.matches(e))
            .cloned()
            .collect())
    }
}

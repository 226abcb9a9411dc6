pub mod catalog;
pub mod event;
pub mod fixture;
pub mod lineup;
pub mod player;
pub mod substitution;

pub use catalog::{EventCatalog, EventKind, EventKindId};
pub use event::{MatchEvent, PitchPoint, PitchZone, HALFWAY_X};
pub use fixture::{Competition, CompetitionId, Fixture, FixtureId, TeamId};
pub use lineup::Lineup;
pub use player::{Player, PlayerId, Position};
pub use substitution::Substitution;

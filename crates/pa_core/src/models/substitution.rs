use serde::{Deserialize, Serialize};

use super::fixture::FixtureId;
use super::player::PlayerId;
use crate::timeline::Half;

/// One substitution: `player_off` leaves the field, `player_on` replaces
/// them at `minute` of `half`. Valid data never has the same player on both
/// sides, and `player_off` must have been on the field at that point; the
/// participation resolver reports violations instead of guessing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Substitution {
    pub fixture: FixtureId,
    pub minute: u16,
    pub half: Half,
    pub player_off: PlayerId,
    pub player_on: PlayerId,
}

impl Substitution {
    /// A row where the incoming and outgoing player coincide is a data-entry
    /// error, never a legal substitution.
    pub fn is_self_swap(&self) -> bool {
        self.player_off == self.player_on
    }
}

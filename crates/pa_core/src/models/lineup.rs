use serde::{Deserialize, Serialize};

use super::fixture::FixtureId;
use super::player::PlayerId;

/// The starting eleven for one fixture. At most one lineup exists per
/// fixture; bench players only appear through substitutions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lineup {
    pub fixture: FixtureId,
    pub starters: Vec<PlayerId>,
}

impl Lineup {
    pub fn contains(&self, player: PlayerId) -> bool {
        self.starters.contains(&player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_checks_starters_only() {
        let lineup = Lineup { fixture: 1, starters: vec![1, 2, 3] };
        assert!(lineup.contains(2));
        assert!(!lineup.contains(9));
    }
}

//! # Minutes aggregation
//!
//! Folds per-fixture participation outcomes into a player's totals for the
//! requested scope: minutes on the field plus start/substitute appearance
//! counts. Rates over these totals are zero-guarded; a player with no
//! appearances reports 0 rather than faulting.

use serde::{Deserialize, Serialize};

use crate::participation::Participation;
use crate::stats::round2;

/// Accumulated playing time for one player over a set of fixtures.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MinutesLedger {
    pub total_minutes: u32,
    pub matches_started: u32,
    pub matches_as_substitute: u32,
}

impl MinutesLedger {
    /// Fold one fixture's resolved participation into the ledger.
    pub fn add(&mut self, participation: &Participation) {
        self.total_minutes += u32::from(participation.minutes_played());
        if participation.started() {
            self.matches_started += 1;
        } else if participation.came_on_as_substitute() {
            self.matches_as_substitute += 1;
        }
    }

    pub fn matches_played(&self) -> u32 {
        self.matches_started + self.matches_as_substitute
    }

    /// Average minutes per appearance, 2 decimal places; 0.0 with no
    /// appearances.
    pub fn average_minutes(&self) -> f64 {
        let played = self.matches_played();
        if played == 0 {
            return 0.0;
        }
        round2(f64::from(self.total_minutes) / f64::from(played))
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::timeline::MatchClock;

pub type FixtureId = u32;
pub type TeamId = u32;
pub type CompetitionId = u32;

/// Competition reference row (league, cup, season slice).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Competition {
    pub id: CompetitionId,
    pub name: String,
}

/// One recorded match.
///
/// `team_b` is optional: historical data aggregates every opposition side
/// into a single "vs opponent" placeholder, in which case only `team_a` is a
/// real reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fixture {
    pub id: FixtureId,
    pub team_a: TeamId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_b: Option<TeamId>,
    pub competition: CompetitionId,
    pub date: NaiveDate,
    #[serde(default)]
    pub goals_a: u8,
    #[serde(default)]
    pub goals_b: u8,
    /// Added time at the end of the first half, minutes.
    #[serde(default)]
    pub stoppage_first_half: u16,
    /// Added time at the end of the second half, minutes.
    #[serde(default)]
    pub stoppage_second_half: u16,
}

impl Fixture {
    /// The clock-minute projection for this fixture.
    pub fn clock(&self) -> MatchClock {
        MatchClock::new(self.stoppage_first_half, self.stoppage_second_half)
    }
}

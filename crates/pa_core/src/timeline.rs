//! # Match timeline model
//!
//! A football match is recorded as two halves of a nominal 45 minutes each,
//! both of which may be extended by added (stoppage) time. Raw event data
//! carries a `(minute, half)` pair; comparing raw minutes across halves is
//! meaningless, so every downstream computation first projects onto a single
//! monotonic scale, the *clock minute*:
//!
//! - first half:  `clock = raw`
//! - second half: `clock = raw + stoppage_first`
//!
//! The scale spans `90 + stoppage_first + stoppage_second` minutes in total.

use serde::{Deserialize, Serialize};

/// Nominal match length in minutes, before added time.
pub const NOMINAL_MINUTES: u16 = 90;

/// Which half of the match an observation belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    First,
    Second,
}

/// Half indicator as it appears on raw event rows, where the half may not
/// have been filled in at data entry.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HalfMark {
    /// Not recorded. Treated as first half wherever a half filter applies.
    #[default]
    Unset,
    First,
    Second,
}

impl HalfMark {
    /// Resolve the mark to a concrete half, defaulting unset rows to the
    /// first half (matches how half filters behave on legacy rows).
    pub fn or_first(self) -> Half {
        match self {
            HalfMark::Second => Half::Second,
            HalfMark::Unset | HalfMark::First => Half::First,
        }
    }
}

impl From<Half> for HalfMark {
    fn from(half: Half) -> Self {
        match half {
            Half::First => HalfMark::First,
            Half::Second => HalfMark::Second,
        }
    }
}

/// Per-match clock: the two stoppage extensions and the projection from raw
/// `(minute, half)` pairs onto the single increasing clock-minute scale.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchClock {
    /// Added time at the end of the first half, in minutes.
    pub stoppage_first: u16,
    /// Added time at the end of the second half, in minutes.
    pub stoppage_second: u16,
}

impl MatchClock {
    pub fn new(stoppage_first: u16, stoppage_second: u16) -> Self {
        Self { stoppage_first, stoppage_second }
    }

    /// Project a raw minute in a given half onto the clock-minute scale.
    pub fn clock_minute(&self, raw_minute: u16, half: Half) -> u16 {
        match half {
            Half::First => raw_minute,
            Half::Second => raw_minute + self.stoppage_first,
        }
    }

    /// The clock minute at which the match ends: 90 plus both stoppages.
    pub fn full_time(&self) -> u16 {
        NOMINAL_MINUTES + self.stoppage_first + self.stoppage_second
    }
}

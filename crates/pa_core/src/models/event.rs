use serde::{Deserialize, Serialize};

use super::catalog::EventKindId;
use super::fixture::FixtureId;
use super::player::PlayerId;
use crate::timeline::HalfMark;

/// Pitch x-coordinate separating the recording team's defensive and
/// attacking territory in the capture tool's coordinate space.
pub const HALFWAY_X: f64 = 300.0;

/// One on-ball event row as captured during match entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEvent {
    pub fixture: FixtureId,
    pub player: PlayerId,
    pub kind: EventKindId,
    pub minute: u16,
    /// Half the event happened in; legacy rows may leave this unset.
    #[serde(default)]
    pub half: HalfMark,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Where on the pitch the action started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<PitchPoint>,
    /// Where the action ended (passes, carries).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<PitchPoint>,
}

impl MatchEvent {
    /// The pitch zone the event started in, when coordinates were captured.
    pub fn zone(&self) -> Option<PitchZone> {
        self.start.map(|p| p.zone())
    }
}

/// Raw capture-tool coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PitchPoint {
    pub x: f64,
    pub y: f64,
}

impl PitchPoint {
    pub fn zone(&self) -> PitchZone {
        if self.x > HALFWAY_X {
            PitchZone::Defence
        } else {
            PitchZone::Attack
        }
    }
}

/// Coarse pitch split used by the event filters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PitchZone {
    Defence,
    Attack,
}

//! # Stat aggregation
//!
//! Turns a minutes ledger and an event tally into the two presentation
//! records: per-player (per-90-minute normalization) and per-team
//! (per-match normalization). Both are plain data; all arithmetic happens
//! here so the records themselves stay serializable snapshots.

pub mod player;
pub mod team;

pub use player::PlayerStatRecord;
pub use team::TeamStatRecord;

/// Zero denominators are floored to this epsilon instead of faulting, so a
/// zero count still divides to 0.0 and a non-zero count to a defined, very
/// large rate.
pub(crate) const ZERO_DENOMINATOR_EPSILON: f64 = 1e-10;

/// Presentation rounding for per-90 and per-match figures.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Presentation rounding for average-minutes figures.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `count` normalized to a 90-minute basis over `total_minutes` of play.
pub fn per_90(count: u32, total_minutes: u32) -> f64 {
    let minutes = if total_minutes == 0 {
        ZERO_DENOMINATOR_EPSILON
    } else {
        f64::from(total_minutes)
    };
    round3(f64::from(count) / (minutes / 90.0))
}

/// `count` averaged over `matches_played` fixtures.
pub fn per_match(count: u32, matches_played: u32) -> f64 {
    let matches = if matches_played == 0 {
        ZERO_DENOMINATOR_EPSILON
    } else {
        f64::from(matches_played)
    };
    round3(f64::from(count) / matches)
}

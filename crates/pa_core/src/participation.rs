//! # Participation resolver
//!
//! Reconstructs, for one (player, fixture) pair, the span of clock minutes
//! the player spent on the field. The outcome is an explicit sum type: the
//! mapping from case to minutes is total, and each case is testable on its
//! own.
//!
//! The resolver never guesses on contradictory data: a player who is both a
//! starter and a substitution's incoming player, or a substitution that
//! removes somebody who was never on the field, is reported as an issue and
//! the pair is excluded from aggregates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Lineup, PlayerId, Substitution};
use crate::timeline::{Half, MatchClock};

/// Resolved on-field interval for one player in one fixture. All minute
/// fields are clock minutes (see [`crate::timeline::MatchClock`]).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "case", rename_all = "snake_case")]
pub enum Participation {
    /// Not in the lineup, never brought on.
    DidNotPlay,
    /// Started and was on the field until full time.
    FullMatch { end: u16 },
    /// Started, replaced at `left`.
    SubbedOff { left: u16 },
    /// Started, dismissed at `left`.
    SentOffAsStarter { left: u16 },
    /// Came on at `entered`, finished the match.
    SubbedOnFinished { entered: u16, end: u16 },
    /// Came on at `entered`, dismissed at `left`.
    SubbedOnSentOff { entered: u16, left: u16 },
    /// Came on at `entered`, replaced again at `left`.
    SubbedOnSubbedOff { entered: u16, left: u16 },
}

impl Participation {
    /// The half-open `[enter, leave)` clock interval, or `None` for a player
    /// who never took the field.
    pub fn interval(&self) -> Option<(u16, u16)> {
        match *self {
            Participation::DidNotPlay => None,
            Participation::FullMatch { end } => Some((0, end)),
            Participation::SubbedOff { left } => Some((0, left)),
            Participation::SentOffAsStarter { left } => Some((0, left)),
            Participation::SubbedOnFinished { entered, end } => Some((entered, end)),
            Participation::SubbedOnSentOff { entered, left } => Some((entered, left)),
            Participation::SubbedOnSubbedOff { entered, left } => Some((entered, left)),
        }
    }

    /// Minutes on the field; 0 for a player who did not play.
    pub fn minutes_played(&self) -> u16 {
        self.interval().map_or(0, |(enter, leave)| leave.saturating_sub(enter))
    }

    /// True when the player was in the starting eleven.
    pub fn started(&self) -> bool {
        matches!(
            self,
            Participation::FullMatch { .. }
                | Participation::SubbedOff { .. }
                | Participation::SentOffAsStarter { .. }
        )
    }

    /// True when the player entered from the bench.
    pub fn came_on_as_substitute(&self) -> bool {
        matches!(
            self,
            Participation::SubbedOnFinished { .. }
                | Participation::SubbedOnSentOff { .. }
                | Participation::SubbedOnSubbedOff { .. }
        )
    }
}

/// Why a (player, fixture) pair could not be resolved.
#[derive(Debug, Clone, Copy, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParticipationIssueKind {
    #[error("player appears both in the starting lineup and as a substitution's incoming player")]
    StarterAlsoSubbedOn,
    #[error("substitution lists the same player as incoming and outgoing")]
    SelfSwapSubstitution,
    #[error("player was substituted off without ever being on the field")]
    SubbedOffWhileNotOnField,
    #[error("player was substituted off before coming on")]
    SubbedOffBeforeEntry,
    #[error("player was dismissed at or before the minute they came on")]
    DismissedBeforeEntry,
}

/// Everything the resolver needs to know about one player in one fixture,
/// already reduced to raw observations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerMatchFacts {
    /// Member of the starting lineup.
    pub started: bool,
    /// Earliest substitution bringing the player on, as `(minute, half)`.
    pub subbed_on: Option<(u16, Half)>,
    /// Earliest substitution taking the player off.
    pub subbed_off: Option<(u16, Half)>,
    /// Earliest dismissal (red card) recorded against the player.
    pub dismissed: Option<(u16, Half)>,
    /// The player appears on both sides of a single substitution row.
    pub self_swap: bool,
}

impl PlayerMatchFacts {
    /// Collect the raw observations for `player` from the fixture's lineup
    /// and substitution rows. Dismissals come from the event stream and are
    /// supplied by the caller (the resolver does not know event kinds).
    pub fn gather(
        player: PlayerId,
        lineup: Option<&Lineup>,
        substitutions: &[Substitution],
        clock: &MatchClock,
        dismissed: Option<(u16, Half)>,
    ) -> Self {
        let started = lineup.is_some_and(|l| l.contains(player));

        let earliest = |mut picks: Vec<(u16, Half)>| {
            picks.sort_by_key(|&(minute, half)| clock.clock_minute(minute, half));
            picks.first().copied()
        };

        let subbed_on = earliest(
            substitutions
                .iter()
                .filter(|s| s.player_on == player && !s.is_self_swap())
                .map(|s| (s.minute, s.half))
                .collect(),
        );
        let subbed_off = earliest(
            substitutions
                .iter()
                .filter(|s| s.player_off == player && !s.is_self_swap())
                .map(|s| (s.minute, s.half))
                .collect(),
        );
        let self_swap = substitutions
            .iter()
            .any(|s| s.is_self_swap() && (s.player_on == player || s.player_off == player));

        Self { started, subbed_on, subbed_off, dismissed, self_swap }
    }
}

/// Resolve one (player, fixture) pair to its participation outcome.
///
/// The cases are mutually exclusive and evaluated in the order of the
/// decision table: contradiction checks, did-not-play, starter outcomes,
/// then substitute outcomes. Where both a removal and a dismissal exist for
/// the same spell, the earlier clock minute ends it.
pub fn resolve(
    facts: &PlayerMatchFacts,
    clock: &MatchClock,
) -> Result<Participation, ParticipationIssueKind> {
    if facts.self_swap {
        return Err(ParticipationIssueKind::SelfSwapSubstitution);
    }
    if facts.started && facts.subbed_on.is_some() {
        return Err(ParticipationIssueKind::StarterAlsoSubbedOn);
    }

    let to_clock = |pair: Option<(u16, Half)>| pair.map(|(m, h)| clock.clock_minute(m, h));
    let off = to_clock(facts.subbed_off);
    let dismissed = to_clock(facts.dismissed);

    if !facts.started && facts.subbed_on.is_none() {
        if off.is_some() {
            return Err(ParticipationIssueKind::SubbedOffWhileNotOnField);
        }
        // A dismissal with no on-field spell (bench card) carries no minutes.
        return Ok(Participation::DidNotPlay);
    }

    if facts.started {
        return Ok(match (dismissed, off) {
            (Some(d), Some(o)) if d <= o => Participation::SentOffAsStarter { left: d },
            (_, Some(o)) => Participation::SubbedOff { left: o },
            (Some(d), None) => Participation::SentOffAsStarter { left: d },
            (None, None) => Participation::FullMatch { end: clock.full_time() },
        });
    }

    // Substitute path: subbed_on is guaranteed present here.
    let entered = to_clock(facts.subbed_on).unwrap_or_default();
    if let Some(d) = dismissed {
        if d <= entered {
            return Err(ParticipationIssueKind::DismissedBeforeEntry);
        }
    }
    if let Some(o) = off {
        if o <= entered {
            return Err(ParticipationIssueKind::SubbedOffBeforeEntry);
        }
    }

    Ok(match (dismissed, off) {
        (Some(d), Some(o)) if d <= o => Participation::SubbedOnSentOff { entered, left: d },
        (_, Some(o)) => Participation::SubbedOnSubbedOff { entered, left: o },
        (Some(d), None) => Participation::SubbedOnSentOff { entered, left: d },
        (None, None) => Participation::SubbedOnFinished { entered, end: clock.full_time() },
    })
}

//! # Statistics engine
//!
//! Orchestrates one statistics request: fetch the scope's snapshot from the
//! storage collaborator once, resolve participation per (player, fixture),
//! aggregate minutes, classify events, and normalize. Per-player work is
//! independent, so it fans out across a rayon pool and merges into a
//! deterministically ordered list.
//!
//! Bad participation data never poisons the rest of the aggregate: the
//! offending (player, fixture) pair is skipped and reported in
//! [`PlayerStatistics::issues`] next to the partial result.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classify::{labels, EventTally};
use crate::error::{EngineError, Result};
use crate::minutes::MinutesLedger;
use crate::models::{
    EventCatalog, Fixture, FixtureId, Lineup, MatchEvent, Player, PlayerId, Substitution,
};
use crate::participation::{resolve, Participation, ParticipationIssueKind, PlayerMatchFacts};
use crate::stats::{PlayerStatRecord, TeamStatRecord};
use crate::store::{EventQuery, MatchStore, Scope};
use crate::timeline::{Half, MatchClock};

/// Inclusive raw-minute window narrowing which events are counted.
/// Participation (and therefore minutes) is never windowed.
pub type MinuteWindow = (u16, u16);

/// Engine-level knobs that vary per deployment, never per request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// The sentinel "opponent" player id, excluded from every individual
    /// statistic. `None` when the dataset has no placeholder row.
    pub opponent_player: Option<PlayerId>,
    /// Catalog label whose events end a player's participation early.
    pub sent_off_label: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { opponent_player: None, sent_off_label: labels::RED_CARD.to_string() }
    }
}

/// One unresolvable (player, fixture) pair, reported next to the partial
/// aggregate instead of aborting the whole request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataIssue {
    pub fixture: FixtureId,
    pub player: PlayerId,
    pub reason: ParticipationIssueKind,
}

/// Result of a per-player statistics request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerStatistics {
    pub records: Vec<PlayerStatRecord>,
    pub issues: Vec<DataIssue>,
}

/// Everything known about one fixture in scope, fetched once per request.
struct FixtureContext {
    fixture: Fixture,
    clock: MatchClock,
    lineup: Option<Lineup>,
    substitutions: Vec<Substitution>,
}

/// The analytics engine over a storage collaborator.
pub struct AnalyticsEngine<'a, S: MatchStore> {
    store: &'a S,
    config: EngineConfig,
}

impl<'a, S: MatchStore> AnalyticsEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store, config: EngineConfig::default() }
    }

    pub fn with_config(store: &'a S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Per-player statistics for the scope, optionally narrowed to a raw
    /// minute window for event counting.
    pub fn player_statistics(
        &self,
        scope: Scope,
        window: Option<MinuteWindow>,
    ) -> Result<PlayerStatistics> {
        let contexts = self.fixture_contexts(scope)?;
        let catalog = EventCatalog::new(self.store.event_kinds()?);
        let dismissals = self.dismissal_events(scope, &catalog)?;
        let events = self.store.list_events(scope, &EventQuery::minute_window(window))?;

        let mut players = self.store.list_players()?;
        players.retain(|p| Some(p.id) != self.config.opponent_player);
        debug!(
            fixtures = contexts.len(),
            players = players.len(),
            events = events.len(),
            "computing player statistics"
        );

        let per_player: Vec<(PlayerStatRecord, Vec<DataIssue>)> = players
            .par_iter()
            .map(|player| self.compute_one(player, &contexts, &dismissals, &events, &catalog))
            .collect();

        let mut records = Vec::with_capacity(per_player.len());
        let mut issues = Vec::new();
        for (record, mut player_issues) in per_player {
            records.push(record);
            issues.append(&mut player_issues);
        }

        records.sort_by(|a, b| {
            a.position
                .sort_rank()
                .cmp(&b.position.sort_rank())
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.player_id.cmp(&b.player_id))
        });
        issues.sort_by_key(|i| (i.fixture, i.player));
        if !issues.is_empty() {
            warn!(count = issues.len(), "inconsistent participation data in scope");
        }

        Ok(PlayerStatistics { records, issues })
    }

    /// Team-level statistics for the scope, normalized per match. Every
    /// event in scope counts, including the opponent sentinel's rows: that
    /// is where the conceded family lives.
    pub fn team_statistics(
        &self,
        scope: Scope,
        window: Option<MinuteWindow>,
    ) -> Result<TeamStatRecord> {
        let contexts = self.fixture_contexts(scope)?;
        let catalog = EventCatalog::new(self.store.event_kinds()?);
        let events = self.store.list_events(scope, &EventQuery::minute_window(window))?;
        debug!(fixtures = contexts.len(), events = events.len(), "computing team statistics");

        let tally =
            EventTally::from_labels(events.iter().filter_map(|e| catalog.label(e.kind)));
        Ok(TeamStatRecord::build(contexts.len() as u32, &tally))
    }

    /// Resolve one (player, fixture) pair. Unlike the aggregate views,
    /// where a bad pair is isolated into the issue list, here the pair is
    /// the whole answer, so an inconsistency surfaces as an error.
    pub fn participation(&self, fixture: FixtureId, player: PlayerId) -> Result<Participation> {
        let contexts = self.fixture_contexts(Scope::Fixture(fixture))?;
        let ctx = contexts
            .first()
            .ok_or(EngineError::NotFound { what: "fixture", id: fixture })?;
        let catalog = EventCatalog::new(self.store.event_kinds()?);
        let dismissals = self.dismissal_events(Scope::Fixture(fixture), &catalog)?;

        let players = self.store.list_players()?;
        let player_row = players
            .iter()
            .find(|p| p.id == player)
            .ok_or(EngineError::NotFound { what: "player", id: player })?;

        let facts = gather_facts(player_row, ctx, &dismissals);
        resolve(&facts, &ctx.clock)
            .map_err(|reason| EngineError::InconsistentParticipation { fixture, player, reason })
    }

    /// The players on the field at a given clock minute of one fixture,
    /// position-ordered. Pairs with unresolvable participation are omitted.
    pub fn players_on_field(
        &self,
        fixture: FixtureId,
        clock_minute: u16,
    ) -> Result<Vec<Player>> {
        let contexts = self.fixture_contexts(Scope::Fixture(fixture))?;
        let catalog = EventCatalog::new(self.store.event_kinds()?);
        let dismissals = self.dismissal_events(Scope::Fixture(fixture), &catalog)?;

        let mut players = self.store.list_players()?;
        players.retain(|p| Some(p.id) != self.config.opponent_player);

        let mut on_field = Vec::new();
        for player in &players {
            for ctx in &contexts {
                let facts = gather_facts(player, ctx, &dismissals);
                let Ok(participation) = resolve(&facts, &ctx.clock) else { continue };
                if let Some((enter, leave)) = participation.interval() {
                    if enter <= clock_minute && clock_minute < leave {
                        on_field.push(player.clone());
                        break;
                    }
                }
            }
        }

        on_field.sort_by(|a, b| {
            a.position
                .sort_rank()
                .cmp(&b.position.sort_rank())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(on_field)
    }

    fn fixture_contexts(&self, scope: Scope) -> Result<Vec<FixtureContext>> {
        let fixtures = self.store.list_fixtures(scope)?;
        let mut contexts = Vec::with_capacity(fixtures.len());
        for fixture in fixtures {
            let lineup = self.store.lineup(fixture.id)?;
            let substitutions = self.store.substitutions(fixture.id)?;
            let clock = fixture.clock();
            contexts.push(FixtureContext { fixture, clock, lineup, substitutions });
        }
        Ok(contexts)
    }

    /// All dismissal events in scope. Deliberately not windowed: a player's
    /// time on the field does not depend on which events the caller is
    /// counting.
    fn dismissal_events(&self, scope: Scope, catalog: &EventCatalog) -> Result<Vec<MatchEvent>> {
        let Some(kind) = catalog.id_of(&self.config.sent_off_label) else {
            return Ok(Vec::new());
        };
        let query = EventQuery { kinds: Some(vec![kind]), ..Default::default() };
        self.store.list_events(scope, &query)
    }

    fn compute_one(
        &self,
        player: &Player,
        contexts: &[FixtureContext],
        dismissals: &[MatchEvent],
        events: &[MatchEvent],
        catalog: &EventCatalog,
    ) -> (PlayerStatRecord, Vec<DataIssue>) {
        let mut ledger = MinutesLedger::default();
        let mut issues = Vec::new();

        for ctx in contexts {
            let facts = gather_facts(player, ctx, dismissals);
            match resolve(&facts, &ctx.clock) {
                Ok(participation) => ledger.add(&participation),
                Err(reason) => {
                    issues.push(DataIssue { fixture: ctx.fixture.id, player: player.id, reason })
                }
            }
        }

        let tally = EventTally::from_labels(
            events
                .iter()
                .filter(|e| e.player == player.id)
                .filter_map(|e| catalog.label(e.kind)),
        );
        (PlayerStatRecord::build(player, &ledger, &tally), issues)
    }
}

/// Reduce one fixture's rows to the resolver's input facts for `player`.
fn gather_facts(
    player: &Player,
    ctx: &FixtureContext,
    dismissals: &[MatchEvent],
) -> PlayerMatchFacts {
    let dismissed = earliest_dismissal(player.id, ctx, dismissals);
    PlayerMatchFacts::gather(
        player.id,
        ctx.lineup.as_ref(),
        &ctx.substitutions,
        &ctx.clock,
        dismissed,
    )
}

fn earliest_dismissal(
    player: PlayerId,
    ctx: &FixtureContext,
    dismissals: &[MatchEvent],
) -> Option<(u16, Half)> {
    dismissals
        .iter()
        .filter(|e| e.fixture == ctx.fixture.id && e.player == player)
        .map(|e| (e.minute, e.half.or_first()))
        .min_by_key(|&(minute, half)| ctx.clock.clock_minute(minute, half))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::labels;
    use crate::error::EngineError;
    use crate::models::{Competition, EventKind, Lineup, Substitution};
    use crate::store::InMemoryStore;
    use crate::timeline::HalfMark;
    use chrono::NaiveDate;

    const RED_CARD_KIND: u32 = 11;
    const GOAL_KIND: u32 = 1;
    const ASSIST_KIND: u32 = 2;
    const OPPONENT: PlayerId = 16;

    fn player(id: PlayerId, name: &str, position: crate::models::Position) -> Player {
        Player { id, name: name.into(), position, birth_date: None }
    }

    fn fixture(id: FixtureId, competition: u32, s1: u16, s2: u16) -> Fixture {
        Fixture {
            id,
            team_a: 1,
            team_b: None,
            competition,
            date: NaiveDate::from_ymd_opt(2024, 4, 6).unwrap(),
            goals_a: 0,
            goals_b: 0,
            stoppage_first_half: s1,
            stoppage_second_half: s2,
        }
    }

    fn event(fixture: FixtureId, player: PlayerId, kind: u32, minute: u16, half: HalfMark) -> MatchEvent {
        MatchEvent { fixture, player, kind, minute, half, video_url: None, start: None, end: None }
    }

    fn base_store() -> InMemoryStore {
        InMemoryStore::default()
            .with_competition(Competition { id: 1, name: "League".into() })
            .with_kind(EventKind { id: GOAL_KIND, label: labels::GOAL.into() })
            .with_kind(EventKind { id: ASSIST_KIND, label: labels::ASSIST.into() })
            .with_kind(EventKind { id: RED_CARD_KIND, label: labels::RED_CARD.into() })
            .with_player(player(1, "Keeper", crate::models::Position::Goalkeeper))
            .with_player(player(9, "Striker", crate::models::Position::Forward))
            .with_player(player(12, "Joker", crate::models::Position::Winger))
            .with_player(player(OPPONENT, "Opponent", crate::models::Position::Forward))
    }

    fn config() -> EngineConfig {
        EngineConfig { opponent_player: Some(OPPONENT), ..Default::default() }
    }

    #[test]
    fn starter_dismissed_at_forty_plays_forty_minutes() {
        // s1=2, s2=5; starter sent off at raw 40 of the first half.
        let store = base_store()
            .with_fixture(fixture(1, 1, 2, 5))
            .with_lineup(Lineup { fixture: 1, starters: vec![1, 9] })
            .with_event(event(1, 9, RED_CARD_KIND, 40, HalfMark::First));
        let engine = AnalyticsEngine::with_config(&store, config());

        let stats = engine.player_statistics(Scope::Fixture(1), None).unwrap();
        let striker = stats.records.iter().find(|r| r.player_id == 9).unwrap();
        assert_eq!(striker.total_minutes, 40);
        assert_eq!(striker.matches_started, 1);
        assert!(stats.issues.is_empty());
    }

    #[test]
    fn second_half_substitute_plays_the_remainder() {
        // s1=2, s2=5; on at raw 10 of the second half: 90+2+5-(10+2) = 85.
        let store = base_store()
            .with_fixture(fixture(1, 1, 2, 5))
            .with_lineup(Lineup { fixture: 1, starters: vec![1, 9] })
            .with_substitution(Substitution {
                fixture: 1,
                minute: 10,
                half: Half::Second,
                player_off: 9,
                player_on: 12,
            });
        let engine = AnalyticsEngine::with_config(&store, config());

        let stats = engine.player_statistics(Scope::Fixture(1), None).unwrap();
        let joker = stats.records.iter().find(|r| r.player_id == 12).unwrap();
        assert_eq!(joker.total_minutes, 85);
        assert_eq!(joker.matches_played, 1);
        assert_eq!(joker.matches_started, 0);

        let striker = stats.records.iter().find(|r| r.player_id == 9).unwrap();
        assert_eq!(striker.total_minutes, 12);
    }

    #[test]
    fn competition_totals_sum_independent_matches() {
        // Sum law over three synthetic fixtures: start-and-finish (97'),
        // subbed off at raw 30 of the first half (30'), on at raw 20 of the
        // second half of a 1+3 match (90+3-20 = 73').
        let store = base_store()
            .with_fixture(fixture(1, 1, 2, 5))
            .with_fixture(fixture(2, 1, 0, 0))
            .with_fixture(fixture(3, 1, 1, 3))
            .with_lineup(Lineup { fixture: 1, starters: vec![1, 9] })
            .with_lineup(Lineup { fixture: 2, starters: vec![1, 9] })
            .with_lineup(Lineup { fixture: 3, starters: vec![1, 12] })
            .with_substitution(Substitution {
                fixture: 2,
                minute: 30,
                half: Half::First,
                player_off: 9,
                player_on: 12,
            })
            .with_substitution(Substitution {
                fixture: 3,
                minute: 20,
                half: Half::Second,
                player_off: 12,
                player_on: 9,
            });
        let engine = AnalyticsEngine::with_config(&store, config());

        let stats = engine.player_statistics(Scope::Competition(1), None).unwrap();
        let striker = stats.records.iter().find(|r| r.player_id == 9).unwrap();
        assert_eq!(striker.total_minutes, 97 + 30 + 73);
        assert_eq!(striker.matches_started, 2);
        assert_eq!(striker.matches_played, 3);
        assert!(stats.issues.is_empty());
    }

    #[test]
    fn inconsistent_pair_is_isolated_not_fatal() {
        // Fixture 1 is fine; fixture 2 lists the striker both as a starter
        // and as the incoming player of a substitution.
        let store = base_store()
            .with_fixture(fixture(1, 1, 0, 0))
            .with_fixture(fixture(2, 1, 0, 0))
            .with_lineup(Lineup { fixture: 1, starters: vec![9] })
            .with_lineup(Lineup { fixture: 2, starters: vec![9, 1] })
            .with_substitution(Substitution {
                fixture: 2,
                minute: 60,
                half: Half::Second,
                player_off: 1,
                player_on: 9,
            });
        let engine = AnalyticsEngine::with_config(&store, config());

        let stats = engine.player_statistics(Scope::Competition(1), None).unwrap();
        let striker = stats.records.iter().find(|r| r.player_id == 9).unwrap();
        // Fixture 1 still counts.
        assert_eq!(striker.total_minutes, 90);
        assert_eq!(striker.matches_played, 1);
        assert_eq!(
            stats.issues,
            vec![DataIssue {
                fixture: 2,
                player: 9,
                reason: ParticipationIssueKind::StarterAlsoSubbedOn,
            }]
        );
    }

    #[test]
    fn opponent_sentinel_is_excluded_from_player_records() {
        let store = base_store()
            .with_fixture(fixture(1, 1, 0, 0))
            .with_lineup(Lineup { fixture: 1, starters: vec![9] })
            .with_event(event(1, OPPONENT, GOAL_KIND, 50, HalfMark::Second));
        let engine = AnalyticsEngine::with_config(&store, config());

        let stats = engine.player_statistics(Scope::All, None).unwrap();
        assert!(stats.records.iter().all(|r| r.player_id != OPPONENT));

        // The sentinel's events still count at team level.
        let team = engine.team_statistics(Scope::All, None).unwrap();
        assert_eq!(team.goals, 1);
    }

    #[test]
    fn minute_window_narrows_counts_but_not_minutes() {
        let store = base_store()
            .with_fixture(fixture(1, 1, 0, 0))
            .with_lineup(Lineup { fixture: 1, starters: vec![9] })
            .with_event(event(1, 9, GOAL_KIND, 10, HalfMark::First))
            .with_event(event(1, 9, GOAL_KIND, 80, HalfMark::Second));
        let engine = AnalyticsEngine::with_config(&store, config());

        let stats = engine.player_statistics(Scope::All, Some((0, 45))).unwrap();
        let striker = stats.records.iter().find(|r| r.player_id == 9).unwrap();
        assert_eq!(striker.goals, 1);
        assert_eq!(striker.total_minutes, 90);
    }

    #[test]
    fn unknown_fixture_scope_surfaces_not_found() {
        let store = base_store();
        let engine = AnalyticsEngine::with_config(&store, config());
        let err = engine.player_statistics(Scope::Fixture(42), None).unwrap_err();
        assert_eq!(err, EngineError::not_found("fixture", 42));
    }

    #[test]
    fn records_are_position_ordered() {
        let store = base_store()
            .with_fixture(fixture(1, 1, 0, 0))
            .with_lineup(Lineup { fixture: 1, starters: vec![1, 9, 12] });
        let engine = AnalyticsEngine::with_config(&store, config());

        let stats = engine.player_statistics(Scope::All, None).unwrap();
        let names: Vec<&str> = stats.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Keeper", "Joker", "Striker"]);
    }

    #[test]
    fn recomputation_is_bit_identical() {
        let store = base_store()
            .with_fixture(fixture(1, 1, 2, 5))
            .with_lineup(Lineup { fixture: 1, starters: vec![1, 9] })
            .with_event(event(1, 9, GOAL_KIND, 10, HalfMark::First))
            .with_event(event(1, 9, ASSIST_KIND, 70, HalfMark::Second));
        let engine = AnalyticsEngine::with_config(&store, config());

        let first = engine.player_statistics(Scope::All, None).unwrap();
        let second = engine.player_statistics(Scope::All, None).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn single_pair_query_resolves_or_errors() {
        let store = base_store()
            .with_fixture(fixture(1, 1, 0, 0))
            .with_lineup(Lineup { fixture: 1, starters: vec![9] })
            .with_substitution(Substitution {
                fixture: 1,
                minute: 60,
                half: Half::Second,
                player_off: 1,
                player_on: 9,
            });
        let engine = AnalyticsEngine::with_config(&store, config());

        // The striker is both a starter and an incoming substitute.
        let err = engine.participation(1, 9).unwrap_err();
        assert_eq!(
            err,
            EngineError::InconsistentParticipation {
                fixture: 1,
                player: 9,
                reason: ParticipationIssueKind::StarterAlsoSubbedOn,
            }
        );

        // The joker never appears anywhere.
        assert_eq!(engine.participation(1, 12).unwrap(), Participation::DidNotPlay);

        // Unknown ids are not-found, not empty.
        assert_eq!(
            engine.participation(1, 999).unwrap_err(),
            EngineError::not_found("player", 999)
        );
        assert_eq!(
            engine.participation(77, 9).unwrap_err(),
            EngineError::not_found("fixture", 77)
        );
    }

    #[test]
    fn on_field_listing_tracks_substitutions_and_dismissals() {
        let store = base_store()
            .with_fixture(fixture(1, 1, 0, 0))
            .with_lineup(Lineup { fixture: 1, starters: vec![1, 9] })
            .with_substitution(Substitution {
                fixture: 1,
                minute: 60,
                half: Half::Second,
                player_off: 9,
                player_on: 12,
            })
            .with_event(event(1, 12, RED_CARD_KIND, 85, HalfMark::Second));
        let engine = AnalyticsEngine::with_config(&store, config());

        let at_30: Vec<PlayerId> =
            engine.players_on_field(1, 30).unwrap().iter().map(|p| p.id).collect();
        assert_eq!(at_30, vec![1, 9]);

        let at_70: Vec<PlayerId> =
            engine.players_on_field(1, 70).unwrap().iter().map(|p| p.id).collect();
        assert_eq!(at_70, vec![1, 12]);

        let at_88: Vec<PlayerId> =
            engine.players_on_field(1, 88).unwrap().iter().map(|p| p.id).collect();
        assert_eq!(at_88, vec![1]);
    }
}

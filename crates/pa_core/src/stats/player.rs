use serde::{Deserialize, Serialize};

use super::{per_90, round3};
use crate::classify::EventTally;
use crate::minutes::MinutesLedger;
use crate::models::{Player, PlayerId, Position};

/// Statistics snapshot for one player over the requested scope: identity,
/// playing time, absolute counts, and per-90 rates (3 decimal places).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerStatRecord {
    // Identity
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,

    // Playing time
    pub matches_started: u32,
    pub matches_played: u32,
    pub total_minutes: u32,
    pub average_minutes: f64,

    // Attacking output
    pub goals: u32,
    pub assists: u32,
    pub shots_off_target: u32,
    pub shots_saved: u32,
    pub shots_post: u32,
    pub offsides: u32,

    // Defensive output and discipline
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub tackles: u32,
    pub ball_recoveries: u32,
    pub fouls_committed: u32,
    pub fouls_suffered: u32,

    // Chance creation
    pub expected_goals: u32,
    pub expected_assists: u32,

    // Progression
    pub solo_progressions: u32,
    pub line_breaking_passes: u32,
    pub line_breaking_passes_received: u32,

    // Per 90 minutes
    pub goals_per_90: f64,
    pub assists_per_90: f64,
    pub goal_involvement_per_90: f64,
    pub expected_goals_per_90: f64,
    pub expected_assists_per_90: f64,
    pub shots_per_90: f64,
    pub fouls_suffered_per_90: f64,
    pub progressions_per_90: f64,
    pub recoveries_tackles_per_90: f64,
    pub cards_per_90: f64,
    pub fouls_committed_per_90: f64,
}

impl PlayerStatRecord {
    /// Combine a player's minutes ledger and event tally into the snapshot.
    pub fn build(player: &Player, ledger: &MinutesLedger, tally: &EventTally) -> Self {
        let minutes = ledger.total_minutes;
        let goals_per_90 = per_90(tally.goals_total(), minutes);
        let assists_per_90 = per_90(tally.assists, minutes);

        Self {
            player_id: player.id,
            name: player.name.clone(),
            position: player.position,

            matches_started: ledger.matches_started,
            matches_played: ledger.matches_played(),
            total_minutes: minutes,
            average_minutes: ledger.average_minutes(),

            goals: tally.goals_total(),
            assists: tally.assists,
            shots_off_target: tally.shots_off_target,
            shots_saved: tally.shots_saved,
            shots_post: tally.shots_post,
            offsides: tally.offsides,

            yellow_cards: tally.yellow_cards,
            red_cards: tally.red_cards,
            tackles: tally.tackles,
            ball_recoveries: tally.ball_recoveries,
            fouls_committed: tally.fouls_committed_total(),
            fouls_suffered: tally.fouls_suffered_total(),

            expected_goals: tally.goal_chances,
            expected_assists: tally.assist_chances,

            solo_progressions: tally.solo_progressions,
            line_breaking_passes: tally.line_breaking_passes,
            line_breaking_passes_received: tally.line_breaking_passes_received,

            goals_per_90,
            assists_per_90,
            goal_involvement_per_90: round3(goals_per_90 + assists_per_90),
            expected_goals_per_90: per_90(tally.goal_chances, minutes),
            expected_assists_per_90: per_90(tally.assist_chances, minutes),
            shots_per_90: per_90(tally.shots_total(), minutes),
            fouls_suffered_per_90: per_90(tally.fouls_suffered_total(), minutes),
            progressions_per_90: per_90(tally.progressions_total(), minutes),
            recoveries_tackles_per_90: per_90(tally.recoveries_and_tackles(), minutes),
            cards_per_90: per_90(tally.cards_total(), minutes),
            fouls_committed_per_90: per_90(tally.fouls_committed_total(), minutes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::labels;

    fn player() -> Player {
        Player { id: 9, name: "Nine".into(), position: Position::Forward, birth_date: None }
    }

    #[test]
    fn reference_scenario_two_goals_one_assist_over_180_minutes() {
        let ledger =
            MinutesLedger { total_minutes: 180, matches_started: 2, matches_as_substitute: 0 };
        let tally = EventTally::from_labels([labels::GOAL, labels::GOAL, labels::ASSIST]);

        let record = PlayerStatRecord::build(&player(), &ledger, &tally);
        assert_eq!(record.goals, 2);
        assert_eq!(record.assists, 1);
        assert_eq!(record.goals_per_90, 1.0);
        assert_eq!(record.assists_per_90, 0.5);
        assert_eq!(record.goal_involvement_per_90, 1.5);
        assert_eq!(record.average_minutes, 90.0);
    }

    #[test]
    fn zero_minutes_reports_zero_rates_for_zero_counts() {
        let record =
            PlayerStatRecord::build(&player(), &MinutesLedger::default(), &EventTally::default());
        assert_eq!(record.total_minutes, 0);
        assert_eq!(record.matches_played, 0);
        assert_eq!(record.goals_per_90, 0.0);
        assert_eq!(record.assists_per_90, 0.0);
        assert_eq!(record.shots_per_90, 0.0);
        assert_eq!(record.cards_per_90, 0.0);
        assert_eq!(record.average_minutes, 0.0);
    }

    #[test]
    fn penalty_goals_fold_into_goals() {
        let ledger =
            MinutesLedger { total_minutes: 90, matches_started: 1, matches_as_substitute: 0 };
        let tally = EventTally::from_labels([labels::GOAL, labels::PENALTY_GOAL]);
        let record = PlayerStatRecord::build(&player(), &ledger, &tally);
        assert_eq!(record.goals, 2);
        assert_eq!(record.goals_per_90, 2.0);
    }
}

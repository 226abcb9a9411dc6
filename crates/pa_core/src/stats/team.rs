use serde::{Deserialize, Serialize};

use super::{per_match, round3};
use crate::classify::EventTally;

/// Aggregate statistics for the recorded team over the requested scope.
/// Mirrors the player view, with the defensive "conceded" family added and
/// normalization per match instead of per player-minute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamStatRecord {
    pub matches_played: u32,

    // Attacking output
    pub goals: u32,
    pub assists: u32,
    pub goal_involvement: u32,
    pub penalties_taken: u32,
    pub penalty_goals: u32,
    pub shots_off_target: u32,
    pub shots_saved: u32,
    pub shots_post: u32,
    pub offsides: u32,
    pub fouls_suffered: u32,
    pub fouls_suffered_for_card: u32,

    // Defensive output and discipline
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub ball_recoveries: u32,
    pub tackles: u32,
    pub fouls_committed: u32,
    pub shots_conceded: u32,
    pub dangerous_shots_conceded: u32,
    pub goals_conceded: u32,

    // Chance creation
    pub expected_goals: u32,
    pub expected_assists: u32,
    pub expected_goal_involvement: u32,

    // Progression
    pub solo_progressions: u32,
    pub line_breaking_passes: u32,
    pub line_breaking_passes_received: u32,

    // Per match
    pub goals_per_match: f64,
    pub assists_per_match: f64,
    pub goal_involvement_per_match: f64,
    pub expected_goals_per_match: f64,
    pub expected_assists_per_match: f64,
    pub expected_goal_involvement_per_match: f64,
    pub shots_per_match: f64,
    pub fouls_suffered_per_match: f64,
    pub cards_caused_per_match: f64,
    pub cards_per_match: f64,
    pub recoveries_tackles_per_match: f64,
    pub fouls_committed_per_match: f64,
    pub shots_conceded_per_match: f64,
    pub dangerous_shots_conceded_per_match: f64,
    pub goals_conceded_per_match: f64,
}

impl TeamStatRecord {
    /// Combine the number of fixtures in scope with the scope-wide tally.
    pub fn build(matches_played: u32, tally: &EventTally) -> Self {
        let goals_per_match = per_match(tally.goals_total(), matches_played);
        let assists_per_match = per_match(tally.assists, matches_played);
        let xg_per_match = per_match(tally.goal_chances, matches_played);
        let xa_per_match = per_match(tally.assist_chances, matches_played);

        Self {
            matches_played,

            goals: tally.goals_total(),
            assists: tally.assists,
            goal_involvement: tally.goal_involvement(),
            penalties_taken: tally.penalties_taken(),
            penalty_goals: tally.penalty_goals,
            shots_off_target: tally.shots_off_target,
            shots_saved: tally.shots_saved,
            shots_post: tally.shots_post,
            offsides: tally.offsides,
            fouls_suffered: tally.fouls_suffered_total(),
            fouls_suffered_for_card: tally.fouls_suffered_for_card,

            yellow_cards: tally.yellow_cards,
            red_cards: tally.red_cards,
            ball_recoveries: tally.ball_recoveries,
            tackles: tally.tackles,
            fouls_committed: tally.fouls_committed_total(),
            shots_conceded: tally.shots_conceded_total(),
            dangerous_shots_conceded: tally.dangerous_shots_conceded,
            goals_conceded: tally.goals_conceded,

            expected_goals: tally.goal_chances,
            expected_assists: tally.assist_chances,
            expected_goal_involvement: tally.expected_goal_involvement(),

            solo_progressions: tally.solo_progressions,
            line_breaking_passes: tally.line_breaking_passes,
            line_breaking_passes_received: tally.line_breaking_passes_received,

            goals_per_match,
            assists_per_match,
            goal_involvement_per_match: round3(goals_per_match + assists_per_match),
            expected_goals_per_match: xg_per_match,
            expected_assists_per_match: xa_per_match,
            expected_goal_involvement_per_match: round3(xg_per_match + xa_per_match),
            shots_per_match: per_match(tally.shots_total(), matches_played),
            fouls_suffered_per_match: per_match(tally.fouls_suffered_total(), matches_played),
            cards_caused_per_match: per_match(tally.fouls_suffered_for_card, matches_played),
            cards_per_match: per_match(tally.cards_total(), matches_played),
            recoveries_tackles_per_match: per_match(
                tally.recoveries_and_tackles(),
                matches_played,
            ),
            fouls_committed_per_match: per_match(tally.fouls_committed_total(), matches_played),
            shots_conceded_per_match: per_match(tally.shots_conceded_total(), matches_played),
            dangerous_shots_conceded_per_match: per_match(
                tally.dangerous_shots_conceded,
                matches_played,
            ),
            goals_conceded_per_match: per_match(tally.goals_conceded, matches_played),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::labels;

    #[test]
    fn reference_scenario_six_goals_over_four_matches() {
        let tally = EventTally::from_labels(std::iter::repeat(labels::GOAL).take(6));
        let record = TeamStatRecord::build(4, &tally);
        assert_eq!(record.goals, 6);
        assert_eq!(record.goals_per_match, 1.5);
    }

    #[test]
    fn zero_matches_reports_zero_rates() {
        let record = TeamStatRecord::build(0, &EventTally::default());
        assert_eq!(record.goals_per_match, 0.0);
        assert_eq!(record.shots_per_match, 0.0);
        assert_eq!(record.goals_conceded_per_match, 0.0);
    }

    #[test]
    fn conceded_family_totals_include_goals_conceded() {
        let tally = EventTally::from_labels([
            labels::SHOT_CONCEDED,
            labels::DANGEROUS_SHOT_CONCEDED,
            labels::GOAL_CONCEDED,
        ]);
        let record = TeamStatRecord::build(2, &tally);
        assert_eq!(record.shots_conceded, 3);
        assert_eq!(record.shots_conceded_per_match, 1.5);
        assert_eq!(record.goals_conceded_per_match, 0.5);
    }
}

//! # Event classifier
//!
//! The event-kind catalog is open-ended: analysts can add labels at will.
//! Statistics, however, are computed over a fixed taxonomy of buckets that
//! match catalog labels exactly. Unmatched labels simply do not contribute.
//!
//! Counting is one reduction pass producing an [`EventTally`]; the derived
//! composites (total goals, total shots, ...) are pure functions of the
//! tally, so the per-90 step never touches raw events.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Canonical catalog labels recognised by the classifier.
pub mod labels {
    pub const GOAL: &str = "Goal";
    pub const PENALTY_GOAL: &str = "Penalty goal";
    pub const ASSIST: &str = "Assist";
    pub const SHOT_OFF_TARGET: &str = "Shot off target";
    pub const SHOT_SAVED: &str = "Shot saved";
    pub const SHOT_POST: &str = "Shot against the post";
    pub const OFFSIDE: &str = "Offside";
    pub const YELLOW_CARD: &str = "Yellow card";
    pub const RED_CARD: &str = "Red card";
    pub const TACKLE: &str = "Tackle";
    pub const BALL_RECOVERY: &str = "Ball recovery";
    pub const FOUL_COMMITTED: &str = "Foul committed";
    pub const FOUL_SUFFERED: &str = "Foul suffered";
    pub const FOUL_SUFFERED_FOR_CARD: &str = "Foul suffered leading to card";
    pub const GOAL_CHANCE: &str = "Goal chance";
    pub const ASSIST_CHANCE: &str = "Assist chance";
    pub const SOLO_PROGRESSION: &str = "Solo progression";
    pub const LINE_BREAKING_PASS: &str = "Line-breaking pass";
    pub const LINE_BREAKING_PASS_RECEIVED: &str = "Line-breaking pass received";
    pub const PENALTY_MISSED: &str = "Penalty missed";
    pub const SHOT_CONCEDED: &str = "Shot conceded";
    pub const DANGEROUS_SHOT_CONCEDED: &str = "Dangerous shot conceded";
    pub const GOAL_CONCEDED: &str = "Goal conceded";
}

/// A statistical bucket of the fixed taxonomy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatBucket {
    Goal,
    PenaltyGoal,
    Assist,
    ShotOffTarget,
    ShotSaved,
    ShotPost,
    Offside,
    YellowCard,
    RedCard,
    Tackle,
    BallRecovery,
    FoulCommitted,
    FoulSuffered,
    FoulSufferedForCard,
    GoalChance,
    AssistChance,
    SoloProgression,
    LineBreakingPass,
    LineBreakingPassReceived,
    PenaltyMissed,
    ShotConceded,
    DangerousShotConceded,
    GoalConceded,
}

static BUCKET_BY_LABEL: Lazy<HashMap<&'static str, StatBucket>> = Lazy::new(|| {
    use StatBucket::*;
    HashMap::from([
        (labels::GOAL, Goal),
        (labels::PENALTY_GOAL, PenaltyGoal),
        (labels::ASSIST, Assist),
        (labels::SHOT_OFF_TARGET, ShotOffTarget),
        (labels::SHOT_SAVED, ShotSaved),
        (labels::SHOT_POST, ShotPost),
        (labels::OFFSIDE, Offside),
        (labels::YELLOW_CARD, YellowCard),
        (labels::RED_CARD, RedCard),
        (labels::TACKLE, Tackle),
        (labels::BALL_RECOVERY, BallRecovery),
        (labels::FOUL_COMMITTED, FoulCommitted),
        (labels::FOUL_SUFFERED, FoulSuffered),
        (labels::FOUL_SUFFERED_FOR_CARD, FoulSufferedForCard),
        (labels::GOAL_CHANCE, GoalChance),
        (labels::ASSIST_CHANCE, AssistChance),
        (labels::SOLO_PROGRESSION, SoloProgression),
        (labels::LINE_BREAKING_PASS, LineBreakingPass),
        (labels::LINE_BREAKING_PASS_RECEIVED, LineBreakingPassReceived),
        (labels::PENALTY_MISSED, PenaltyMissed),
        (labels::SHOT_CONCEDED, ShotConceded),
        (labels::DANGEROUS_SHOT_CONCEDED, DangerousShotConceded),
        (labels::GOAL_CONCEDED, GoalConceded),
    ])
});

impl StatBucket {
    /// Classify a catalog label by exact match. Unknown labels are not an
    /// error; they just fall outside the taxonomy.
    pub fn from_label(label: &str) -> Option<Self> {
        BUCKET_BY_LABEL.get(label).copied()
    }
}

/// Counter record for one player or one team over a set of events.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventTally {
    pub goals: u32,
    pub penalty_goals: u32,
    pub assists: u32,
    pub shots_off_target: u32,
    pub shots_saved: u32,
    pub shots_post: u32,
    pub offsides: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub tackles: u32,
    pub ball_recoveries: u32,
    pub fouls_committed: u32,
    pub fouls_suffered: u32,
    pub fouls_suffered_for_card: u32,
    pub goal_chances: u32,
    pub assist_chances: u32,
    pub solo_progressions: u32,
    pub line_breaking_passes: u32,
    pub line_breaking_passes_received: u32,
    pub penalties_missed: u32,
    pub shots_conceded: u32,
    pub dangerous_shots_conceded: u32,
    pub goals_conceded: u32,
}

impl EventTally {
    /// Build the tally in a single pass over classified labels.
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut tally = Self::default();
        for label in labels {
            if let Some(bucket) = StatBucket::from_label(label) {
                tally.record(bucket);
            }
        }
        tally
    }

    pub fn record(&mut self, bucket: StatBucket) {
        use StatBucket::*;
        let counter = match bucket {
            Goal => &mut self.goals,
            PenaltyGoal => &mut self.penalty_goals,
            Assist => &mut self.assists,
            ShotOffTarget => &mut self.shots_off_target,
            ShotSaved => &mut self.shots_saved,
            ShotPost => &mut self.shots_post,
            Offside => &mut self.offsides,
            YellowCard => &mut self.yellow_cards,
            RedCard => &mut self.red_cards,
            Tackle => &mut self.tackles,
            BallRecovery => &mut self.ball_recoveries,
            FoulCommitted => &mut self.fouls_committed,
            FoulSuffered => &mut self.fouls_suffered,
            FoulSufferedForCard => &mut self.fouls_suffered_for_card,
            GoalChance => &mut self.goal_chances,
            AssistChance => &mut self.assist_chances,
            SoloProgression => &mut self.solo_progressions,
            LineBreakingPass => &mut self.line_breaking_passes,
            LineBreakingPassReceived => &mut self.line_breaking_passes_received,
            PenaltyMissed => &mut self.penalties_missed,
            ShotConceded => &mut self.shots_conceded,
            DangerousShotConceded => &mut self.dangerous_shots_conceded,
            GoalConceded => &mut self.goals_conceded,
        };
        *counter += 1;
    }

    // Derived composite buckets.

    /// Open-play and penalty goals together.
    pub fn goals_total(&self) -> u32 {
        self.goals + self.penalty_goals
    }

    /// Goals plus assists.
    pub fn goal_involvement(&self) -> u32 {
        self.goals_total() + self.assists
    }

    /// Every attempt at goal, converted or not.
    pub fn shots_total(&self) -> u32 {
        self.shots_off_target + self.shots_saved + self.shots_post + self.goals_total()
    }

    /// Fouls plus both card colours (a card implies an infringement).
    pub fn fouls_committed_total(&self) -> u32 {
        self.fouls_committed + self.yellow_cards + self.red_cards
    }

    pub fn fouls_suffered_total(&self) -> u32 {
        self.fouls_suffered + self.fouls_suffered_for_card
    }

    pub fn cards_total(&self) -> u32 {
        self.yellow_cards + self.red_cards
    }

    /// Penalties stepped up to, converted or missed.
    pub fn penalties_taken(&self) -> u32 {
        self.penalty_goals + self.penalties_missed
    }

    pub fn expected_goal_involvement(&self) -> u32 {
        self.goal_chances + self.assist_chances
    }

    /// Carries and line-breaking passes, sent or received.
    pub fn progressions_total(&self) -> u32 {
        self.solo_progressions + self.line_breaking_passes + self.line_breaking_passes_received
    }

    pub fn recoveries_and_tackles(&self) -> u32 {
        self.ball_recoveries + self.tackles
    }

    /// Every attempt faced, including the ones that went in.
    pub fn shots_conceded_total(&self) -> u32 {
        self.shots_conceded + self.dangerous_shots_conceded + self.goals_conceded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_label_match_only() {
        assert_eq!(StatBucket::from_label("Goal"), Some(StatBucket::Goal));
        assert_eq!(StatBucket::from_label("goal"), None);
        assert_eq!(StatBucket::from_label("Goal "), None);
        assert_eq!(StatBucket::from_label("Corner"), None);
    }

    #[test]
    fn tally_counts_in_one_pass_and_ignores_unknown_labels() {
        let tally = EventTally::from_labels([
            labels::GOAL,
            labels::GOAL,
            labels::PENALTY_GOAL,
            labels::ASSIST,
            "Corner",
            labels::YELLOW_CARD,
        ]);
        assert_eq!(tally.goals, 2);
        assert_eq!(tally.penalty_goals, 1);
        assert_eq!(tally.assists, 1);
        assert_eq!(tally.yellow_cards, 1);
        assert_eq!(tally.goals_total(), 3);
        assert_eq!(tally.goal_involvement(), 4);
    }

    #[test]
    fn composites_follow_the_taxonomy() {
        let tally = EventTally::from_labels([
            labels::SHOT_OFF_TARGET,
            labels::SHOT_SAVED,
            labels::SHOT_POST,
            labels::GOAL,
            labels::FOUL_COMMITTED,
            labels::YELLOW_CARD,
            labels::RED_CARD,
            labels::FOUL_SUFFERED,
            labels::FOUL_SUFFERED_FOR_CARD,
            labels::PENALTY_MISSED,
            labels::PENALTY_GOAL,
        ]);
        assert_eq!(tally.shots_total(), 5);
        assert_eq!(tally.fouls_committed_total(), 3);
        assert_eq!(tally.fouls_suffered_total(), 2);
        assert_eq!(tally.penalties_taken(), 2);
        assert_eq!(tally.cards_total(), 2);
    }

    #[test]
    fn conceded_family_is_team_side_only() {
        let tally = EventTally::from_labels([
            labels::SHOT_CONCEDED,
            labels::DANGEROUS_SHOT_CONCEDED,
            labels::GOAL_CONCEDED,
            labels::GOAL_CONCEDED,
        ]);
        assert_eq!(tally.shots_conceded_total(), 4);
        assert_eq!(tally.goals_conceded, 2);
    }
}

pub mod stats_json;

pub use stats_json::{
    player_statistics_json, team_statistics_json, PlayerStatsResponse, StatsRequest,
    TeamStatsResponse,
};

// Dataset statistics report tool
// Run with: cargo run --bin stats_report -- path/to/dataset.json [competition_id]
//
// Loads a JSON dataset document (see pa_core::store::Dataset), computes both
// statistics views, and prints a plain-text report.

use std::env;
use std::process;

use pa_core::{
    player_statistics_json, team_statistics_json, AnalyticsEngine, EngineConfig, InMemoryStore,
};

fn main() {
    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: stats_report <dataset.json> [competition_id]");
        process::exit(1);
    };
    let competition: Option<u32> = args.next().map(|raw| {
        raw.parse().unwrap_or_else(|_| {
            eprintln!("competition_id must be an integer, got {raw:?}");
            process::exit(1);
        })
    });

    let json = std::fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("failed to read {path}: {e}");
        process::exit(1);
    });
    let store = InMemoryStore::from_json(&json).unwrap_or_else(|e| {
        eprintln!("failed to load dataset: {e}");
        process::exit(1);
    });

    // Datasets that carry the aggregate opponent row conventionally use a
    // player literally named "Opponent" for it.
    let opponent_player = store
        .dataset()
        .players
        .iter()
        .find(|p| p.name == "Opponent")
        .map(|p| p.id);
    let engine = AnalyticsEngine::with_config(
        &store,
        EngineConfig { opponent_player, ..Default::default() },
    );

    let request = match competition {
        Some(id) => format!(r#"{{"schema_version": 1, "competition": {id}}}"#),
        None => r#"{"schema_version": 1}"#.to_string(),
    };

    let players = player_statistics_json(&engine, &request).expect("player statistics");
    let team = team_statistics_json(&engine, &request).expect("team statistics");

    let players: serde_json::Value = serde_json::from_str(&players).unwrap();
    let team: serde_json::Value = serde_json::from_str(&team).unwrap();

    println!("=== Player statistics ===");
    println!(
        "{:<20} {:>6} {:>7} {:>8} {:>7} {:>7} {:>9}",
        "name", "starts", "played", "minutes", "goals", "assists", "goals/90"
    );
    for record in players["records"].as_array().unwrap() {
        println!(
            "{:<20} {:>6} {:>7} {:>8} {:>7} {:>7} {:>9}",
            record["name"].as_str().unwrap_or("?"),
            record["matches_started"],
            record["matches_played"],
            record["total_minutes"],
            record["goals"],
            record["assists"],
            record["goals_per_90"],
        );
    }

    let issues = players["issues"].as_array().unwrap();
    if !issues.is_empty() {
        println!("\n!!! {} inconsistent (player, fixture) pairs were skipped:", issues.len());
        for issue in issues {
            println!(
                "  fixture {} / player {}: {}",
                issue["fixture"], issue["player"], issue["reason"]
            );
        }
    }

    println!("\n=== Team statistics ===");
    println!("matches played:     {}", team["team"]["matches_played"]);
    println!("goals:              {}", team["team"]["goals"]);
    println!("goals conceded:     {}", team["team"]["goals_conceded"]);
    println!("goals per match:    {}", team["team"]["goals_per_match"]);
    println!("shots per match:    {}", team["team"]["shots_per_match"]);
    println!("cards per match:    {}", team["team"]["cards_per_match"]);
}

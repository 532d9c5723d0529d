//! End-of-match summary printed by the runner.

use serde::Serialize;

use dzone_sim::SimulationEngine;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub score: u32,
    pub credits: u32,
    pub kills: u32,
    pub deaths: u32,
    pub damage_dealt: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub seed: u64,
    pub rounds_played: u32,
    pub total_kills: u32,
    pub total_damage: f64,
    pub time_elapsed: f64,
    pub leaderboard: Vec<LeaderboardEntry>,
}

impl MatchReport {
    pub fn from_engine(engine: &SimulationEngine, seed: u64) -> Self {
        let stats = &engine.round().stats;
        let leaderboard = engine
            .roster()
            .leaderboard()
            .into_iter()
            .enumerate()
            .map(|(i, record)| LeaderboardEntry {
                rank: i + 1,
                name: record.name.clone(),
                score: record.score,
                credits: record.credits,
                kills: record.kills,
                deaths: record.deaths,
                damage_dealt: record.damage_dealt,
            })
            .collect();
        Self {
            seed,
            rounds_played: stats.rounds_played,
            total_kills: stats.total_kills,
            total_damage: stats.total_damage,
            time_elapsed: stats.time_elapsed,
            leaderboard,
        }
    }
}

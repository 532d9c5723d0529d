//! Match rules and arena configuration.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Round, scoring, and economy rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    /// Seconds before a round times out.
    pub round_time_limit: f64,
    /// Every Nth round opens the shop.
    pub shop_interval: u32,
    /// The match ends once this many rounds have been played.
    pub max_rounds: u32,
    /// Points for the survivor of a kill-ended round.
    pub kill_bonus_points: u32,
    /// Credits for the survivor of a kill-ended round.
    pub kill_bonus_credits: u32,
    /// Points for the winner of a timed-out round.
    pub timeout_survivor_points: u32,
    /// Points per damage unit dealt by a hit.
    pub hit_points_per_damage: f64,
    /// Damage counted toward hit points is capped at this.
    pub hit_points_damage_cap: f64,
    /// Credits per damage unit dealt by a hit.
    pub hit_credits_per_damage: f64,
    pub starting_credits: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            round_time_limit: 30.0,
            shop_interval: 3,
            max_rounds: 15,
            kill_bonus_points: 3,
            kill_bonus_credits: 50,
            timeout_survivor_points: 1,
            hit_points_per_damage: 1.0,
            hit_points_damage_cap: 40.0,
            hit_credits_per_damage: 10.0,
            starting_credits: 1000,
        }
    }
}

impl GameRules {
    /// Parse rules from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let rules: GameRules = serde_json::from_str(json)?;
        if rules.shop_interval == 0 {
            return Err(ConfigError::Invalid("shop_interval must be at least 1".into()));
        }
        if rules.round_time_limit <= 0.0 {
            return Err(ConfigError::Invalid("round_time_limit must be positive".into()));
        }
        Ok(rules)
    }
}

/// Arena rectangle and wall behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
    pub wall_restitution: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            wall_restitution: WALL_RESTITUTION,
        }
    }
}

impl ArenaConfig {
    /// True if `(x, y)` lies inside the arena rectangle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

//! Read-only snapshots produced each tick for rendering collaborators.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{MatchPhase, Port, TankArchetype, WeaponType};
use crate::events::CombatEvent;
use crate::types::{ExplosionId, ProjectileId, SimTime, TankId};

/// Complete world state for one frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: MatchPhase,
    /// True while the simulation is frozen by a pause command.
    pub paused: bool,
    /// Current round, 1-based. Zero before the match starts.
    pub round: u32,
    pub max_rounds: u32,
    /// Seconds left on the round clock.
    pub time_remaining: f64,
    pub tanks: Vec<TankView>,
    pub projectiles: Vec<ProjectileView>,
    pub explosions: Vec<ExplosionView>,
    pub players: Vec<PlayerView>,
    /// Events raised during this tick.
    pub events: Vec<CombatEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankView {
    pub id: TankId,
    pub archetype: TankArchetype,
    pub position: DVec2,
    pub angle: f64,
    pub size: f64,
    pub alive: bool,
    pub shield: f64,
    pub max_shield: f64,
    pub energy: f64,
    pub max_energy: f64,
    pub port: Port,
    /// Weapon in the active port, if any.
    pub weapon: Option<WeaponType>,
    /// Remaining ammo; `None` when unlimited or no weapon.
    pub ammo: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: ProjectileId,
    pub owner: TankId,
    pub weapon: WeaponType,
    pub position: DVec2,
    pub angle: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosionView {
    pub id: ExplosionId,
    pub position: DVec2,
    /// 0 at spawn, 1 when finished.
    pub progress: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: TankId,
    pub name: String,
    pub is_human: bool,
    pub score: u32,
    pub credits: u32,
    pub kills: u32,
    pub deaths: u32,
}

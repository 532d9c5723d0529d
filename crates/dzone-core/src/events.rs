//! Combat events emitted by the simulation each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{MatchPhase, RoundEndReason, WeaponType};
use crate::types::{ExplosionId, ProjectileId, TankId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A tank fired successfully.
    WeaponFired {
        tank: TankId,
        weapon: WeaponType,
        projectiles: u32,
    },
    /// A projectile struck a tank directly.
    ProjectileHit {
        projectile: ProjectileId,
        owner: TankId,
        target: TankId,
        damage: f64,
    },
    ExplosionSpawned {
        explosion: ExplosionId,
        owner: TankId,
        x: f64,
        y: f64,
        radius: f64,
    },
    /// Falloff damage from an explosion.
    BlastDamage {
        explosion: ExplosionId,
        owner: TankId,
        target: TankId,
        damage: f64,
    },
    TankDestroyed {
        tank: TankId,
        /// `None` for self-inflicted kills.
        killer: Option<TankId>,
    },
    RoundEnded {
        round: u32,
        reason: RoundEndReason,
        winner: Option<TankId>,
    },
    PhaseChanged { from: MatchPhase, to: MatchPhase },
}

//! Fundamental ids, kinematic state, and per-frame control intents.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Stable tank identity. Equal to the owning player's roster index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TankId(pub u32);

/// Stable projectile identity, unique within a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectileId(pub u32);

/// Stable explosion identity, unique within a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExplosionId(pub u32);

impl std::fmt::Display for TankId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tank#{}", self.0)
    }
}

/// Planar rigid-body state shared by tanks.
/// Screen coordinates: x grows right, y grows down, angle 0 faces +x.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Facing angle in radians, kept in [0, 2π).
    pub angle: f64,
    /// Radians per second.
    pub angular_velocity: f64,
}

impl Body {
    pub fn at(position: DVec2, angle: f64) -> Self {
        Self {
            position,
            angle,
            ..Default::default()
        }
    }

    /// Unit vector along the facing angle.
    pub fn forward(&self) -> DVec2 {
        DVec2::from_angle(self.angle)
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// What a tank wants to do this frame, produced from input or a controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlIntent {
    /// Forward/backward thrust in [-1, 1].
    pub thrust: f64,
    /// Rotation power in [-1, 1]; positive turns clockwise on screen.
    pub rotation: f64,
    pub fire: bool,
    /// Cycle to the next owned weapon in the active port.
    pub next_weapon: bool,
    /// Switch the active port (1-7).
    pub select_port: Option<u8>,
}

/// Spawn pose handed to a tank when a round is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub position: DVec2,
    pub angle: f64,
}

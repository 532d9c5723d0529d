//! Chase-and-fire behavior: turn toward the nearest enemy, hold a preferred
//! distance band, and fire on a fixed cadence when lined up.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use dzone_core::geometry::{angle_difference, heading};
use dzone_core::types::ControlIntent;

use crate::controller::{ControllerContext, TankController};

/// Tuning for [`ChaseController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseProfile {
    /// Rotation power used while turning.
    pub turn_power: f64,
    /// Heading error below which the tank stops turning (rad).
    pub turn_deadband: f64,
    /// Heading error below which the tank will fire (rad).
    pub fire_cone: f64,
    pub fire_range: f64,
    /// Seconds between shots.
    pub fire_delay: f64,
    /// Close in when farther than this.
    pub approach_distance: f64,
    /// Back off when closer than this.
    pub retreat_distance: f64,
    pub thrust_power: f64,
    /// Max random aim error (rad), re-rolled after every shot.
    pub aim_jitter: f64,
}

impl Default for ChaseProfile {
    fn default() -> Self {
        Self {
            turn_power: 0.5,
            turn_deadband: 0.1,
            fire_cone: 0.3,
            fire_range: 400.0,
            fire_delay: 1.0,
            approach_distance: 200.0,
            retreat_distance: 100.0,
            thrust_power: 0.3,
            aim_jitter: 0.05,
        }
    }
}

/// Default AI strategy.
pub struct ChaseController {
    profile: ChaseProfile,
    rng: ChaCha8Rng,
    since_last_shot: f64,
    aim_offset: f64,
}

impl ChaseController {
    pub fn new(seed: u64) -> Self {
        Self::with_profile(seed, ChaseProfile::default())
    }

    pub fn with_profile(seed: u64, profile: ChaseProfile) -> Self {
        Self {
            profile,
            rng: ChaCha8Rng::seed_from_u64(seed),
            since_last_shot: 0.0,
            aim_offset: 0.0,
        }
    }

    fn reroll_aim(&mut self) {
        let jitter = self.profile.aim_jitter;
        self.aim_offset = if jitter > 0.0 {
            self.rng.gen_range(-jitter..=jitter)
        } else {
            0.0
        };
    }
}

impl TankController for ChaseController {
    fn decide(&mut self, ctx: &ControllerContext) -> ControlIntent {
        let mut intent = ControlIntent::default();
        if !ctx.alive {
            return intent;
        }
        self.since_last_shot += ctx.dt;

        let Some(target) = ctx.nearest_enemy() else {
            return intent;
        };
        let p = &self.profile;
        let to_target = target.position - ctx.position;
        let distance = to_target.length();
        let error = angle_difference(ctx.angle, heading(to_target) + self.aim_offset);

        if error.abs() > p.turn_deadband {
            intent.rotation = p.turn_power * error.signum();
        }

        if distance > p.approach_distance {
            intent.thrust = p.thrust_power;
        } else if distance < p.retreat_distance {
            intent.thrust = -p.thrust_power;
        }

        if error.abs() < p.fire_cone
            && distance < p.fire_range
            && self.since_last_shot >= p.fire_delay
            && ctx.can_fire
        {
            intent.fire = true;
            self.since_last_shot = 0.0;
            self.reroll_aim();
        }

        intent
    }
}

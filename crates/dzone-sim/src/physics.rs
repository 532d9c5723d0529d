//! Kinematic integration for tanks and projectiles.
//!
//! Semi-implicit Euler: velocities update first, then positions. Every step
//! ends with a hard clamp of linear and angular speed to the stat maxima.

use glam::DVec2;

use dzone_core::catalog::TankStats;
use dzone_core::constants::*;
use dzone_core::geometry::{normalize_angle, normalize_or_zero};
use dzone_core::types::Body;

/// Advance one tank body by `dt` under the given thrust and rotation intents.
pub fn integrate_tank(body: &mut Body, stats: &TankStats, thrust: f64, rotation: f64, dt: f64) {
    if dt <= 0.0 {
        return;
    }

    if thrust != 0.0 {
        body.velocity += body.forward() * thrust * stats.speed * THRUST_ACCEL * dt;
    } else {
        body.velocity *= (1.0 - BRAKE_RATE * dt).max(0.0);
        if body.velocity.length() < MIN_SPEED {
            body.velocity = DVec2::ZERO;
        }
    }
    body.velocity = body.velocity.clamp_length_max(stats.max_speed());

    if rotation != 0.0 {
        let target = rotation * stats.rotation * ROTATION_POWER;
        let blend = (ROTATION_BLEND_RATE * dt).min(1.0);
        body.angular_velocity += (target - body.angular_velocity) * blend;
    } else {
        body.angular_velocity *= (1.0 - ROTATION_DECAY_RATE * dt).max(0.0);
        if body.angular_velocity.abs() < MIN_ANGULAR_SPEED {
            body.angular_velocity = 0.0;
        }
    }
    let max_spin = stats.max_angular_speed();
    body.angular_velocity = body.angular_velocity.clamp(-max_spin, max_spin);

    body.position += body.velocity * dt;
    body.angle = normalize_angle(body.angle + body.angular_velocity * dt);
}

/// Straight-line projectile motion.
pub fn integrate_projectile(position: &mut DVec2, velocity: DVec2, dt: f64) {
    *position += velocity * dt;
}

/// Bend `velocity` toward `desired` by blending unit directions with weight
/// `strength`, keeping its speed. Degenerate inputs leave it unchanged.
pub fn steer_toward(velocity: DVec2, desired: DVec2, strength: f64) -> DVec2 {
    let current = normalize_or_zero(velocity);
    let target = normalize_or_zero(desired);
    if current == DVec2::ZERO || target == DVec2::ZERO {
        return velocity;
    }
    let k = strength.clamp(0.0, 1.0);
    let blended = normalize_or_zero(current * (1.0 - k) + target * k);
    if blended == DVec2::ZERO {
        return velocity;
    }
    blended * velocity.length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dzone_core::catalog::Catalog;
    use dzone_core::enums::TankArchetype;
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn standard_stats() -> TankStats {
        Catalog::standard()
            .tank(TankArchetype::Standard)
            .unwrap()
            .stats
    }

    #[test]
    fn thrust_accelerates_along_facing() {
        let stats = standard_stats();
        let mut body = Body::at(DVec2::new(100.0, 100.0), FRAC_PI_2);
        integrate_tank(&mut body, &stats, 1.0, 0.0, DT);
        assert!(body.velocity.y > 0.0);
        assert!(body.velocity.x.abs() < 1e-9);
        assert!(body.position.y > 100.0);
    }

    #[test]
    fn speed_is_hard_clamped() {
        let stats = standard_stats();
        let mut body = Body::at(DVec2::ZERO, 0.0);
        body.velocity = DVec2::new(10_000.0, 0.0);
        integrate_tank(&mut body, &stats, 1.0, 0.0, DT);
        assert!(body.speed() <= stats.max_speed() + 1e-9);

        for _ in 0..600 {
            integrate_tank(&mut body, &stats, 1.0, 1.0, DT);
            assert!(body.speed() <= stats.max_speed() + 1e-9);
            assert!(body.angular_velocity.abs() <= stats.max_angular_speed() + 1e-9);
        }
    }

    #[test]
    fn braking_stops_the_tank() {
        let stats = standard_stats();
        let mut body = Body::at(DVec2::ZERO, 0.0);
        body.velocity = DVec2::new(80.0, 0.0);
        for _ in 0..300 {
            integrate_tank(&mut body, &stats, 0.0, 0.0, DT);
        }
        assert_eq!(body.velocity, DVec2::ZERO);
    }

    #[test]
    fn rotation_decays_to_zero_without_input() {
        let stats = standard_stats();
        let mut body = Body::at(DVec2::ZERO, 0.0);
        for _ in 0..30 {
            integrate_tank(&mut body, &stats, 0.0, 1.0, DT);
        }
        assert!(body.angular_velocity > 0.0);
        for _ in 0..60 {
            integrate_tank(&mut body, &stats, 0.0, 0.0, DT);
        }
        assert_eq!(body.angular_velocity, 0.0);
    }

    #[test]
    fn angle_stays_normalized() {
        let stats = standard_stats();
        let mut body = Body::at(DVec2::ZERO, 0.0);
        for _ in 0..2000 {
            integrate_tank(&mut body, &stats, 0.0, -1.0, DT);
            assert!((0.0..TAU).contains(&body.angle));
        }
    }

    #[test]
    fn steering_preserves_speed() {
        let v = DVec2::new(150.0, 0.0);
        let steered = steer_toward(v, DVec2::new(0.0, 1.0), 0.1);
        assert!((steered.length() - 150.0).abs() < 1e-9);
        assert!(steered.y > 0.0);
        let expected = normalize_or_zero(DVec2::new(0.9, 0.1)) * 150.0;
        assert!((steered - expected).length() < 1e-9);
    }

    #[test]
    fn steering_degenerate_is_noop() {
        let v = DVec2::new(10.0, 0.0);
        assert_eq!(steer_toward(v, DVec2::ZERO, 0.1), v);
        assert_eq!(steer_toward(DVec2::ZERO, DVec2::X, 0.1), DVec2::ZERO);
    }
}

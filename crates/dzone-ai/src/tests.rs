//! Tests for controller behavior.

use std::f64::consts::PI;

use glam::DVec2;

use dzone_core::types::TankId;

use crate::chase::{ChaseController, ChaseProfile};
use crate::controller::{ControllerContext, TankController, TargetInfo};

fn steady_profile() -> ChaseProfile {
    ChaseProfile {
        aim_jitter: 0.0,
        ..Default::default()
    }
}

fn context(angle: f64, enemy_at: DVec2) -> ControllerContext {
    ControllerContext {
        id: TankId(0),
        position: DVec2::new(100.0, 100.0),
        angle,
        alive: true,
        can_fire: true,
        energy: 100.0,
        others: vec![TargetInfo {
            id: TankId(1),
            position: enemy_at,
            velocity: DVec2::ZERO,
            alive: true,
        }],
        dt: 1.0 / 60.0,
    }
}

#[test]
fn test_turns_toward_enemy() {
    let mut ai = ChaseController::with_profile(1, steady_profile());
    // Enemy straight "down" on screen (+y); facing +x means turn positive.
    let intent = ai.decide(&context(0.0, DVec2::new(100.0, 400.0)));
    assert!(intent.rotation > 0.0);
    let intent = ai.decide(&context(PI, DVec2::new(100.0, 400.0)));
    assert!(intent.rotation < 0.0);
}

#[test]
fn test_holds_distance_band() {
    let mut ai = ChaseController::with_profile(1, steady_profile());
    let far = ai.decide(&context(0.0, DVec2::new(500.0, 100.0)));
    assert!(far.thrust > 0.0);
    let near = ai.decide(&context(0.0, DVec2::new(150.0, 100.0)));
    assert!(near.thrust < 0.0);
    let mid = ai.decide(&context(0.0, DVec2::new(250.0, 100.0)));
    assert_eq!(mid.thrust, 0.0);
}

#[test]
fn test_fires_on_cadence_when_aligned() {
    let mut ai = ChaseController::with_profile(1, steady_profile());
    let ctx = context(0.0, DVec2::new(300.0, 100.0));
    let mut shots = 0;
    // Two and a half simulated seconds at 60 Hz.
    for _ in 0..150 {
        if ai.decide(&ctx).fire {
            shots += 1;
        }
    }
    assert_eq!(shots, 2);
}

#[test]
fn test_holds_fire_out_of_range_or_unable() {
    let mut ai = ChaseController::with_profile(1, steady_profile());
    let mut ctx = context(0.0, DVec2::new(700.0, 100.0));
    for _ in 0..120 {
        assert!(!ai.decide(&ctx).fire);
    }
    ctx = context(0.0, DVec2::new(300.0, 100.0));
    ctx.can_fire = false;
    for _ in 0..120 {
        assert!(!ai.decide(&ctx).fire);
    }
}

#[test]
fn test_idle_without_targets_or_when_dead() {
    let mut ai = ChaseController::new(7);
    let mut ctx = context(0.0, DVec2::new(300.0, 100.0));
    ctx.others[0].alive = false;
    assert_eq!(ai.decide(&ctx), Default::default());
    let mut ctx = context(0.0, DVec2::new(300.0, 100.0));
    ctx.alive = false;
    assert_eq!(ai.decide(&ctx), Default::default());
}

#[test]
fn test_nearest_enemy_prefers_closest_living() {
    let mut ctx = context(0.0, DVec2::new(300.0, 100.0));
    ctx.others.push(TargetInfo {
        id: TankId(2),
        position: DVec2::new(120.0, 100.0),
        velocity: DVec2::ZERO,
        alive: false,
    });
    ctx.others.push(TargetInfo {
        id: TankId(3),
        position: DVec2::new(200.0, 100.0),
        velocity: DVec2::ZERO,
        alive: true,
    });
    assert_eq!(ctx.nearest_enemy().map(|t| t.id), Some(TankId(3)));
}

#[test]
fn test_same_seed_same_decisions() {
    let mut a = ChaseController::new(99);
    let mut b = ChaseController::new(99);
    let ctx = context(0.05, DVec2::new(300.0, 110.0));
    for _ in 0..600 {
        assert_eq!(a.decide(&ctx), b.decide(&ctx));
    }
}

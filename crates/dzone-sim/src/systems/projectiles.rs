//! Projectile system: guidance, straight-line motion, and lifetime expiry.

use glam::DVec2;
use hecs::World;

use dzone_core::constants::GUIDANCE_RANGE;
use dzone_core::events::CombatEvent;
use dzone_core::geometry::heading;
use dzone_core::types::TankId;

use crate::physics;
use crate::projectile::Projectile;
use crate::systems::{explosions, EntityIds};
use crate::tank::Tank;

pub fn run(world: &mut World, ids: &mut EntityIds, events: &mut Vec<CombatEvent>, dt: f64) {
    let mut targets: Vec<(TankId, DVec2)> = world
        .query::<&Tank>()
        .iter()
        .filter(|(_, tank)| tank.alive())
        .map(|(_, tank)| (tank.id, tank.body.position))
        .collect();
    targets.sort_by_key(|(id, _)| *id);

    let mut detonations = Vec::new();
    for (_entity, projectile) in world.query_mut::<&mut Projectile>() {
        if projectile.is_destroyed() {
            continue;
        }
        guide(projectile, &targets);
        physics::integrate_projectile(&mut projectile.position, projectile.velocity, dt);
        if projectile.velocity != DVec2::ZERO {
            projectile.angle = heading(projectile.velocity);
        }
        if let Some(detonation) = projectile.age(dt) {
            detonations.push((projectile.id, detonation));
        }
    }

    detonations.sort_by_key(|(id, _)| *id);
    for (_, detonation) in detonations {
        explosions::spawn(world, &detonation, ids, events);
    }
}

/// Re-steer a guided projectile. A locked target is kept while alive;
/// otherwise the nearest living non-owner tank in range is acquired.
pub fn guide(projectile: &mut Projectile, targets: &[(TankId, DVec2)]) {
    let Some(mut guidance) = projectile.guidance else {
        return;
    };

    let locked = guidance
        .target
        .and_then(|id| targets.iter().find(|(t, _)| *t == id));
    let target = locked.or_else(|| {
        targets
            .iter()
            .filter(|(id, _)| *id != projectile.owner)
            .map(|t| (t, t.1.distance(projectile.position)))
            .filter(|(_, d)| *d <= GUIDANCE_RANGE)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(t, _)| t)
    });

    guidance.target = target.map(|(id, _)| *id);
    if let Some((_, position)) = target {
        projectile.velocity = physics::steer_toward(
            projectile.velocity,
            *position - projectile.position,
            guidance.strength,
        );
    }
    projectile.guidance = Some(guidance);
}

//! Weapon resolver: turns a mounted weapon and its tank into projectiles.
//!
//! Every weapon type is a data recipe in the catalog; one generic spawn
//! routine reads it. Types the catalog does not carry fire the generic
//! fallback shot. The resolver never touches the tank: energy and ammo are
//! charged by the caller.

use std::f64::consts::PI;

use glam::DVec2;

use dzone_core::catalog::{Catalog, WeaponSpec};
use dzone_core::constants::GUIDANCE_STRENGTH;
use dzone_core::geometry::normalize_angle;

use crate::projectile::{Guidance, Projectile};
use crate::tank::{Tank, WeaponSlot};

/// Projectiles produced by firing `slot` from `tank`. Empty if either is missing.
pub fn fire(slot: Option<&WeaponSlot>, tank: Option<&Tank>, catalog: &Catalog) -> Vec<Projectile> {
    let (Some(slot), Some(tank)) = (slot, tank) else {
        return Vec::new();
    };
    match catalog.weapon(slot.weapon) {
        Some(spec) => spawn(spec, tank),
        None => spawn(&WeaponSpec::fallback(slot.weapon), tank),
    }
}

/// Angular offsets for `count` projectiles `spread` apart, centered on zero.
pub fn spread_offsets(count: u32, spread: f64) -> Vec<f64> {
    let center = (count as f64 - 1.0) / 2.0;
    (0..count).map(|i| (i as f64 - center) * spread).collect()
}

fn spawn(spec: &WeaponSpec, tank: &Tank) -> Vec<Projectile> {
    let (origin, heading) = if spec.rearward {
        (tank.rear_fire_point(), normalize_angle(tank.body.angle + PI))
    } else {
        (tank.fire_point(), tank.body.angle)
    };

    spread_offsets(spec.spawn_count.max(1), spec.spread_angle)
        .into_iter()
        .map(|offset| {
            let angle = normalize_angle(heading + offset);
            let mut projectile = Projectile::new(
                tank.id,
                spec.weapon,
                origin,
                DVec2::from_angle(angle) * spec.speed,
                angle,
                spec.damage,
                spec.projectile_radius,
                spec.lifetime,
            );
            projectile.explosion_radius = spec.explosion_radius;
            if spec.guided {
                projectile.guidance = Some(Guidance {
                    target: None,
                    strength: GUIDANCE_STRENGTH,
                });
            }
            projectile
        })
        .collect()
}

//! Cleanup system: removes destroyed projectiles and finished explosions.
//! Destroyed tanks stay in the world as wrecks until the next round rebuild.

use hecs::{Entity, World};

use crate::explosion::Explosion;
use crate::projectile::Projectile;

/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.is_destroyed() {
            despawn_buffer.push(entity);
        }
    }

    for (entity, explosion) in world.query_mut::<&Explosion>() {
        if explosion.is_finished() {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

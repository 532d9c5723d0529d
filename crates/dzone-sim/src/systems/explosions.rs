//! Explosion timers and spawning.

use hecs::World;

use dzone_core::events::CombatEvent;
use dzone_core::types::ExplosionId;

use crate::explosion::Explosion;
use crate::projectile::Detonation;
use crate::systems::EntityIds;

/// Count down every explosion.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, explosion) in world.query_mut::<&mut Explosion>() {
        explosion.update(dt);
    }
}

/// Spawn the explosion for a detonated projectile.
pub fn spawn(
    world: &mut World,
    detonation: &Detonation,
    ids: &mut EntityIds,
    events: &mut Vec<CombatEvent>,
) -> ExplosionId {
    let mut explosion = Explosion::from_detonation(detonation);
    explosion.id = ids.explosion();
    events.push(CombatEvent::ExplosionSpawned {
        explosion: explosion.id,
        owner: explosion.owner,
        x: explosion.position.x,
        y: explosion.position.y,
        radius: explosion.damage_radius,
    });
    let id = explosion.id;
    world.spawn((explosion,));
    id
}

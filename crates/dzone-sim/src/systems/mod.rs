//! Per-tick systems over the simulation world.
//!
//! Systems are free functions taking `&mut World` plus the resources they
//! touch. They collect first and apply second to keep hecs borrows short,
//! and anything order-sensitive is processed in ascending id order.

pub mod cleanup;
pub mod collision;
pub mod control;
pub mod explosions;
pub mod movement;
pub mod projectiles;
pub mod snapshot;

use hecs::{Entity, World};

use dzone_core::types::{ExplosionId, ProjectileId, TankId};

use crate::tank::Tank;

/// Id counters for transient entities.
#[derive(Debug, Clone, Default)]
pub struct EntityIds {
    next_projectile: u32,
    next_explosion: u32,
}

impl EntityIds {
    pub fn projectile(&mut self) -> ProjectileId {
        let id = ProjectileId(self.next_projectile);
        self.next_projectile += 1;
        id
    }

    pub fn explosion(&mut self) -> ExplosionId {
        let id = ExplosionId(self.next_explosion);
        self.next_explosion += 1;
        id
    }
}

/// All tank entities in ascending id order.
pub fn tanks_by_id(world: &World) -> Vec<(Entity, TankId)> {
    let mut tanks: Vec<(Entity, TankId)> = world
        .query::<&Tank>()
        .iter()
        .map(|(entity, tank)| (entity, tank.id))
        .collect();
    tanks.sort_by_key(|(_, id)| *id);
    tanks
}

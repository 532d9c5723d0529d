//! Round construction: rebuilds every tank from its player record.

use glam::DVec2;
use hecs::World;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use dzone_core::catalog::Catalog;
use dzone_core::config::ArenaConfig;
use dzone_core::constants::{ARENA_HEIGHT, ARENA_WIDTH, SPAWN_POINTS};
use dzone_core::geometry::heading;
use dzone_core::types::SpawnPoint;

use crate::roster::Roster;
use crate::tank::Tank;

/// Spawn points scaled to `arena`, each facing the arena center.
pub fn spawn_points(arena: &ArenaConfig) -> Vec<SpawnPoint> {
    let scale = DVec2::new(arena.width / ARENA_WIDTH, arena.height / ARENA_HEIGHT);
    let center = DVec2::new(arena.width / 2.0, arena.height / 2.0);
    SPAWN_POINTS
        .iter()
        .map(|&(x, y)| {
            let position = DVec2::new(x, y) * scale;
            SpawnPoint {
                position,
                angle: heading(center - position),
            }
        })
        .collect()
}

/// Clear the world and spawn one fresh tank per player at shuffled spawn
/// points. Returns the number of tanks spawned.
pub fn setup_round(
    world: &mut World,
    roster: &Roster,
    catalog: &Catalog,
    arena: &ArenaConfig,
    rng: &mut ChaCha8Rng,
) -> usize {
    world.clear();

    let mut points = spawn_points(arena);
    points.shuffle(rng);
    if roster.len() > points.len() {
        log::warn!(
            "{} players for {} spawn points; some will share",
            roster.len(),
            points.len()
        );
    }

    let mut spawned = 0;
    for (i, record) in roster.iter().enumerate() {
        let spawn = points[i % points.len()];
        match Tank::from_record(record, catalog, spawn) {
            Some(tank) => {
                world.spawn((tank,));
                spawned += 1;
            }
            None => log::warn!("no catalog entry for {:?}; {} sits out", record.archetype, record.name),
        }
    }
    spawned
}

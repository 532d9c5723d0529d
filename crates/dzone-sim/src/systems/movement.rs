//! Tank motion: integrates intents into body state and regenerates energy.

use hecs::World;

use crate::physics;
use crate::tank::Tank;

/// Integrate every living tank by `dt`, then consume this frame's intents.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, tank) in world.query_mut::<&mut Tank>() {
        if tank.alive() {
            let (thrust, rotation) = tank.intents();
            let stats = *tank.stats();
            physics::integrate_tank(&mut tank.body, &stats, thrust, rotation, dt);
            tank.regen_energy(dt);
        }
        tank.clear_intents();
    }
}

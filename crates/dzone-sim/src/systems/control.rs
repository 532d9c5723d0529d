//! Control system: turns input or controller decisions into tank intents,
//! handles weapon selection, and fires.

use std::collections::BTreeMap;

use hecs::World;

use dzone_ai::{ControllerContext, TankController, TargetInfo};
use dzone_core::catalog::Catalog;
use dzone_core::events::CombatEvent;
use dzone_core::types::{ControlIntent, TankId};

use crate::input::InputState;
use crate::projectile::Projectile;
use crate::roster::Roster;
use crate::systems::{tanks_by_id, EntityIds};
use crate::tank::Tank;
use crate::weapon;

/// Controllers for non-human tanks, keyed by tank id.
pub type Controllers = BTreeMap<TankId, Box<dyn TankController>>;

/// Gather intents for every living tank and act on them.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    input: &InputState,
    controllers: &mut Controllers,
    roster: &Roster,
    catalog: &Catalog,
    ids: &mut EntityIds,
    events: &mut Vec<CombatEvent>,
    dt: f64,
) {
    let tanks = tanks_by_id(world);
    let others: Vec<TargetInfo> = tanks
        .iter()
        .filter_map(|(entity, _)| world.get::<&Tank>(*entity).ok().map(|t| target_info(&t)))
        .collect();

    let mut spawned: Vec<Projectile> = Vec::new();
    for (entity, id) in tanks {
        let Ok(mut tank) = world.get::<&mut Tank>(entity) else {
            continue;
        };
        if !tank.alive() {
            continue;
        }

        let is_human = roster.get(id).is_some_and(|r| r.is_human);
        let intent = if is_human {
            input.intent_for(id)
        } else if let Some(controller) = controllers.get_mut(&id) {
            controller.decide(&controller_context(&tank, &others, dt))
        } else {
            ControlIntent::default()
        };

        apply_intent(&mut tank, &intent);
        if intent.fire {
            let shots = try_fire(&mut tank, catalog);
            if let Some(first) = shots.first() {
                log::debug!("{} fired {:?} x{}", id, first.weapon, shots.len());
                events.push(CombatEvent::WeaponFired {
                    tank: id,
                    weapon: first.weapon,
                    projectiles: shots.len() as u32,
                });
            }
            spawned.extend(shots);
        }
    }

    for mut projectile in spawned {
        projectile.id = ids.projectile();
        world.spawn((projectile,));
    }
}

/// Apply selection and motion intents to a tank.
pub fn apply_intent(tank: &mut Tank, intent: &ControlIntent) {
    if let Some(port) = intent.select_port {
        tank.switch_port(port);
    }
    if intent.next_weapon {
        tank.next_weapon();
    }
    tank.thrust(intent.thrust);
    tank.rotate(intent.rotation);
}

/// Fire the active weapon if the tank can. On success energy and ammo are
/// charged exactly once; otherwise the tank is untouched.
pub fn try_fire(tank: &mut Tank, catalog: &Catalog) -> Vec<Projectile> {
    if !tank.can_fire() {
        return Vec::new();
    }
    let Some(slot) = tank.current_weapon().copied() else {
        return Vec::new();
    };
    let shots = weapon::fire(Some(&slot), Some(&*tank), catalog);
    if !shots.is_empty() {
        tank.consume_energy(slot.energy_cost);
        tank.consume_ammo();
    }
    shots
}

fn target_info(tank: &Tank) -> TargetInfo {
    TargetInfo {
        id: tank.id,
        position: tank.body.position,
        velocity: tank.body.velocity,
        alive: tank.alive(),
    }
}

fn controller_context(tank: &Tank, others: &[TargetInfo], dt: f64) -> ControllerContext {
    ControllerContext {
        id: tank.id,
        position: tank.body.position,
        angle: tank.body.angle,
        alive: tank.alive(),
        can_fire: tank.can_fire(),
        energy: tank.energy(),
        others: others.iter().filter(|t| t.id != tank.id).copied().collect(),
        dt,
    }
}

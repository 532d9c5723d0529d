//! Snapshot builder: projects the world into render-facing views.

use hecs::World;

use dzone_core::config::GameRules;
use dzone_core::events::CombatEvent;
use dzone_core::state::{ExplosionView, GameStateSnapshot, PlayerView, ProjectileView, TankView};
use dzone_core::types::SimTime;

use crate::explosion::Explosion;
use crate::projectile::Projectile;
use crate::roster::Roster;
use crate::round::RoundState;
use crate::tank::{Ammo, Tank};

/// Build a complete snapshot, every list in ascending id order.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    round: &RoundState,
    rules: &GameRules,
    roster: &Roster,
    paused: bool,
    events: Vec<CombatEvent>,
) -> GameStateSnapshot {
    let mut tanks: Vec<TankView> = world
        .query::<&Tank>()
        .iter()
        .map(|(_, tank)| tank_view(tank))
        .collect();
    tanks.sort_by_key(|t| t.id);

    let mut projectiles: Vec<ProjectileView> = world
        .query::<&Projectile>()
        .iter()
        .filter(|(_, p)| !p.is_destroyed())
        .map(|(_, p)| ProjectileView {
            id: p.id,
            owner: p.owner,
            weapon: p.weapon,
            position: p.position,
            angle: p.angle,
            radius: p.radius,
        })
        .collect();
    projectiles.sort_by_key(|p| p.id);

    let mut explosions: Vec<ExplosionView> = world
        .query::<&Explosion>()
        .iter()
        .map(|(_, e)| ExplosionView {
            id: e.id,
            position: e.position,
            progress: e.progress(),
            radius: e.current_radius(),
        })
        .collect();
    explosions.sort_by_key(|e| e.id);

    let players = roster
        .iter()
        .map(|r| PlayerView {
            id: r.id,
            name: r.name.clone(),
            is_human: r.is_human,
            score: r.score,
            credits: r.credits,
            kills: r.kills,
            deaths: r.deaths,
        })
        .collect();

    GameStateSnapshot {
        time: *time,
        phase: round.phase(),
        paused,
        round: round.round(),
        max_rounds: rules.max_rounds,
        time_remaining: round.time_remaining(rules),
        tanks,
        projectiles,
        explosions,
        players,
        events,
    }
}

fn tank_view(tank: &Tank) -> TankView {
    let slot = tank.current_weapon();
    TankView {
        id: tank.id,
        archetype: tank.archetype,
        position: tank.body.position,
        angle: tank.body.angle,
        size: tank.stats().size,
        alive: tank.alive(),
        shield: tank.shield(),
        max_shield: tank.stats().max_shield,
        energy: tank.energy(),
        max_energy: tank.stats().max_energy,
        port: tank.port(),
        weapon: slot.map(|s| s.weapon),
        ammo: slot.and_then(|s| match s.ammo {
            Ammo::Unlimited => None,
            Ammo::Rounds(n) => Some(n),
        }),
    }
}

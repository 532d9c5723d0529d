//! Collision system.
//!
//! Runs once per tick in a fixed order:
//! 1. tank-vs-tank contact (SAT on hull triangles): positional separation
//!    plus a restitution impulse along the center-to-center normal;
//! 2. arena boundaries: tanks clamped and bounced, projectiles that leave
//!    the arena destroyed;
//! 3. projectile-vs-tank hits (point in hull), never against the owner;
//! 4. explosion area damage with linear falloff and knockback, applied at
//!    most once per (explosion, tank) pair.
//!
//! Hits and kills feed the roster's score and the match totals.

use glam::DVec2;
use hecs::{Entity, World};

use dzone_core::config::{ArenaConfig, GameRules};
use dzone_core::constants::{EXPLOSION_KNOCKBACK, TANK_RESTITUTION};
use dzone_core::events::CombatEvent;
use dzone_core::geometry::{
    circles_intersect, hull_radius, normalize_or_zero, point_in_polygon, polygons_intersect,
    tank_triangle,
};
use dzone_core::types::{ExplosionId, ProjectileId, TankId};

use crate::explosion::Explosion;
use crate::projectile::Projectile;
use crate::roster::Roster;
use crate::round::MatchStats;
use crate::scoring;
use crate::systems::{explosions, tanks_by_id, EntityIds};
use crate::tank::Tank;

/// Mutable resources the collision pass writes to.
pub struct CollisionContext<'a> {
    pub arena: &'a ArenaConfig,
    pub rules: &'a GameRules,
    pub roster: &'a mut Roster,
    pub stats: &'a mut MatchStats,
    pub ids: &'a mut EntityIds,
    pub events: &'a mut Vec<CombatEvent>,
}

pub fn run(world: &mut World, ctx: &mut CollisionContext) {
    resolve_tank_contacts(world);
    enforce_boundaries(world, ctx);
    resolve_projectile_hits(world, ctx);
    apply_blast_damage(world, ctx);
}

struct Contact {
    entity: Entity,
    position: DVec2,
    velocity: DVec2,
    angle: f64,
    size: f64,
}

/// Push overlapping tanks apart and exchange momentum along the contact normal.
pub fn resolve_tank_contacts(world: &mut World) {
    let mut contacts: Vec<Contact> = tanks_by_id(world)
        .into_iter()
        .filter_map(|(entity, _)| {
            let tank = world.get::<&Tank>(entity).ok()?;
            tank.alive().then(|| Contact {
                entity,
                position: tank.body.position,
                velocity: tank.body.velocity,
                angle: tank.body.angle,
                size: tank.stats().size,
            })
        })
        .collect();

    for i in 0..contacts.len() {
        for j in (i + 1)..contacts.len() {
            let (head, tail) = contacts.split_at_mut(j);
            let (a, b) = (&mut head[i], &mut tail[0]);
            if !circles_intersect(a.position, hull_radius(a.size), b.position, hull_radius(b.size)) {
                continue;
            }
            let hull_a = tank_triangle(a.position, a.angle, a.size);
            let hull_b = tank_triangle(b.position, b.angle, b.size);
            if !polygons_intersect(&hull_a, &hull_b) {
                continue;
            }
            let delta = b.position - a.position;
            let normal = normalize_or_zero(delta);
            if normal == DVec2::ZERO {
                continue;
            }
            let overlap = ((a.size + b.size) / 2.0 - delta.length()).max(0.0);
            a.position -= normal * (overlap / 2.0);
            b.position += normal * (overlap / 2.0);

            let closing = (b.velocity - a.velocity).dot(normal);
            if closing < 0.0 {
                let impulse = -(1.0 + TANK_RESTITUTION) * closing / 2.0;
                a.velocity -= normal * impulse;
                b.velocity += normal * impulse;
            }
        }
    }

    for contact in contacts {
        if let Ok(mut tank) = world.get::<&mut Tank>(contact.entity) {
            tank.body.position = contact.position;
            tank.body.velocity = contact.velocity;
        }
    }
}

/// Keep tanks inside the arena and remove projectiles that left it.
pub fn enforce_boundaries(world: &mut World, ctx: &mut CollisionContext) {
    let arena = ctx.arena;
    for (_entity, tank) in world.query_mut::<&mut Tank>() {
        let margin = tank.stats().size / 2.0;
        let body = &mut tank.body;
        clamp_axis(
            &mut body.position.x,
            &mut body.velocity.x,
            margin,
            arena.width - margin,
            arena.wall_restitution,
        );
        clamp_axis(
            &mut body.position.y,
            &mut body.velocity.y,
            margin,
            arena.height - margin,
            arena.wall_restitution,
        );
    }

    let mut detonations = Vec::new();
    for (_entity, projectile) in world.query_mut::<&mut Projectile>() {
        if projectile.is_destroyed() {
            continue;
        }
        if !arena.contains(projectile.position.x, projectile.position.y) {
            if let Some(detonation) = projectile.destroy() {
                detonations.push((projectile.id, detonation));
            }
        }
    }
    detonations.sort_by_key(|(id, _)| *id);
    for (_, detonation) in detonations {
        explosions::spawn(world, &detonation, ctx.ids, ctx.events);
    }
}

fn clamp_axis(position: &mut f64, velocity: &mut f64, min: f64, max: f64, restitution: f64) {
    if min > max {
        *position = (min + max) / 2.0;
        return;
    }
    if *position < min {
        *position = min;
        if *velocity < 0.0 {
            *velocity = -*velocity * restitution;
        }
    } else if *position > max {
        *position = max;
        if *velocity > 0.0 {
            *velocity = -*velocity * restitution;
        }
    }
}

/// Direct hits: a projectile inside a living non-owner hull is destroyed
/// and deals its damage. Explosive rounds also detonate.
pub fn resolve_projectile_hits(world: &mut World, ctx: &mut CollisionContext) {
    let hulls: Vec<(Entity, TankId, [DVec2; 3])> = tanks_by_id(world)
        .into_iter()
        .filter_map(|(entity, id)| {
            let tank = world.get::<&Tank>(entity).ok()?;
            tank.alive().then(|| (entity, id, tank.hull()))
        })
        .collect();

    let mut projectiles: Vec<(Entity, ProjectileId)> = world
        .query::<&Projectile>()
        .iter()
        .filter(|(_, p)| !p.is_destroyed())
        .map(|(entity, p)| (entity, p.id))
        .collect();
    projectiles.sort_by_key(|(_, id)| *id);

    for (projectile_entity, projectile_id) in projectiles {
        let Ok((owner, position, damage)) = world
            .get::<&Projectile>(projectile_entity)
            .map(|p| (p.owner, p.position, p.damage))
        else {
            continue;
        };

        let target = hulls.iter().find(|(entity, id, hull)| {
            *id != owner
                && point_in_polygon(position, hull)
                && world.get::<&Tank>(*entity).is_ok_and(|t| t.alive())
        });
        let Some(&(tank_entity, target_id, _)) = target else {
            continue;
        };

        let detonation = world
            .get::<&mut Projectile>(projectile_entity)
            .ok()
            .and_then(|mut p| p.destroy());

        let (applied, destroyed) = match world.get::<&mut Tank>(tank_entity) {
            Ok(mut tank) => {
                let applied = tank.take_damage(damage);
                (applied, !tank.alive())
            }
            Err(_) => continue,
        };

        log::debug!("{owner} hit {target_id} for {applied:.1}");
        ctx.events.push(CombatEvent::ProjectileHit {
            projectile: projectile_id,
            owner,
            target: target_id,
            damage: applied,
        });
        record_damage(ctx, owner, target_id, applied, destroyed);

        if let Some(detonation) = detonation {
            explosions::spawn(world, &detonation, ctx.ids, ctx.events);
        }
    }
}

/// Area damage: each living tank inside an explosion's radius takes falloff
/// damage and knockback once per explosion.
pub fn apply_blast_damage(world: &mut World, ctx: &mut CollisionContext) {
    let mut blasts: Vec<(Entity, ExplosionId)> = world
        .query::<&Explosion>()
        .iter()
        .filter(|(_, e)| e.damage > 0.0 && !e.is_finished())
        .map(|(entity, e)| (entity, e.id))
        .collect();
    blasts.sort_by_key(|(_, id)| *id);
    let tanks = tanks_by_id(world);

    for (blast_entity, explosion_id) in blasts {
        for &(tank_entity, target_id) in &tanks {
            let Some(blast) = measure_blast(world, blast_entity, tank_entity, target_id) else {
                continue;
            };

            let (applied, destroyed) = match world.get::<&mut Tank>(tank_entity) {
                Ok(mut tank) => {
                    let applied = tank.take_damage(blast.amount);
                    let away = normalize_or_zero(tank.body.position - blast.center);
                    tank.body.velocity += away * EXPLOSION_KNOCKBACK * blast.falloff;
                    (applied, !tank.alive())
                }
                Err(_) => continue,
            };
            if let Ok(mut explosion) = world.get::<&mut Explosion>(blast_entity) {
                explosion.mark_damaged(target_id);
            }

            ctx.events.push(CombatEvent::BlastDamage {
                explosion: explosion_id,
                owner: blast.owner,
                target: target_id,
                damage: applied,
            });
            record_damage(ctx, blast.owner, target_id, applied, destroyed);
        }
    }
}

struct BlastReading {
    center: DVec2,
    owner: TankId,
    amount: f64,
    /// 1 at the center, 0 at the edge.
    falloff: f64,
}

/// Damage one explosion would deal to one tank right now, if any.
fn measure_blast(world: &World, blast: Entity, tank: Entity, target: TankId) -> Option<BlastReading> {
    let explosion = world.get::<&Explosion>(blast).ok()?;
    if !explosion.can_damage(target) {
        return None;
    }
    let tank = world.get::<&Tank>(tank).ok()?;
    if !tank.alive() {
        return None;
    }
    let amount = explosion.damage_at(tank.body.position.distance(explosion.position));
    (amount > 0.0).then(|| BlastReading {
        center: explosion.position,
        owner: explosion.owner,
        amount,
        falloff: amount / explosion.damage,
    })
}

fn record_damage(
    ctx: &mut CollisionContext,
    owner: TankId,
    target: TankId,
    applied: f64,
    destroyed: bool,
) {
    scoring::award_hit(ctx.roster, ctx.rules, owner, target, applied);
    ctx.stats.total_damage += applied;
    if destroyed {
        let killer = (owner != target).then_some(owner);
        log::info!("{target} destroyed by {killer:?}");
        scoring::award_kill(ctx.roster, killer, target);
        ctx.stats.total_kills += 1;
        ctx.events.push(CombatEvent::TankDestroyed {
            tank: target,
            killer,
        });
    }
}

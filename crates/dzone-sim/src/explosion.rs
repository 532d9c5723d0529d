//! Explosions: expanding blasts that damage each tank in range at most once.

use std::collections::BTreeSet;

use glam::DVec2;

use dzone_core::constants::EXPLOSION_DURATION;
use dzone_core::types::{ExplosionId, TankId};

use crate::projectile::Detonation;

/// Explosion component.
#[derive(Debug, Clone)]
pub struct Explosion {
    pub id: ExplosionId,
    pub owner: TankId,
    pub position: DVec2,
    /// Damage at the center.
    pub damage: f64,
    /// Falloff reaches zero here.
    pub damage_radius: f64,
    /// Visual radius at full progress.
    pub max_radius: f64,
    pub remaining: f64,
    pub duration: f64,
    damaged: BTreeSet<TankId>,
}

impl Explosion {
    pub fn new(owner: TankId, position: DVec2, damage: f64, radius: f64) -> Self {
        Self {
            id: ExplosionId::default(),
            owner,
            position,
            damage,
            damage_radius: radius,
            max_radius: radius,
            remaining: EXPLOSION_DURATION,
            duration: EXPLOSION_DURATION,
            damaged: BTreeSet::new(),
        }
    }

    pub fn from_detonation(det: &Detonation) -> Self {
        Self::new(det.owner, det.position, det.damage, det.radius)
    }

    pub fn update(&mut self, dt: f64) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    /// 0 at spawn, 1 when finished.
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (1.0 - self.remaining / self.duration).clamp(0.0, 1.0)
    }

    pub fn current_radius(&self) -> f64 {
        self.max_radius * self.progress()
    }

    pub fn is_finished(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Falloff damage at `distance` from the center: full at 0, zero at the radius.
    pub fn damage_at(&self, distance: f64) -> f64 {
        if self.damage_radius <= 0.0 || distance >= self.damage_radius {
            return 0.0;
        }
        self.damage * (1.0 - distance.max(0.0) / self.damage_radius)
    }

    /// True if `target` has not yet been hit by this explosion.
    pub fn can_damage(&self, target: TankId) -> bool {
        self.damage > 0.0 && !self.is_finished() && !self.damaged.contains(&target)
    }

    /// Record that `target` has taken this explosion's damage.
    pub fn mark_damaged(&mut self, target: TankId) {
        self.damaged.insert(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_runs_zero_to_one() {
        let mut e = Explosion::new(TankId(0), DVec2::ZERO, 10.0, 30.0);
        assert_eq!(e.progress(), 0.0);
        e.update(0.5);
        assert!((e.progress() - 0.5).abs() < 1e-12);
        assert!((e.current_radius() - 15.0).abs() < 1e-12);
        e.update(0.6);
        assert_eq!(e.progress(), 1.0);
        assert!(e.is_finished());
    }

    #[test]
    fn falloff_decreases_to_zero_at_radius() {
        let e = Explosion::new(TankId(0), DVec2::ZERO, 40.0, 20.0);
        assert_eq!(e.damage_at(0.0), 40.0);
        assert_eq!(e.damage_at(10.0), 20.0);
        assert_eq!(e.damage_at(20.0), 0.0);
        assert_eq!(e.damage_at(25.0), 0.0);
        let mut last = f64::INFINITY;
        for step in 0..20 {
            let d = e.damage_at(step as f64);
            assert!(d < last);
            last = d;
        }
    }

    #[test]
    fn damage_is_tracked_per_target() {
        let mut e = Explosion::new(TankId(0), DVec2::ZERO, 40.0, 20.0);
        assert!(e.can_damage(TankId(1)));
        e.mark_damaged(TankId(1));
        assert!(!e.can_damage(TankId(1)));
        assert!(e.can_damage(TankId(2)));
    }
}

//! Projectiles: transient shots with a bounded lifetime.

use glam::DVec2;

use dzone_core::enums::WeaponType;
use dzone_core::types::{ProjectileId, TankId};

/// Homing capability of a guided projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guidance {
    /// Tank currently being chased. Reacquired when lost.
    pub target: Option<TankId>,
    /// Direction blend per step, in [0, 1].
    pub strength: f64,
}

/// Parameters for the explosion a projectile leaves behind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detonation {
    pub position: DVec2,
    pub damage: f64,
    pub radius: f64,
    pub owner: TankId,
}

/// Projectile component.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: ProjectileId,
    /// Firing tank, used for attribution and self-hit exclusion.
    pub owner: TankId,
    pub weapon: WeaponType,
    pub position: DVec2,
    pub velocity: DVec2,
    pub angle: f64,
    pub damage: f64,
    pub radius: f64,
    /// Seconds left before expiry.
    pub lifetime: f64,
    /// Zero means no explosion.
    pub explosion_radius: f64,
    pub guidance: Option<Guidance>,
    destroyed: bool,
    exploded: bool,
}

impl Projectile {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        owner: TankId,
        weapon: WeaponType,
        position: DVec2,
        velocity: DVec2,
        angle: f64,
        damage: f64,
        radius: f64,
        lifetime: f64,
    ) -> Self {
        Self {
            id: ProjectileId::default(),
            owner,
            weapon,
            position,
            velocity,
            angle,
            damage,
            radius,
            lifetime,
            explosion_radius: 0.0,
            guidance: None,
            destroyed: false,
            exploded: false,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Count down the lifetime. Returns the detonation if this expired it.
    pub fn age(&mut self, dt: f64) -> Option<Detonation> {
        if self.destroyed {
            return None;
        }
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            self.destroy()
        } else {
            None
        }
    }

    /// Mark destroyed. Only the first call has any effect; it returns the
    /// detonation to spawn when the projectile carries an explosion radius.
    pub fn destroy(&mut self) -> Option<Detonation> {
        if self.destroyed {
            return None;
        }
        self.destroyed = true;
        if self.explosion_radius > 0.0 && !self.exploded {
            self.exploded = true;
            return Some(Detonation {
                position: self.position,
                damage: self.damage,
                radius: self.explosion_radius,
                owner: self.owner,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot(explosion_radius: f64) -> Projectile {
        let mut p = Projectile::new(
            TankId(0),
            WeaponType::Blaster,
            DVec2::new(10.0, 10.0),
            DVec2::new(100.0, 0.0),
            0.0,
            48.0,
            3.0,
            0.05,
        );
        p.explosion_radius = explosion_radius;
        p
    }

    #[test]
    fn destroy_happens_once() {
        let mut p = shot(25.0);
        let det = p.destroy().expect("first destroy detonates");
        assert_eq!(det.radius, 25.0);
        assert_eq!(det.damage, 48.0);
        assert!(p.destroy().is_none());
        assert!(p.is_destroyed());
    }

    #[test]
    fn plain_shot_leaves_no_explosion() {
        let mut p = shot(0.0);
        assert!(p.destroy().is_none());
        assert!(p.is_destroyed());
    }

    #[test]
    fn lifetime_expiry_destroys_once() {
        let mut p = shot(25.0);
        assert!(p.age(0.02).is_none());
        assert!(!p.is_destroyed());
        let before = p.lifetime;
        assert!(p.age(0.02).is_none());
        assert!(p.lifetime < before);
        assert!(p.age(0.02).is_some());
        assert!(p.is_destroyed());
        assert!(p.age(0.02).is_none());
    }
}

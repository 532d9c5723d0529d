//! Weapon and tank catalogs.
//!
//! The catalog is read-only reference data: weapon recipes grouped by port
//! and tank archetypes with their base stats and prices. A default table
//! ships with the crate; alternative tables can be loaded from JSON.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{Port, TankArchetype, UpgradeKind, WeaponType};
use crate::error::ConfigError;
use crate::player::Upgrades;

/// Recipe and shop data for one weapon type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub weapon: WeaponType,
    pub name: String,
    /// Damage per projectile.
    pub damage: f64,
    pub energy_cost: f64,
    /// Projectile speed (units/s). Zero for dropped bombs.
    pub speed: f64,
    /// Projectiles per shot.
    pub spawn_count: u32,
    /// Angle between adjacent projectiles of one shot (radians).
    pub spread_angle: f64,
    pub guided: bool,
    /// Area-damage radius; zero means no explosion.
    pub explosion_radius: f64,
    /// Seconds before the projectile expires.
    pub lifetime: f64,
    pub price: u32,
    /// Rounds per round of play; `None` is unlimited.
    #[serde(default)]
    pub ammo: Option<u32>,
    #[serde(default = "default_projectile_radius")]
    pub projectile_radius: f64,
    /// Fires out of the tank's back instead of its nose.
    #[serde(default)]
    pub rearward: bool,
}

fn default_projectile_radius() -> f64 {
    DEFAULT_PROJECTILE_RADIUS
}

impl WeaponSpec {
    pub fn port(&self) -> Port {
        self.weapon.port()
    }

    /// Recipe for weapon types the catalog has no entry for.
    pub fn fallback(weapon: WeaponType) -> Self {
        Self {
            weapon,
            name: "GENERIC".into(),
            damage: FALLBACK_DAMAGE,
            energy_cost: 0.0,
            speed: FALLBACK_SPEED,
            spawn_count: 1,
            spread_angle: 0.0,
            guided: false,
            explosion_radius: 0.0,
            lifetime: FALLBACK_LIFETIME,
            price: 0,
            ammo: None,
            projectile_radius: DEFAULT_PROJECTILE_RADIUS,
            rearward: false,
        }
    }
}

/// Derived stat block used by physics and damage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankStats {
    /// Thrust and top-speed multiplier.
    pub speed: f64,
    /// Turn-rate multiplier.
    pub rotation: f64,
    /// Incoming damage is divided by this.
    pub armor: f64,
    /// Hull size; drives the collision triangle and fire point.
    pub size: f64,
    pub max_shield: f64,
    pub max_energy: f64,
}

impl TankStats {
    pub fn max_speed(&self) -> f64 {
        self.speed * MAX_SPEED_PER_STAT
    }

    pub fn max_angular_speed(&self) -> f64 {
        self.rotation * ROTATION_POWER
    }

    /// Apply one upgrade level on top of this stat block.
    pub fn upgraded(mut self, kind: UpgradeKind) -> Self {
        match kind {
            UpgradeKind::Speed => self.speed *= SPEED_UPGRADE_FACTOR,
            UpgradeKind::Rotation => self.rotation *= ROTATION_UPGRADE_FACTOR,
            UpgradeKind::Armor => {
                self.armor *= ARMOR_UPGRADE_FACTOR;
                self.max_shield *= ARMOR_UPGRADE_FACTOR;
            }
            UpgradeKind::Energy => self.max_energy *= ENERGY_UPGRADE_FACTOR,
        }
        self
    }

    /// This block with every installed upgrade applied.
    pub fn with_upgrades(self, upgrades: &Upgrades) -> Self {
        UpgradeKind::ALL
            .iter()
            .filter(|kind| upgrades.level(**kind) > 0)
            .fold(self, |stats, kind| stats.upgraded(*kind))
    }
}

/// Base stats and price for one tank archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankSpec {
    pub archetype: TankArchetype,
    pub name: String,
    pub price: u32,
    pub stats: TankStats,
}

/// Complete weapon and tank reference tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// All weapons; per-port order defines the (port, index) lookup.
    pub weapons: Vec<WeaponSpec>,
    pub tanks: Vec<TankSpec>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    /// Parse a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for spec in &self.weapons {
            if spec.spawn_count == 0 {
                return Err(ConfigError::Invalid(format!(
                    "weapon {} fires zero projectiles",
                    spec.name
                )));
            }
        }
        for spec in &self.tanks {
            if spec.stats.armor <= 0.0 || spec.stats.size <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "tank {} has non-positive armor or size",
                    spec.name
                )));
            }
        }
        Ok(())
    }

    /// Weapons mounted on `port`, in shop order.
    pub fn port_weapons(&self, port: Port) -> impl Iterator<Item = &WeaponSpec> {
        self.weapons.iter().filter(move |w| w.port() == port)
    }

    /// Weapon at `index` within `port`, if any.
    pub fn weapon_at(&self, port: Port, index: usize) -> Option<&WeaponSpec> {
        self.port_weapons(port).nth(index)
    }

    /// Recipe for a weapon type, if the catalog carries one.
    pub fn weapon(&self, weapon: WeaponType) -> Option<&WeaponSpec> {
        self.weapons.iter().find(|w| w.weapon == weapon)
    }

    pub fn tank(&self, archetype: TankArchetype) -> Option<&TankSpec> {
        self.tanks.iter().find(|t| t.archetype == archetype)
    }

    /// The shipped tables.
    pub fn standard() -> Self {
        Self {
            weapons: standard_weapons(),
            tanks: standard_tanks(),
        }
    }
}

struct Recipe {
    damage: f64,
    energy: f64,
    speed: f64,
    lifetime: f64,
    count: u32,
    spread: f64,
    guided: bool,
    explosion: f64,
    price: u32,
}

impl Recipe {
    fn shot(damage: f64, energy: f64, speed: f64, lifetime: f64, price: u32) -> Self {
        Self {
            damage,
            energy,
            speed,
            lifetime,
            count: 1,
            spread: 0.0,
            guided: false,
            explosion: 0.0,
            price,
        }
    }

    fn spread(mut self, count: u32, spread: f64) -> Self {
        self.count = count;
        self.spread = spread;
        self
    }

    fn guided(mut self) -> Self {
        self.guided = true;
        self
    }

    fn blast(mut self, radius: f64) -> Self {
        self.explosion = radius;
        self
    }

    fn into_spec(self, weapon: WeaponType, name: &str) -> WeaponSpec {
        WeaponSpec {
            weapon,
            name: name.to_string(),
            damage: self.damage,
            energy_cost: self.energy,
            speed: self.speed,
            spawn_count: self.count,
            spread_angle: self.spread,
            guided: self.guided,
            explosion_radius: self.explosion,
            lifetime: self.lifetime,
            price: self.price,
            ammo: None,
            projectile_radius: DEFAULT_PROJECTILE_RADIUS,
            rearward: false,
        }
    }
}

fn standard_weapons() -> Vec<WeaponSpec> {
    use WeaponType::*;

    let rear = |mut spec: WeaponSpec| {
        spec.rearward = true;
        spec
    };
    let thin = |mut spec: WeaponSpec| {
        spec.projectile_radius = 1.0;
        spec
    };
    let limited = |ammo: u32, mut spec: WeaponSpec| {
        spec.ammo = Some(ammo);
        spec
    };

    vec![
        Recipe::shot(3.0, 4.0, 200.0, 3.0, 2).into_spec(Missile, "MISSILE"),
        Recipe::shot(3.0, 8.0, 200.0, 3.0, 100)
            .spread(2, PI / 8.0)
            .into_spec(DoubleMissile, "DOUBLE MISSILE"),
        Recipe::shot(3.0, 12.0, 150.0, 3.5, 600)
            .spread(3, PI / 12.0)
            .into_spec(TripleMissile, "TRIPLE MISSILE"),
        thin(Recipe::shot(6.0, 6.0, 400.0, 2.0, 150).into_spec(BeamLaser, "BEAM LASER")),
        thin(Recipe::shot(12.0, 10.0, 400.0, 2.5, 1650).into_spec(PowerLaser, "POWER LASER")),
        Recipe::shot(4.0, 15.0, 250.0, 3.5, 3350)
            .spread(3, PI / 24.0)
            .into_spec(TriStriker, "TRI-STRIKER"),
        Recipe::shot(48.0, 15.0, 150.0, 4.0, 650)
            .blast(25.0)
            .into_spec(Blaster, "BLASTER"),
        Recipe::shot(40.0, 18.0, 120.0, 5.0, 1200)
            .blast(30.0)
            .guided()
            .into_spec(GuideBlaster, "GUIDE BLASTER"),
        Recipe::shot(35.0, 20.0, 100.0, 6.0, 2500)
            .blast(35.0)
            .guided()
            .into_spec(BlastGuider, "BLAST GUIDER"),
        Recipe::shot(60.0, 25.0, 80.0, 7.0, 3400)
            .blast(40.0)
            .into_spec(NukeBlaster, "NUKE BLASTER"),
        Recipe::shot(8.0, 22.0, 140.0, 4.0, 3800)
            .spread(6, PI / 3.0)
            .into_spec(SwirlBlaster, "SWIRL BLASTER"),
        rear(
            Recipe::shot(4.0, 6.0, 200.0, 3.0, 130)
                .spread(2, PI / 16.0)
                .into_spec(RearDouble, "REAR DOUBLE"),
        ),
        rear(
            Recipe::shot(4.0, 8.0, 150.0, 4.0, 650)
                .spread(2, PI / 8.0)
                .guided()
                .into_spec(RearGuided, "REAR GUIDED"),
        ),
        rear(
            Recipe::shot(3.5, 12.0, 150.0, 4.0, 1000)
                .spread(4, PI / 4.0)
                .guided()
                .into_spec(RearChaos, "REAR CHAOS"),
        ),
        rear(
            Recipe::shot(5.0, 12.0, 180.0, 3.0, 2200)
                .spread(3, PI / 12.0)
                .into_spec(RearTriple, "REAR TRIPLE"),
        ),
        Recipe::shot(7.0, 12.0, 180.0, 3.0, 250)
            .spread(3, PI / 10.0)
            .into_spec(TriBreaker, "TRI BREAKER"),
        Recipe::shot(6.0, 5.0, 150.0, 4.0, 400)
            .guided()
            .into_spec(Guided, "GUIDED"),
        Recipe::shot(6.0, 18.0, 180.0, 3.0, 1350)
            .spread(5, PI / 12.0)
            .into_spec(QuintBreaker, "QUINT BREAKER"),
        Recipe::shot(6.0, 22.0, 160.0, 4.0, 2250)
            .spread(5, PI / 12.0)
            .guided()
            .into_spec(QuintGuider, "QUINT GUIDER"),
        Recipe::shot(6.0, 28.0, 180.0, 3.0, 4000)
            .spread(8, PI / 16.0)
            .into_spec(OctoBreaker, "OCTO BREAKER"),
        Recipe::shot(4.0, 20.0, 220.0, 5.0, 5400)
            .spread(4, PI / 6.0)
            .guided()
            .into_spec(SparkFiends, "SPARK FIENDS"),
        Recipe::shot(8.0, 8.0, 120.0, 3.0, 225).into_spec(Swirler, "SWIRLER"),
        Recipe::shot(5.0, 15.0, 80.0, 6.0, 800)
            .spread(3, PI / 6.0)
            .guided()
            .into_spec(ElectroBuds, "ELECTRO BUDS"),
        limited(
            3,
            Recipe::shot(100.0, 25.0, 0.0, 10.0, 500)
                .blast(60.0)
                .into_spec(NormalBomb, "NORMAL BOMB"),
        ),
        limited(
            1,
            Recipe::shot(350.0, 40.0, 0.0, 10.0, 3250)
                .blast(90.0)
                .into_spec(DeathBomb, "DEATH BOMB"),
        ),
    ]
}

fn standard_tanks() -> Vec<TankSpec> {
    let base = TankStats {
        speed: 1.0,
        rotation: 1.0,
        armor: 1.0,
        size: TANK_BASE_SIZE,
        max_shield: TANK_BASE_SHIELD,
        max_energy: TANK_BASE_ENERGY,
    };
    let spec = |archetype, name: &str, price, stats| TankSpec {
        archetype,
        name: name.to_string(),
        price,
        stats,
    };
    vec![
        spec(TankArchetype::Standard, "STANDARD", 1000, base),
        spec(
            TankArchetype::RotraI,
            "ROTRA I",
            1850,
            TankStats {
                rotation: 1.3,
                armor: 1.2,
                speed: 0.9,
                ..base
            },
        ),
        spec(
            TankArchetype::RotraII,
            "ROTRA II",
            2450,
            TankStats {
                rotation: 1.5,
                speed: 1.3,
                armor: 0.7,
                size: 18.0,
                ..base
            },
        ),
        spec(
            TankArchetype::OpecI,
            "OPEC I",
            3400,
            TankStats {
                speed: 1.4,
                rotation: 1.3,
                armor: 1.4,
                ..base
            },
        ),
        spec(
            TankArchetype::OpecII,
            "OPEC II",
            4750,
            TankStats {
                speed: 1.5,
                rotation: 1.4,
                armor: 1.6,
                ..base
            },
        ),
    ]
}

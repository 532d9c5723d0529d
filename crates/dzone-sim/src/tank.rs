//! The tank: primary combatant entity.
//!
//! Owns its kinematic body, shield and weapon energy pools, the per-port
//! weapon loadout with its own selection cursor, and the stat block derived
//! from archetype plus upgrades. Every mutation keeps shield and energy
//! inside [0, max]; reaching zero shield is terminal until the tank is rebuilt.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use dzone_core::catalog::{Catalog, TankSpec, TankStats, WeaponSpec};
use dzone_core::constants::ENERGY_REGEN_RATE;
use dzone_core::enums::{Port, TankArchetype, UpgradeKind, WeaponType};
use dzone_core::geometry::{normalize_angle, tank_triangle};
use dzone_core::player::{PlayerRecord, Upgrades};
use dzone_core::types::{Body, SpawnPoint, TankId};

/// Remaining shots for a mounted weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ammo {
    Unlimited,
    Rounds(u32),
}

/// A weapon mounted in a port.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponSlot {
    pub weapon: WeaponType,
    pub ammo: Ammo,
    pub energy_cost: f64,
}

impl WeaponSlot {
    pub fn from_spec(spec: &WeaponSpec) -> Self {
        Self {
            weapon: spec.weapon,
            ammo: spec.ammo.map_or(Ammo::Unlimited, Ammo::Rounds),
            energy_cost: spec.energy_cost,
        }
    }

    pub fn has_ammo(&self) -> bool {
        match self.ammo {
            Ammo::Unlimited => true,
            Ammo::Rounds(n) => n > 0,
        }
    }
}

/// Owned weapons for one port and which of them is active.
#[derive(Debug, Clone, Default, PartialEq)]
struct PortLoadout {
    owned: Vec<WeaponSlot>,
    cursor: usize,
}

impl PortLoadout {
    fn active(&self) -> Option<&WeaponSlot> {
        self.owned.get(self.cursor)
    }

    fn active_mut(&mut self) -> Option<&mut WeaponSlot> {
        self.owned.get_mut(self.cursor)
    }
}

/// Tank component.
#[derive(Debug, Clone)]
pub struct Tank {
    pub id: TankId,
    pub archetype: TankArchetype,
    pub body: Body,
    alive: bool,
    shield: f64,
    energy: f64,
    base_stats: TankStats,
    stats: TankStats,
    upgrades: Upgrades,
    loadout: [PortLoadout; 7],
    port: Port,
    thrust: f64,
    rotation: f64,
}

impl Tank {
    /// Fresh tank with full pools and an empty loadout.
    pub fn new(id: TankId, spec: &TankSpec, spawn: SpawnPoint) -> Self {
        Self {
            id,
            archetype: spec.archetype,
            body: Body::at(spawn.position, normalize_angle(spawn.angle)),
            alive: true,
            shield: spec.stats.max_shield,
            energy: spec.stats.max_energy,
            base_stats: spec.stats,
            stats: spec.stats,
            upgrades: Upgrades::default(),
            loadout: Default::default(),
            port: Port::P1,
            thrust: 0.0,
            rotation: 0.0,
        }
    }

    /// Rebuild a tank from a persisted player record.
    ///
    /// Owned catalog indices the catalog does not know are skipped. Returns
    /// `None` if the record's archetype is missing from the catalog.
    pub fn from_record(record: &PlayerRecord, catalog: &Catalog, spawn: SpawnPoint) -> Option<Self> {
        let spec = catalog.tank(record.archetype)?;
        let mut tank = Tank::new(record.id, spec, spawn);
        for kind in UpgradeKind::ALL {
            tank.apply_upgrade(kind, record.upgrades.level(kind));
        }
        for port in Port::ALL {
            for &index in &record.owned_weapons[port.index()] {
                if let Some(weapon) = catalog.weapon_at(port, index) {
                    tank.equip(WeaponSlot::from_spec(weapon));
                }
            }
        }
        Some(tank)
    }

    // --- Control intents ---

    /// Set forward thrust for this frame, clamped to [-1, 1].
    pub fn thrust(&mut self, power: f64) {
        self.thrust = clamp_unit(power);
    }

    /// Set rotation power for this frame, clamped to [-1, 1].
    pub fn rotate(&mut self, power: f64) {
        self.rotation = clamp_unit(power);
    }

    /// Pending (thrust, rotation) intents.
    pub fn intents(&self) -> (f64, f64) {
        (self.thrust, self.rotation)
    }

    /// Intents are consumed once per frame.
    pub fn clear_intents(&mut self) {
        self.thrust = 0.0;
        self.rotation = 0.0;
    }

    // --- Health and energy ---

    pub fn alive(&self) -> bool {
        self.alive
    }

    pub fn shield(&self) -> f64 {
        self.shield
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn stats(&self) -> &TankStats {
        &self.stats
    }

    pub fn upgrades(&self) -> &Upgrades {
        &self.upgrades
    }

    /// Apply `amount` of raw damage, reduced by armor. Returns the shield
    /// actually removed. A destroyed tank takes no further damage.
    pub fn take_damage(&mut self, amount: f64) -> f64 {
        if !self.alive || amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let applied = (amount / self.stats.armor).min(self.shield);
        self.shield -= applied;
        if self.shield <= 0.0 {
            self.shield = 0.0;
            self.alive = false;
        }
        applied
    }

    /// Restore shield up to max. Returns the amount restored.
    pub fn heal(&mut self, amount: f64) -> f64 {
        if !self.alive || amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let healed = amount.min(self.stats.max_shield - self.shield);
        self.shield += healed;
        healed
    }

    pub fn consume_energy(&mut self, amount: f64) {
        if amount > 0.0 {
            self.energy = (self.energy - amount).max(0.0);
        }
    }

    /// Regenerate weapon energy for `dt` seconds while alive.
    pub fn regen_energy(&mut self, dt: f64) {
        if self.alive {
            self.energy = (self.energy + ENERGY_REGEN_RATE * dt).min(self.stats.max_energy);
        }
    }

    // --- Weapons ---

    pub fn port(&self) -> Port {
        self.port
    }

    /// Weapon in the active port.
    pub fn current_weapon(&self) -> Option<&WeaponSlot> {
        self.loadout[self.port.index()].active()
    }

    /// Weapon active in `port`.
    pub fn weapon_in(&self, port: Port) -> Option<&WeaponSlot> {
        self.loadout[port.index()].active()
    }

    /// Number of weapons owned in `port`.
    pub fn owned_count(&self, port: Port) -> usize {
        self.loadout[port.index()].owned.len()
    }

    /// Add a weapon to its port's owned set. Duplicates are ignored.
    pub fn equip(&mut self, slot: WeaponSlot) {
        let loadout = &mut self.loadout[slot.weapon.port().index()];
        if loadout.owned.iter().all(|owned| owned.weapon != slot.weapon) {
            loadout.owned.push(slot);
        }
    }

    /// Alive, a weapon in the active port, enough energy, and ammo left.
    pub fn can_fire(&self) -> bool {
        if !self.alive {
            return false;
        }
        match self.current_weapon() {
            Some(slot) => self.energy >= slot.energy_cost && slot.has_ammo(),
            None => false,
        }
    }

    /// Spend one round of the active weapon. An emptied weapon leaves the
    /// port and the next owned weapon in that port takes its place.
    pub fn consume_ammo(&mut self) {
        let loadout = &mut self.loadout[self.port.index()];
        let Some(slot) = loadout.active_mut() else {
            return;
        };
        if let Ammo::Rounds(n) = slot.ammo {
            let left = n.saturating_sub(1);
            slot.ammo = Ammo::Rounds(left);
            if left == 0 {
                loadout.owned.remove(loadout.cursor);
                if loadout.cursor >= loadout.owned.len() {
                    loadout.cursor = 0;
                }
            }
        }
    }

    /// Select port `n` (1-7). Out-of-range numbers are ignored.
    pub fn switch_port(&mut self, n: u8) -> bool {
        match Port::from_number(n) {
            Some(port) => {
                self.port = port;
                true
            }
            None => false,
        }
    }

    /// Cycle to the next owned weapon in the active port. No-op with fewer than two.
    pub fn next_weapon(&mut self) -> bool {
        let loadout = &mut self.loadout[self.port.index()];
        if loadout.owned.len() <= 1 {
            return false;
        }
        loadout.cursor = (loadout.cursor + 1) % loadout.owned.len();
        true
    }

    /// Install an upgrade level. Ignored unless higher than the current level.
    /// Added capacity is granted immediately.
    pub fn apply_upgrade(&mut self, kind: UpgradeKind, level: u8) -> bool {
        if !self.upgrades.raise(kind, level) {
            return false;
        }
        let old = self.stats;
        self.stats = self.base_stats.with_upgrades(&self.upgrades);
        self.shield =
            (self.shield + self.stats.max_shield - old.max_shield).clamp(0.0, self.stats.max_shield);
        self.energy =
            (self.energy + self.stats.max_energy - old.max_energy).clamp(0.0, self.stats.max_energy);
        true
    }

    // --- Geometry ---

    /// Collision hull: forward-pointing triangle.
    pub fn hull(&self) -> [DVec2; 3] {
        tank_triangle(self.body.position, self.body.angle, self.stats.size)
    }

    /// Where projectiles leave the tank: one hull size ahead of center.
    pub fn fire_point(&self) -> DVec2 {
        self.body.position + self.body.forward() * self.stats.size
    }

    /// Launch point for rear-firing weapons.
    pub fn rear_fire_point(&self) -> DVec2 {
        self.body.position - self.body.forward() * self.stats.size
    }
}

fn clamp_unit(power: f64) -> f64 {
    if power.is_nan() {
        0.0
    } else {
        power.clamp(-1.0, 1.0)
    }
}

//! Persistent per-player records. Tanks are rebuilt from these each round.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_UPGRADE_LEVEL;
use crate::enums::{Port, TankArchetype, UpgradeKind};
use crate::types::TankId;

/// Installed upgrade levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrades {
    pub speed: u8,
    pub rotation: u8,
    pub armor: u8,
    pub energy: u8,
}

impl Upgrades {
    pub fn level(&self, kind: UpgradeKind) -> u8 {
        match kind {
            UpgradeKind::Speed => self.speed,
            UpgradeKind::Rotation => self.rotation,
            UpgradeKind::Armor => self.armor,
            UpgradeKind::Energy => self.energy,
        }
    }

    /// Raise `kind` to `level`. Ignored unless it exceeds the stored level;
    /// capped at the max level. Returns whether anything changed.
    pub fn raise(&mut self, kind: UpgradeKind, level: u8) -> bool {
        let level = level.min(MAX_UPGRADE_LEVEL);
        let slot = match kind {
            UpgradeKind::Speed => &mut self.speed,
            UpgradeKind::Rotation => &mut self.rotation,
            UpgradeKind::Armor => &mut self.armor,
            UpgradeKind::Energy => &mut self.energy,
        };
        if level > *slot {
            *slot = level;
            true
        } else {
            false
        }
    }
}

/// Everything about a player that survives between rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: TankId,
    pub name: String,
    pub is_human: bool,
    pub score: u32,
    pub credits: u32,
    pub kills: u32,
    pub deaths: u32,
    pub damage_dealt: f64,
    pub damage_taken: f64,
    pub archetype: TankArchetype,
    /// Owned catalog indices per port, in purchase order.
    pub owned_weapons: [Vec<usize>; 7],
    pub upgrades: Upgrades,
}

impl PlayerRecord {
    /// Fresh record: a standard tank owning only the basic missile.
    pub fn new(id: TankId, name: impl Into<String>, is_human: bool, credits: u32) -> Self {
        let mut owned_weapons: [Vec<usize>; 7] = Default::default();
        owned_weapons[Port::P1.index()].push(0);
        Self {
            id,
            name: name.into(),
            is_human,
            score: 0,
            credits,
            kills: 0,
            deaths: 0,
            damage_dealt: 0.0,
            damage_taken: 0.0,
            archetype: TankArchetype::default(),
            owned_weapons,
            upgrades: Upgrades::default(),
        }
    }

    pub fn owns_weapon(&self, port: Port, index: usize) -> bool {
        self.owned_weapons[port.index()].contains(&index)
    }
}

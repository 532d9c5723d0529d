//! Between-round purchases applied to player records.
//!
//! Purchases never touch live tanks; the next round's rebuild picks them up.
//! Prices rise 5% for every 10 points of score.

use dzone_core::catalog::Catalog;
use dzone_core::constants::{MAX_UPGRADE_LEVEL, PRICE_SCORE_STEP, PRICE_STEP_FACTOR};
use dzone_core::enums::{Port, TankArchetype, UpgradeKind};
use dzone_core::error::ShopError;
use dzone_core::player::{PlayerRecord, Upgrades};

/// Price multiplier for a player with `score` points.
pub fn price_multiplier(score: u32) -> f64 {
    1.0 + (score / PRICE_SCORE_STEP) as f64 * PRICE_STEP_FACTOR
}

/// `base` scaled by the score multiplier, rounded down.
pub fn adjusted_price(base: u32, score: u32) -> u32 {
    (base as f64 * price_multiplier(score)).floor() as u32
}

fn charge(record: &mut PlayerRecord, base: u32) -> Result<u32, ShopError> {
    let price = adjusted_price(base, record.score);
    if record.credits < price {
        return Err(ShopError::InsufficientFunds {
            price,
            credits: record.credits,
        });
    }
    record.credits -= price;
    Ok(price)
}

/// Buy the weapon at `index` in `port`. Returns the price paid.
pub fn purchase_weapon(
    record: &mut PlayerRecord,
    catalog: &Catalog,
    port: Port,
    index: usize,
) -> Result<u32, ShopError> {
    let spec = catalog
        .weapon_at(port, index)
        .ok_or(ShopError::UnknownWeapon { port, index })?;
    if record.owns_weapon(port, index) {
        return Err(ShopError::AlreadyOwned);
    }
    let price = charge(record, spec.price)?;
    record.owned_weapons[port.index()].push(index);
    log::info!("{} bought {} for {price}", record.name, spec.name);
    Ok(price)
}

/// Swap to a different hull. Installed upgrades do not carry over.
pub fn purchase_tank(
    record: &mut PlayerRecord,
    catalog: &Catalog,
    archetype: TankArchetype,
) -> Result<u32, ShopError> {
    if record.archetype == archetype {
        return Err(ShopError::SameTank(archetype));
    }
    let spec = catalog
        .tank(archetype)
        .ok_or(ShopError::UnknownTank(archetype))?;
    let price = charge(record, spec.price)?;
    record.archetype = archetype;
    record.upgrades = Upgrades::default();
    log::info!("{} bought a {} for {price}", record.name, spec.name);
    Ok(price)
}

/// Install an upgrade on the current hull, priced at the hull's price.
pub fn purchase_upgrade(
    record: &mut PlayerRecord,
    catalog: &Catalog,
    kind: UpgradeKind,
) -> Result<u32, ShopError> {
    if record.upgrades.level(kind) >= MAX_UPGRADE_LEVEL {
        return Err(ShopError::UpgradeOwned(kind));
    }
    let spec = catalog
        .tank(record.archetype)
        .ok_or(ShopError::UnknownTank(record.archetype))?;
    let price = charge(record, spec.price)?;
    record.upgrades.raise(kind, MAX_UPGRADE_LEVEL);
    log::info!("{} installed {kind:?} upgrade for {price}", record.name);
    Ok(price)
}

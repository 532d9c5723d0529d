//! Error types for the fallible outer operations (configuration loading and shop).
//! Invalid in-simulation actions never produce errors; they are no-ops.

use thiserror::Error;

use crate::enums::{MatchPhase, Port, TankArchetype, UpgradeKind};
use crate::types::TankId;

/// Failure loading rules or catalog data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// A rejected shop purchase. The player record is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("shop is closed during {0:?}")]
    Closed(MatchPhase),
    #[error("no player for {0}")]
    UnknownPlayer(TankId),
    #[error("no weapon at port {} index {index}", .port.number())]
    UnknownWeapon { port: Port, index: usize },
    #[error("no tank archetype {0:?} in catalog")]
    UnknownTank(TankArchetype),
    #[error("weapon already owned")]
    AlreadyOwned,
    #[error("already driving a {0:?}")]
    SameTank(TankArchetype),
    #[error("upgrade {0:?} already installed")]
    UpgradeOwned(UpgradeKind),
    #[error("costs {price} credits, only {credits} available")]
    InsufficientFunds { price: u32, credits: u32 },
}

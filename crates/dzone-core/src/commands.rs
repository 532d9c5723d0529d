//! Commands sent to the simulation engine from an input layer.

use serde::{Deserialize, Serialize};

use crate::enums::Control;
use crate::types::TankId;

/// Commands applied at the next tick boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineCommand {
    /// Leave the menu and start round 1.
    StartMatch,
    /// A logical control went down for a human-driven tank.
    Press { tank: TankId, control: Control },
    /// A logical control came up for a human-driven tank.
    Release { tank: TankId, control: Control },
    /// Freeze the simulation. Commands are still accepted.
    Pause,
    Resume,
    /// Close the shop and start the next round.
    ContinueFromShop,
    /// Abandon the match and reset every player record.
    ReturnToMenu,
}

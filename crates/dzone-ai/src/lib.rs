//! Tank controllers for DZONE.
//!
//! A controller turns a read-only view of the arena into the same control
//! intents a human produces (thrust, rotation, fire, weapon selection).
//! No ECS dependency; operates on plain data.

pub mod chase;
pub mod controller;

pub use chase::ChaseController;
pub use controller::{ControllerContext, TankController, TargetInfo};
pub use dzone_core as core;

#[cfg(test)]
mod tests;

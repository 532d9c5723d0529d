//! Simulation engine for DZONE arena combat.
//!
//! Owns the hecs ECS world of tanks, projectiles, and explosions, runs the
//! per-frame systems in a fixed order, drives the round/match state machine,
//! and produces `GameStateSnapshot`s for renderers.

pub mod engine;
pub mod explosion;
pub mod input;
pub mod persistence;
pub mod physics;
pub mod projectile;
pub mod roster;
pub mod round;
pub mod scoring;
pub mod shop;
pub mod systems;
pub mod tank;
pub mod weapon;
pub mod world_setup;

pub use dzone_core as core;
pub use engine::{PlayerSeat, SimConfig, SimulationEngine};

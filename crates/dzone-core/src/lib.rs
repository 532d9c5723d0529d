//! Core types and definitions for the DZONE arena combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry helpers, ids, enums, tuning constants, weapon and tank
//! catalogs, rules, player records, commands, events, and state snapshots.
//! It holds no simulation state of its own.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod geometry;
pub mod player;
pub mod state;
pub mod types;

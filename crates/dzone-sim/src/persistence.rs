//! Save/load of match progress as pretty-printed JSON files, one per slot.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dzone_core::enums::MatchPhase;
use dzone_core::player::PlayerRecord;

use crate::round::MatchStats;

/// Bumped when the save layout changes incompatibly.
pub const SAVE_VERSION: u32 = 1;

/// Everything needed to resume a match between rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub seed: u64,
    pub round: u32,
    pub phase: MatchPhase,
    pub players: Vec<PlayerRecord>,
    pub stats: MatchStats,
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("invalid save slot name {0:?}")]
    InvalidSlot(String),
    #[error("no save in slot {0:?}")]
    NotFound(String),
    #[error("save version {found} is not supported (expected {})", SAVE_VERSION)]
    Version { found: u32 },
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

fn slot_path(dir: &Path, slot: &str) -> Result<PathBuf, PersistenceError> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(PersistenceError::InvalidSlot(slot.to_string()));
    }
    Ok(dir.join(format!("{slot}.json")))
}

/// Write `data` to `dir/slot.json`, creating `dir` if needed.
pub fn save_to_file(dir: &Path, slot: &str, data: &SaveData) -> Result<(), PersistenceError> {
    let path = slot_path(dir, slot)?;
    fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&path, json)?;
    log::info!("saved round {} to {}", data.round, path.display());
    Ok(())
}

/// Read `dir/slot.json`.
pub fn load_from_file(dir: &Path, slot: &str) -> Result<SaveData, PersistenceError> {
    let path = slot_path(dir, slot)?;
    if !path.exists() {
        return Err(PersistenceError::NotFound(slot.to_string()));
    }
    let json = fs::read_to_string(&path)?;
    let data: SaveData = serde_json::from_str(&json)?;
    if data.version != SAVE_VERSION {
        return Err(PersistenceError::Version {
            found: data.version,
        });
    }
    Ok(data)
}

/// Slot names present in `dir`, sorted. A missing directory has no saves.
pub fn list_saves(dir: &Path) -> Result<Vec<String>, PersistenceError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut slots: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
        .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
        .collect();
    slots.sort();
    Ok(slots)
}

/// Remove a slot. Deleting a missing slot is an error.
pub fn delete_save(dir: &Path, slot: &str) -> Result<(), PersistenceError> {
    let path = slot_path(dir, slot)?;
    if !path.exists() {
        return Err(PersistenceError::NotFound(slot.to_string()));
    }
    fs::remove_file(path)?;
    Ok(())
}

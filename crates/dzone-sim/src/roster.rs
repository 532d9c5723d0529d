//! The set of persistent player records for a match.

use serde::{Deserialize, Serialize};

use dzone_core::config::GameRules;
use dzone_core::player::PlayerRecord;
use dzone_core::types::TankId;

/// Player records indexed by tank id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<PlayerRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt existing records, e.g. from a save. Ids are reassigned by position.
    pub fn from_records(records: Vec<PlayerRecord>) -> Self {
        let players = records
            .into_iter()
            .enumerate()
            .map(|(i, mut record)| {
                record.id = TankId(i as u32);
                record
            })
            .collect();
        Self { players }
    }

    /// Register a new player and return its tank id.
    pub fn add_player(&mut self, name: impl Into<String>, is_human: bool, rules: &GameRules) -> TankId {
        let id = TankId(self.players.len() as u32);
        self.players
            .push(PlayerRecord::new(id, name, is_human, rules.starting_credits));
        id
    }

    pub fn get(&self, id: TankId) -> Option<&PlayerRecord> {
        self.players.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: TankId) -> Option<&mut PlayerRecord> {
        self.players.get_mut(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter()
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players by score, highest first; ties keep roster order.
    pub fn leaderboard(&self) -> Vec<&PlayerRecord> {
        let mut board: Vec<&PlayerRecord> = self.players.iter().collect();
        board.sort_by(|a, b| b.score.cmp(&a.score));
        board
    }

    /// Wipe progress but keep names and seats.
    pub fn reset(&mut self, rules: &GameRules) {
        for record in &mut self.players {
            *record = PlayerRecord::new(
                record.id,
                std::mem::take(&mut record.name),
                record.is_human,
                rules.starting_credits,
            );
        }
    }
}

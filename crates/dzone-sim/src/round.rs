//! Round and match state machine.
//!
//! `menu → playing → {shop | game-over} → playing → …`. The state machine
//! owns the round clock and decides the next phase; it never inspects tank
//! health. The engine reads the pending end signal, works out the winner,
//! and calls [`RoundState::end_round`].

use serde::{Deserialize, Serialize};

use dzone_core::config::GameRules;
use dzone_core::enums::{MatchPhase, RoundEndReason};
use dzone_core::types::TankId;

use crate::roster::Roster;
use crate::scoring;

/// Tolerance for the accumulated round clock.
const CLOCK_EPSILON: f64 = 1e-9;

/// Match-wide totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchStats {
    pub total_kills: u32,
    pub total_damage: f64,
    pub rounds_played: u32,
    /// Seconds spent in play across all rounds.
    pub time_elapsed: f64,
}

/// A request to end the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundEnd {
    pub reason: RoundEndReason,
    pub winner: Option<TankId>,
}

#[derive(Debug, Clone, Default)]
pub struct RoundState {
    round: u32,
    elapsed: f64,
    phase: MatchPhase,
    pending: Option<RoundEnd>,
    pub stats: MatchStats,
}

impl RoundState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Seconds into the current round.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn time_remaining(&self, rules: &GameRules) -> f64 {
        (rules.round_time_limit - self.elapsed).max(0.0)
    }

    pub fn pending(&self) -> Option<RoundEnd> {
        self.pending
    }

    /// Begin round 1 with fresh totals.
    pub fn start_match(&mut self) {
        self.round = 1;
        self.elapsed = 0.0;
        self.phase = MatchPhase::Playing;
        self.pending = None;
        self.stats = MatchStats::default();
    }

    /// Return to the menu.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Resume at a saved round and phase.
    pub fn restore(&mut self, round: u32, phase: MatchPhase, stats: MatchStats) {
        self.round = round;
        self.elapsed = 0.0;
        self.phase = phase;
        self.pending = None;
        self.stats = stats;
    }

    /// Advance the round clock. Reaching the limit raises a pending timeout.
    pub fn update(&mut self, dt: f64, rules: &GameRules) {
        if self.phase != MatchPhase::Playing {
            return;
        }
        self.elapsed += dt;
        self.stats.time_elapsed += dt;
        if self.pending.is_none() && self.elapsed + CLOCK_EPSILON >= rules.round_time_limit {
            self.pending = Some(RoundEnd {
                reason: RoundEndReason::Timeout,
                winner: None,
            });
        }
    }

    /// Raise a kill-based end. An already pending signal is kept.
    pub fn signal_kill(&mut self, winner: Option<TankId>) {
        if self.phase == MatchPhase::Playing && self.pending.is_none() {
            self.pending = Some(RoundEnd {
                reason: RoundEndReason::Kill,
                winner,
            });
        }
    }

    /// Consume the pending end signal.
    pub fn take_pending(&mut self) -> Option<RoundEnd> {
        self.pending.take()
    }

    /// Close the current round: award the winner, advance the counter,
    /// reset the clock, and pick the next phase. Every `shop_interval`-th
    /// round opens with the shop; passing `max_rounds` ends the match.
    pub fn end_round(
        &mut self,
        reason: RoundEndReason,
        winner: Option<TankId>,
        rules: &GameRules,
        roster: &mut Roster,
    ) -> MatchPhase {
        if self.phase != MatchPhase::Playing {
            return self.phase;
        }
        scoring::award_round_end(roster, rules, reason, winner);

        self.stats.rounds_played += 1;
        self.round += 1;
        self.elapsed = 0.0;
        self.pending = None;
        self.phase = if self.round > rules.max_rounds {
            MatchPhase::GameOver
        } else if self.round % rules.shop_interval.max(1) == 0 {
            MatchPhase::Shop
        } else {
            MatchPhase::Playing
        };
        log::info!(
            "round {} ended by {:?}, winner {:?}; next phase {:?}",
            self.round - 1,
            reason,
            winner,
            self.phase
        );
        self.phase
    }

    /// Leave the shop for the next round.
    pub fn continue_from_shop(&mut self) -> bool {
        if self.phase == MatchPhase::Shop {
            self.phase = MatchPhase::Playing;
            true
        } else {
            false
        }
    }
}

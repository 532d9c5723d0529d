//! Score and credit awards for hits, kills, and round outcomes.

use dzone_core::config::GameRules;
use dzone_core::enums::RoundEndReason;
use dzone_core::types::TankId;

use crate::roster::Roster;

/// Credit a hit of `applied` shield damage. Self-hits only count as damage taken.
pub fn award_hit(roster: &mut Roster, rules: &GameRules, owner: TankId, target: TankId, applied: f64) {
    if applied <= 0.0 {
        return;
    }
    if let Some(victim) = roster.get_mut(target) {
        victim.damage_taken += applied;
    }
    if owner == target {
        return;
    }
    if let Some(shooter) = roster.get_mut(owner) {
        let points = applied.min(rules.hit_points_damage_cap) * rules.hit_points_per_damage;
        let credits = applied * rules.hit_credits_per_damage;
        shooter.damage_dealt += applied;
        shooter.score += points.floor() as u32;
        shooter.credits += credits.floor() as u32;
    }
}

/// Record a destroyed tank. `killer` is `None` for self-inflicted kills.
pub fn award_kill(roster: &mut Roster, killer: Option<TankId>, victim: TankId) {
    if let Some(record) = roster.get_mut(victim) {
        record.deaths += 1;
    }
    if let Some(killer) = killer.filter(|k| *k != victim) {
        if let Some(record) = roster.get_mut(killer) {
            record.kills += 1;
        }
    }
}

/// Round-end bonus for the winner.
pub fn award_round_end(
    roster: &mut Roster,
    rules: &GameRules,
    reason: RoundEndReason,
    winner: Option<TankId>,
) {
    let Some(record) = winner.and_then(|w| roster.get_mut(w)) else {
        return;
    };
    match reason {
        RoundEndReason::Kill => {
            record.score += rules.kill_bonus_points;
            record.credits += rules.kill_bonus_credits;
        }
        RoundEndReason::Timeout => {
            record.score += rules.timeout_survivor_points;
        }
    }
}

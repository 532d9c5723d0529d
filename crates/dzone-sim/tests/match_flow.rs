//! Whole-match scenarios driven through the public engine API.

use dzone_ai::{ControllerContext, TankController};
use dzone_core::commands::EngineCommand;
use dzone_core::config::GameRules;
use dzone_core::constants::DT;
use dzone_core::enums::{MatchPhase, RoundEndReason};
use dzone_core::events::CombatEvent;
use dzone_core::types::{ControlIntent, TankId};
use dzone_sim::{PlayerSeat, SimConfig, SimulationEngine};

/// Spins in place and fires every other frame.
struct Turret {
    frame: u32,
}

impl TankController for Turret {
    fn decide(&mut self, _ctx: &ControllerContext) -> ControlIntent {
        self.frame += 1;
        ControlIntent {
            rotation: 1.0,
            fire: self.frame % 2 == 0,
            ..Default::default()
        }
    }
}

fn ai_match(rules: GameRules, seed: u64) -> SimulationEngine {
    SimulationEngine::new(SimConfig {
        seed,
        rules,
        seats: vec![
            PlayerSeat::ai("CPU 1"),
            PlayerSeat::ai("CPU 2"),
            PlayerSeat::ai("CPU 3"),
        ],
        ..Default::default()
    })
}

#[test]
fn full_ai_match_reaches_game_over() {
    let rules = GameRules::from_json(r#"{ "round_time_limit": 4.0, "max_rounds": 4 }"#).unwrap();
    assert_eq!(rules.shop_interval, 3);
    let mut engine = ai_match(rules, 9);
    engine.queue_command(EngineCommand::StartMatch);

    let mut rounds_ended = Vec::new();
    let mut shops = 0;
    for _ in 0..(4 * 4 * 60 + 100) {
        let snap = engine.tick(DT);
        for event in &snap.events {
            if let CombatEvent::RoundEnded { round, reason, .. } = event {
                rounds_ended.push((*round, *reason));
            }
        }
        match snap.phase {
            MatchPhase::Shop => {
                shops += 1;
                engine.queue_command(EngineCommand::ContinueFromShop);
            }
            MatchPhase::GameOver => break,
            _ => {}
        }
    }

    assert_eq!(engine.phase(), MatchPhase::GameOver);
    assert_eq!(
        rounds_ended.iter().map(|(r, _)| *r).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
    assert_eq!(shops, 1);
    assert_eq!(engine.round().stats.rounds_played, 4);
    assert!(engine.world().is_empty());

    let board = engine.roster().leaderboard();
    assert_eq!(board.len(), 3);
    assert!(board.windows(2).all(|w| w[0].score >= w[1].score));
    let kills: u32 = board.iter().map(|r| r.kills).sum();
    assert!(kills <= engine.round().stats.total_kills);
}

#[test]
fn scripted_controller_drives_tank() {
    let mut engine = SimulationEngine::new(SimConfig {
        seats: vec![PlayerSeat::ai("turret"), PlayerSeat::human("idle")],
        ..Default::default()
    });
    engine.set_controller(TankId(0), Box::new(Turret { frame: 0 }));
    engine.queue_command(EngineCommand::StartMatch);

    let mut shots = 0;
    for _ in 0..20 {
        let snap = engine.tick(DT);
        shots += snap
            .events
            .iter()
            .filter(|e| matches!(e, CombatEvent::WeaponFired { tank: TankId(0), .. }))
            .count();
        assert!(snap
            .events
            .iter()
            .all(|e| !matches!(e, CombatEvent::WeaponFired { tank: TankId(1), .. })));
    }
    assert_eq!(shots, 10);
}

#[test]
fn same_seed_same_match() {
    let rules = GameRules {
        round_time_limit: 3.0,
        max_rounds: 2,
        ..Default::default()
    };
    let run = |seed| {
        let mut engine = ai_match(rules.clone(), seed);
        engine.queue_command(EngineCommand::StartMatch);
        let mut log = Vec::new();
        for _ in 0..600 {
            let snap = engine.tick(DT);
            log.push(serde_json::to_string(&snap).unwrap());
            if snap.phase == MatchPhase::GameOver {
                break;
            }
        }
        log
    };
    assert_eq!(run(5), run(5));
}

#[test]
fn timeout_rounds_score_the_survivor() {
    let mut engine = SimulationEngine::new(SimConfig {
        rules: GameRules {
            round_time_limit: 1.0,
            ..Default::default()
        },
        seats: vec![PlayerSeat::human("A"), PlayerSeat::human("B")],
        ..Default::default()
    });
    engine.queue_command(EngineCommand::StartMatch);
    let mut ended = None;
    for _ in 0..120 {
        let snap = engine.tick(DT);
        if let Some(CombatEvent::RoundEnded { reason, winner, .. }) = snap
            .events
            .iter()
            .find(|e| matches!(e, CombatEvent::RoundEnded { .. }))
        {
            ended = Some((*reason, *winner));
            break;
        }
    }
    assert_eq!(ended, Some((RoundEndReason::Timeout, Some(TankId(0)))));
    assert_eq!(engine.roster().get(TankId(0)).unwrap().score, 1);
    assert_eq!(engine.round().round(), 2);
}

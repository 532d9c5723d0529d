//! Game loop thread: runs the simulation engine at 60Hz until the match ends.
//!
//! The thread owns the engine outright; callers only hold the command sender
//! and the shared snapshot. Commands arrive via `mpsc` channel. The latest snapshot is kept in shared
//! state for polling. Every seat is AI-driven, so the shop is left as soon as
//! it opens.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use dzone_core::commands::EngineCommand;
use dzone_core::constants::{DT, TICK_RATE};
use dzone_core::enums::MatchPhase;
use dzone_core::events::CombatEvent;
use dzone_core::state::GameStateSnapshot;
use dzone_sim::persistence;
use dzone_sim::{PlayerSeat, SimConfig, SimulationEngine};

use crate::args::RunOptions;
use crate::report::MatchReport;

/// Nominal duration of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Autosave slot written after each round.
pub const AUTOSAVE_SLOT: &str = "autosave";

pub enum LoopCommand {
    Engine(EngineCommand),
    Shutdown,
}

pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

/// Engine configuration for an all-AI match.
pub fn match_config(options: &RunOptions) -> SimConfig {
    SimConfig {
        seed: options.seed,
        rules: options.rules(),
        seats: (1..=options.players)
            .map(|n| PlayerSeat::ai(format!("CPU {n}")))
            .collect(),
        ..Default::default()
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle yielding the final report.
pub fn spawn_game_loop(
    options: RunOptions,
    latest_snapshot: SharedSnapshot,
) -> std::io::Result<(mpsc::Sender<LoopCommand>, JoinHandle<MatchReport>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();
    let handle = std::thread::Builder::new()
        .name("dzone-game-loop".into())
        .spawn(move || run_game_loop(&options, cmd_rx, &latest_snapshot))?;
    Ok((cmd_tx, handle))
}

/// The game loop. Runs until game over, a Shutdown command, or channel disconnect.
pub fn run_game_loop(
    options: &RunOptions,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> MatchReport {
    let mut engine = SimulationEngine::new(match_config(options));
    engine.queue_command(EngineCommand::StartMatch);
    let tick_duration = effective_tick_duration(options.speed);
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Engine(cmd)) => engine.queue_command(cmd),
                Ok(LoopCommand::Shutdown) => return MatchReport::from_engine(&engine, options.seed),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    return MatchReport::from_engine(&engine, options.seed)
                }
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick(DT);
        let phase = snapshot.phase;
        let round_over = log_round_events(&engine, &snapshot);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Between rounds: autosave, skip the shop, stop at game over
        if round_over {
            autosave(options, &engine);
        }
        match phase {
            MatchPhase::Shop => engine.queue_command(EngineCommand::ContinueFromShop),
            MatchPhase::GameOver => {
                log::info!("match over after {} rounds", engine.round().stats.rounds_played);
                return MatchReport::from_engine(&engine, options.seed);
            }
            _ => {}
        }

        // 5. Sleep until next tick
        let Some(tick_duration) = tick_duration else {
            continue;
        };
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind; reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Wall-clock time per tick at `speed`; `None` runs unthrottled.
fn effective_tick_duration(speed: f64) -> Option<Duration> {
    (speed > 0.001).then(|| TICK_DURATION.div_f64(speed))
}

/// Log round outcomes in this snapshot. Returns true if a round ended.
fn log_round_events(engine: &SimulationEngine, snapshot: &GameStateSnapshot) -> bool {
    let mut ended = false;
    for event in &snapshot.events {
        match event {
            CombatEvent::RoundEnded {
                round,
                reason,
                winner,
            } => {
                ended = true;
                let name = winner
                    .and_then(|id| engine.roster().get(id))
                    .map_or("nobody", |r| r.name.as_str());
                log::info!("round {round}: {reason:?}, won by {name}");
            }
            CombatEvent::TankDestroyed { tank, killer } => {
                log::debug!("{tank} destroyed by {killer:?}");
            }
            _ => {}
        }
    }
    ended
}

fn autosave(options: &RunOptions, engine: &SimulationEngine) {
    let Some(dir) = &options.save_dir else {
        return;
    };
    if let Err(err) = persistence::save_to_file(dir, AUTOSAVE_SLOT, &engine.save_data()) {
        log::warn!("autosave failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_options() -> RunOptions {
        RunOptions {
            rounds: 3,
            speed: 0.0,
            round_time: 2.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();
        tx.send(LoopCommand::Engine(EngineCommand::StartMatch)).unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();

        let commands: Vec<LoopCommand> = rx.try_iter().collect();
        assert_eq!(commands.len(), 2);
        assert!(matches!(
            commands[0],
            LoopCommand::Engine(EngineCommand::StartMatch)
        ));
        assert!(matches!(commands[1], LoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
        assert!(effective_tick_duration(2.0).unwrap() < TICK_DURATION);
        assert_eq!(effective_tick_duration(0.0), None);
    }

    #[test]
    fn test_unthrottled_match_runs_to_game_over() {
        let options = fast_options();
        let (_tx, rx) = mpsc::channel();
        let latest = Mutex::new(None);
        let report = run_game_loop(&options, rx, &latest);

        assert_eq!(report.rounds_played, 3);
        assert_eq!(report.leaderboard.len(), 2);
        assert!(report
            .leaderboard
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
        let last = latest.lock().unwrap().clone().unwrap();
        assert_eq!(last.phase, MatchPhase::GameOver);
    }

    #[test]
    fn test_shutdown_stops_loop() {
        let (tx, rx) = mpsc::channel();
        tx.send(LoopCommand::Shutdown).unwrap();
        let latest = Mutex::new(None);
        let report = run_game_loop(&fast_options(), rx, &latest);
        assert_eq!(report.rounds_played, 0);
        assert!(latest.lock().unwrap().is_none());
    }

    #[test]
    fn test_autosave_written_each_round() {
        let dir = std::env::temp_dir().join(format!("dzone-app-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let options = RunOptions {
            rounds: 1,
            save_dir: Some(dir.clone()),
            ..fast_options()
        };
        let (_tx, rx) = mpsc::channel();
        run_game_loop(&options, rx, &Mutex::new(None));

        let save = persistence::load_from_file(&dir, AUTOSAVE_SLOT).unwrap();
        assert_eq!(save.phase, MatchPhase::GameOver);
        assert_eq!(save.players.len(), 2);
        let _ = std::fs::remove_dir_all(&dir);
    }
}

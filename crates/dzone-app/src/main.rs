use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use dzone_app::args::{ArgsError, RunOptions, USAGE};
use dzone_app::game_loop;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = match RunOptions::parse(std::env::args()) {
        Ok(options) => options,
        Err(ArgsError::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    log::info!(
        "starting {}-player match: {} rounds, seed {}, speed {}",
        options.players,
        options.rounds,
        options.seed,
        options.speed
    );

    let latest = Arc::new(Mutex::new(None));
    let report = match game_loop::spawn_game_loop(options, latest) {
        Ok((_commands, handle)) => match handle.join() {
            Ok(report) => report,
            Err(_) => {
                log::error!("game loop panicked");
                return ExitCode::FAILURE;
            }
        },
        Err(err) => {
            log::error!("failed to spawn game loop: {err}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("failed to encode report: {err}");
            ExitCode::FAILURE
        }
    }
}

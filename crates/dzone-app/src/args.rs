//! Command-line options.

use std::path::PathBuf;

use thiserror::Error;

use dzone_core::config::GameRules;
use dzone_core::constants::SPAWN_POINTS;

pub const USAGE: &str = "usage: dzone [--rounds N] [--seed S] [--speed X] [--players N] \
[--round-time SECS] [--save-dir DIR]\n  --speed 0 runs unthrottled";

#[derive(Debug, Error, PartialEq)]
pub enum ArgsError {
    #[error("unknown option {0}")]
    Unknown(String),
    #[error("option {0} needs a value")]
    MissingValue(String),
    #[error("invalid value {value:?} for {option}")]
    Invalid { option: String, value: String },
    #[error("help requested")]
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub rounds: u32,
    pub seed: u64,
    /// Playback speed multiplier; zero or less runs as fast as possible.
    pub speed: f64,
    pub players: usize,
    pub round_time: f64,
    /// Autosave directory, written after each round.
    pub save_dir: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        let rules = GameRules::default();
        Self {
            rounds: rules.max_rounds,
            seed: 42,
            speed: 1.0,
            players: 2,
            round_time: rules.round_time_limit,
            save_dir: None,
        }
    }
}

impl RunOptions {
    /// Parse options, skipping the program name.
    pub fn parse<I>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter().skip(1);
        while let Some(flag) = args.next() {
            if flag == "-h" || flag == "--help" {
                return Err(ArgsError::Help);
            }
            let value = match flag.as_str() {
                "--rounds" | "--seed" | "--speed" | "--players" | "--round-time" | "--save-dir" => {
                    args.next()
                        .ok_or_else(|| ArgsError::MissingValue(flag.clone()))?
                }
                _ => return Err(ArgsError::Unknown(flag)),
            };
            match flag.as_str() {
                "--rounds" => options.rounds = parse_value(&flag, &value)?,
                "--seed" => options.seed = parse_value(&flag, &value)?,
                "--speed" => options.speed = parse_value(&flag, &value)?,
                "--players" => options.players = parse_value(&flag, &value)?,
                "--round-time" => options.round_time = parse_value(&flag, &value)?,
                _ => options.save_dir = Some(PathBuf::from(value)),
            }
        }
        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> Result<(), ArgsError> {
        let invalid = |option: &str, value: String| ArgsError::Invalid {
            option: option.to_string(),
            value,
        };
        if self.rounds == 0 {
            return Err(invalid("--rounds", self.rounds.to_string()));
        }
        if !(2..=SPAWN_POINTS.len()).contains(&self.players) {
            return Err(invalid("--players", self.players.to_string()));
        }
        if !self.speed.is_finite() {
            return Err(invalid("--speed", self.speed.to_string()));
        }
        if !(self.round_time.is_finite() && self.round_time > 0.0) {
            return Err(invalid("--round-time", self.round_time.to_string()));
        }
        Ok(())
    }

    pub fn rules(&self) -> GameRules {
        GameRules {
            max_rounds: self.rounds,
            round_time_limit: self.round_time,
            ..GameRules::default()
        }
    }
}

fn parse_value<T: std::str::FromStr>(option: &str, value: &str) -> Result<T, ArgsError> {
    value.parse().map_err(|_| ArgsError::Invalid {
        option: option.to_string(),
        value: value.to_string(),
    })
}

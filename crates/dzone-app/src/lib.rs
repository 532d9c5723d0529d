//! Headless runner for DZONE: argument parsing, the fixed-step game loop,
//! and the end-of-match report.

pub mod args;
pub mod game_loop;
pub mod report;

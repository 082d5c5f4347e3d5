//! Batch auto-play for balance checks.
//!
//! Each run plays a full session through the real state machine with an
//! autopilot input, so results match actual gameplay rules.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::run_simulation;

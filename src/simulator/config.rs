//! Simulation configuration.

use crate::combat::AttackStrategy;

/// Configuration for a batch of auto-play sessions.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of sessions to play
    pub num_runs: u32,

    /// Encounters per session before the autopilot quits
    pub encounters_per_run: u32,

    /// Random seed for reproducibility (None = random). Run `i` uses `seed + i`.
    pub seed: Option<u64>,

    /// Attack strategy the autopilot always picks
    pub strategy: AttackStrategy,

    /// Weapon the autopilot grabs at its first shop
    pub preferred_weapon: Option<String>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            encounters_per_run: 20,
            seed: None,
            strategy: AttackStrategy::Melee,
            preferred_weapon: None,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small reproducible batch, handy for smoke checks.
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 50,
            encounters_per_run: 10,
            seed: Some(seed),
            ..Default::default()
        }
    }
}

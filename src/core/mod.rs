//! Core: settings, constants, and the session state machine.

pub mod config;
pub mod constants;
pub mod state_machine;

pub use config::*;
pub use constants::*;
pub use state_machine::*;

//! Combat: attack strategies, attack resolution, and the battle loop.

pub mod battle;
pub mod manager;
pub mod strategy;

pub use battle::*;
pub use manager::*;
pub use strategy::*;

//! CLI RPG - turn-based console RPG engine library
//!
//! This module exposes the game logic for testing, the simulator, and the
//! console binary. Nothing in here prints: operations append to a
//! [`messages::MessageLog`] and the caller decides where messages go.

pub mod character;
pub mod combat;
pub mod core;
pub mod error;
pub mod events;
pub mod input;
pub mod items;
pub mod messages;
pub mod simulator;
pub mod utils;

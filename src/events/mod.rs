//! Encounters: random event dispatch, the shop, resting, and the session record.

pub mod event_manager;
pub mod record;
pub mod rest;
pub mod shop;

pub use event_manager::*;
pub use record::*;
pub use rest::*;
pub use shop::*;

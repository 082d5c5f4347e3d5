//! Utility modules: content loading and save persistence.

pub mod persistence;
pub mod spec_loader;

pub use persistence::*;
pub use spec_loader::*;

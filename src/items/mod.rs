//! Equipment: weapon stats and the weapon catalog.

pub mod weapon;

pub use weapon::*;

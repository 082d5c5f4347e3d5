//! Attack strategies: named damage rolls a character can switch between.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttackStrategy {
    #[default]
    Default,
    Melee,
    Magic,
}

impl AttackStrategy {
    pub const ALL: [AttackStrategy; 3] = [
        AttackStrategy::Default,
        AttackStrategy::Melee,
        AttackStrategy::Magic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AttackStrategy::Default => "Default",
            AttackStrategy::Melee => "Melee",
            AttackStrategy::Magic => "Magic",
        }
    }

    /// Half-open damage range `[min, max)` for this strategy.
    pub fn damage_range(self) -> (u32, u32) {
        match self {
            AttackStrategy::Default => (DEFAULT_ATTACK_MIN, DEFAULT_ATTACK_MAX),
            AttackStrategy::Melee => (MELEE_ATTACK_MIN, MELEE_ATTACK_MAX),
            AttackStrategy::Magic => (MAGIC_ATTACK_MIN, MAGIC_ATTACK_MAX),
        }
    }

    pub fn roll(self, rng: &mut impl Rng) -> u32 {
        let (min, max) = self.damage_range();
        rng.gen_range(min..max)
    }

    /// Exact-name lookup. Unknown names resolve to `Default`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.name() == name)
            .unwrap_or_default()
    }

    /// Lenient lookup used when validating player input: trims and ignores
    /// case, returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(wanted))
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.name()).collect()
    }
}

impl fmt::Display for AttackStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

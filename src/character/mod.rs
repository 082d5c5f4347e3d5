//! Characters: the player and enemy aggregates and the managers they compose.

pub mod enemy;
pub mod experience;
pub mod health;
pub mod inventory;
pub mod player;
pub mod reward;
pub mod save;

pub use enemy::*;
pub use experience::*;
pub use health::*;
pub use inventory::*;
pub use player::*;
pub use reward::*;
pub use save::*;

use crate::error::GameError;
use crate::messages::MessageLog;

/// Mutable handle on either kind of character, used as an attack target.
pub enum Combatant<'a> {
    Player(&'a mut Player),
    Enemy(&'a mut Enemy),
}

impl Combatant<'_> {
    pub fn name(&self) -> &str {
        match self {
            Combatant::Player(p) => p.name(),
            Combatant::Enemy(e) => e.name(),
        }
    }

    pub fn hp(&self) -> u32 {
        match self {
            Combatant::Player(p) => p.hp(),
            Combatant::Enemy(e) => e.hp(),
        }
    }

    pub fn max_hp(&self) -> u32 {
        match self {
            Combatant::Player(p) => p.max_hp(),
            Combatant::Enemy(e) => e.max_hp(),
        }
    }

    pub fn is_alive(&self) -> bool {
        match self {
            Combatant::Player(p) => p.is_alive(),
            Combatant::Enemy(e) => e.is_alive(),
        }
    }

    pub fn take_damage(&mut self, raw: u32, log: &mut MessageLog) -> u32 {
        match self {
            Combatant::Player(p) => p.take_damage(raw, log),
            Combatant::Enemy(e) => e.take_damage(raw, log),
        }
    }

    pub fn heal(&mut self, amount: u32, log: &mut MessageLog) -> Result<u32, GameError> {
        match self {
            Combatant::Player(p) => p.heal(amount, log),
            Combatant::Enemy(e) => e.heal(amount),
        }
    }

    pub fn change_attack_strategy(&mut self, name: &str) {
        match self {
            Combatant::Player(p) => p.change_attack_strategy(name),
            Combatant::Enemy(e) => e.change_attack_strategy(name),
        }
    }
}

use rand::Rng;

use crate::character::Combatant;
use crate::combat::AttackStrategy;
use crate::messages::MessageLog;

/// Result of one attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackReport {
    pub strategy: AttackStrategy,
    /// Strategy roll plus attacker AP, before the target's DP.
    pub raw_damage: u32,
    /// HP the target actually lost.
    pub damage_dealt: u32,
    pub target_hp: u32,
}

/// Holds a character's current attack strategy and resolves attacks with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CombatManager {
    strategy: AttackStrategy,
}

impl CombatManager {
    pub fn new(strategy: AttackStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> AttackStrategy {
        self.strategy
    }

    /// Switches strategy by exact name; unknown names select `Default`.
    pub fn change_attack_strategy(&mut self, name: &str) {
        self.strategy = AttackStrategy::from_name(name);
    }

    pub fn set_strategy(&mut self, strategy: AttackStrategy) {
        self.strategy = strategy;
    }

    pub fn execute_attack(
        &self,
        attack_power: u32,
        mut target: Combatant<'_>,
        rng: &mut impl Rng,
        log: &mut MessageLog,
    ) -> AttackReport {
        let raw_damage = self.strategy.roll(rng).saturating_add(attack_power);
        let damage_dealt = target.take_damage(raw_damage, log);
        AttackReport {
            strategy: self.strategy,
            raw_damage,
            damage_dealt,
            target_hp: target.hp(),
        }
    }
}

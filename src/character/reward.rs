//! Enemy-defeat rewards: gold, experience, and the level-up stat bonus.

use crate::character::{ExperienceManager, HealthManager, InventoryManager};
use crate::core::config::LevelUpConfig;
use crate::messages::MessageLog;

/// What a defeated enemy leaves behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemyRewards {
    pub enemy_name: String,
    pub gold: u32,
    pub experience: u32,
}

/// The parts of a player a reward touches, borrowed for one call.
pub struct RewardTargets<'a> {
    pub inventory: &'a mut InventoryManager,
    pub experience: &'a mut ExperienceManager,
    pub health: &'a mut HealthManager,
    pub base_ap: &'a mut u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardManager {
    level_up: LevelUpConfig,
}

impl RewardManager {
    pub fn new(level_up: LevelUpConfig) -> Self {
        Self { level_up }
    }

    /// Grants gold and experience, then applies one stat bonus per level gained.
    pub fn process_enemy_defeat(
        &self,
        rewards: &EnemyRewards,
        targets: RewardTargets<'_>,
        log: &mut MessageLog,
    ) {
        log.success(format!("You defeated {}!", rewards.enemy_name));

        targets.inventory.gain_gold(rewards.gold, log);

        let levels = targets.experience.gain_experience(rewards.experience, log);
        if levels == 0 {
            return;
        }

        for _ in 0..levels {
            targets
                .health
                .level_up(self.level_up.hp_increase, self.level_up.dp_increase);
            *targets.base_ap = targets.base_ap.saturating_add(self.level_up.ap_increase);
        }
        log.success(format!("Leveled up {} time(s)!", levels));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::WeaponStats;

    fn rewards(gold: u32, experience: u32) -> EnemyRewards {
        EnemyRewards {
            enemy_name: "Goblin".to_string(),
            gold,
            experience,
        }
    }

    #[test]
    fn test_rewards_without_level_up() {
        let manager = RewardManager::new(LevelUpConfig::default());
        let mut inventory = InventoryManager::new(50, 0, 10);
        let mut experience = ExperienceManager::new(100);
        let mut health = HealthManager::new(100, 5, &WeaponStats::unarmed());
        let mut base_ap = 10;
        let mut log = MessageLog::new();

        manager.process_enemy_defeat(
            &rewards(12, 30),
            RewardTargets {
                inventory: &mut inventory,
                experience: &mut experience,
                health: &mut health,
                base_ap: &mut base_ap,
            },
            &mut log,
        );

        assert_eq!(inventory.gold(), 62);
        assert_eq!(experience.total_experience(), 30);
        assert_eq!(base_ap, 10);
        assert_eq!(log.messages()[0].text, "You defeated Goblin!");
    }

    #[test]
    fn test_rewards_with_level_up() {
        let manager = RewardManager::new(LevelUpConfig::default());
        let mut inventory = InventoryManager::new(0, 0, 10);
        let mut experience = ExperienceManager::new(100);
        let mut health = HealthManager::new(100, 5, &WeaponStats::unarmed());
        let mut base_ap = 10;
        let mut log = MessageLog::new();

        manager.process_enemy_defeat(
            &rewards(0, 320),
            RewardTargets {
                inventory: &mut inventory,
                experience: &mut experience,
                health: &mut health,
                base_ap: &mut base_ap,
            },
            &mut log,
        );

        // Only one level even though 320 crosses the threshold three times.
        assert_eq!(experience.level(), 2);
        assert_eq!(experience.total_experience(), 220);
        assert_eq!(health.base_hp(), 110);
        assert_eq!(health.base_dp(), 6);
        assert_eq!(health.current_hp(), 110);
        assert_eq!(base_ap, 12);
        assert!(log.messages().iter().any(|m| m.text == "Leveled up 1 time(s)!"));
    }
}

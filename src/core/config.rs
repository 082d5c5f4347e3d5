//! Game settings: balance numbers for the player, levelling, items, events,
//! shop, enemy rewards, and the weapon table.
//!
//! Settings are read from TOML. A missing, empty, or unparsable file falls
//! back to [`GameConfig::default`]; a file that parses but breaks a rule is
//! rejected with every violation listed.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::items::WeaponSpec;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub level_up: LevelUpConfig,
    pub items: ItemsConfig,
    pub events: EventsConfig,
    pub shop: ShopConfig,
    pub enemy: EnemyConfig,
    pub weapons: BTreeMap<String, WeaponSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub initial_hp: u32,
    pub base_dp: u32,
    pub base_ap: u32,
    pub initial_gold: u32,
    pub initial_potions: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpConfig {
    pub hp_increase: u32,
    pub dp_increase: u32,
    pub ap_increase: u32,
    pub experience_required: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsConfig {
    pub potion: PotionConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotionConfig {
    pub price: u32,
    pub heal_amount: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsConfig {
    pub shop_event_weight: u32,
    pub battle_event_weight: u32,
}

impl EventsConfig {
    pub fn total_weight(&self) -> u32 {
        self.shop_event_weight.saturating_add(self.battle_event_weight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfig {
    pub gold_reward_min: u32,
    pub gold_reward_max: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyConfig {
    pub gold_base_multiplier: u32,
    pub gold_random_min: u32,
    pub gold_random_max: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_hp: 100,
            base_dp: 5,
            base_ap: 10,
            initial_gold: 50,
            initial_potions: 0,
        }
    }
}

impl Default for LevelUpConfig {
    fn default() -> Self {
        Self {
            hp_increase: 10,
            dp_increase: 1,
            ap_increase: 2,
            experience_required: 100,
        }
    }
}

impl Default for ItemsConfig {
    fn default() -> Self {
        Self {
            potion: PotionConfig {
                price: 10,
                heal_amount: 10,
            },
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            shop_event_weight: 1,
            battle_event_weight: 2,
        }
    }
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            gold_reward_min: 10,
            gold_reward_max: 20,
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            gold_base_multiplier: 2,
            gold_random_min: 1,
            gold_random_max: 10,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        let weapons = [
            ("Sword", 100, 20, 5),
            ("Axe", 80, 30, 3),
            ("Spear", 90, 25, 4),
            ("Bow", 70, 35, 2),
            ("Staff", 60, 40, 1),
        ]
        .into_iter()
        .map(|(name, hp, ap, dp)| (name.to_string(), WeaponSpec { hp, ap, dp }))
        .collect();

        Self {
            player: PlayerConfig::default(),
            level_up: LevelUpConfig::default(),
            items: ItemsConfig::default(),
            events: EventsConfig::default(),
            shop: ShopConfig::default(),
            enemy: EnemyConfig::default(),
            weapons,
        }
    }
}

impl GameConfig {
    /// Parses settings from TOML text and validates them.
    ///
    /// Parse failures are returned as `Ok(None)` so callers can decide on a
    /// fallback; rule violations are errors.
    pub fn from_toml_str(text: &str) -> Result<Option<Self>, ConfigError> {
        match toml::from_str::<GameConfig>(text) {
            Ok(config) => {
                config.validate()?;
                Ok(Some(config))
            }
            Err(e) => {
                warn!("Failed to parse game configuration: {}", e);
                Ok(None)
            }
        }
    }

    /// Loads settings from a TOML file, falling back to defaults when the file
    /// is missing, empty, or unreadable as TOML.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "Config file not found at {}, using default values",
                    path.display()
                );
                return Ok(Self::default());
            }
            Err(e) => {
                warn!(
                    "Error reading config from {}: {}, using default values",
                    path.display(),
                    e
                );
                return Ok(Self::default());
            }
        };

        if text.trim().is_empty() {
            warn!("Config file is empty: {}, using default values", path.display());
            return Ok(Self::default());
        }

        match Self::from_toml_str(&text)? {
            Some(config) => {
                info!("Loaded game configuration from {}", path.display());
                Ok(config)
            }
            None => {
                warn!("Using default configuration values");
                Ok(Self::default())
            }
        }
    }

    /// Checks every rule and reports all violations at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut violations = Vec::new();

        if self.player.initial_hp == 0 {
            violations.push("Player.InitialHP must be positive (got 0)".to_string());
        }

        if self.level_up.experience_required == 0 {
            violations.push("LevelUp.ExperienceRequired must be positive (got 0)".to_string());
        }

        if self.items.potion.heal_amount == 0 {
            violations.push("Items.Potion.HealAmount must be positive (got 0)".to_string());
        }

        if self.events.total_weight() == 0 {
            violations.push("Events.TotalWeight cannot be zero".to_string());
        }

        if self.shop.gold_reward_max < self.shop.gold_reward_min {
            violations.push(format!(
                "Shop.GoldRewardMax must be >= GoldRewardMin (got {} < {})",
                self.shop.gold_reward_max, self.shop.gold_reward_min
            ));
        }

        if self.enemy.gold_base_multiplier == 0 {
            violations.push("Enemy.GoldBaseMultiplier must be positive (got 0)".to_string());
        }

        if self.enemy.gold_random_max < self.enemy.gold_random_min {
            violations.push(format!(
                "Enemy.GoldRandomMax must be >= GoldRandomMin (got {} < {})",
                self.enemy.gold_random_max, self.enemy.gold_random_min
            ));
        }

        for name in self.weapons.keys() {
            if name.trim().is_empty() {
                violations.push("Weapons: weapon name cannot be blank".to_string());
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid { violations })
        }
    }
}

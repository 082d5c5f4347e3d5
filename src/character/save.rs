//! Persistent snapshot of a player.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::constants::DEFAULT_SAVE_SLOT;
use crate::items::WeaponStats;

/// Flattened copy of a player's persistent fields. Built on demand from a live
/// [`Player`](crate::character::Player); the player stays the source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSaveData {
    pub player_name: String,
    pub current_hp: u32,
    pub max_hp: u32,
    pub base_ap: u32,
    pub base_dp: u32,
    pub total_gold: u32,
    pub total_potions: u32,
    pub level: u32,
    pub total_experience: u32,
    pub equipped_weapon: WeaponData,
    pub attack_strategy: String,
    pub saved_at: DateTime<Utc>,
    #[serde(default = "default_slot")]
    pub slot_name: String,
}

fn default_slot() -> String {
    DEFAULT_SAVE_SLOT.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponData {
    pub name: String,
    pub hp: u32,
    pub ap: u32,
    pub dp: u32,
}

impl From<&WeaponStats> for WeaponData {
    fn from(weapon: &WeaponStats) -> Self {
        Self {
            name: weapon.name().to_string(),
            hp: weapon.hp(),
            ap: weapon.ap(),
            dp: weapon.dp(),
        }
    }
}

impl From<&WeaponData> for WeaponStats {
    fn from(data: &WeaponData) -> Self {
        WeaponStats::new(data.name.clone(), data.hp, data.ap, data.dp)
    }
}

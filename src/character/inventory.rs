//! Gold, potions, and the equipped weapon.

use crate::items::{EquipmentChanged, EquipmentProvider, WeaponStats};
use crate::messages::MessageLog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryManager {
    gold: u32,
    potions: u32,
    potion_price: u32,
    weapon: WeaponStats,
}

impl InventoryManager {
    pub fn new(gold: u32, potions: u32, potion_price: u32) -> Self {
        Self {
            gold,
            potions,
            potion_price,
            weapon: WeaponStats::unarmed(),
        }
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn potions(&self) -> u32 {
        self.potions
    }

    pub fn potion_price(&self) -> u32 {
        self.potion_price
    }

    /// Swaps the equipped weapon. The returned signal must be handed to the
    /// owner's health manager so current HP is clipped to the new maximum.
    pub fn equip_weapon(&mut self, weapon: WeaponStats, log: &mut MessageLog) -> EquipmentChanged {
        log.info(format!("You equipped a {}", weapon.name()));
        self.weapon = weapon;
        EquipmentChanged
    }

    pub fn gain_gold(&mut self, amount: u32, log: &mut MessageLog) {
        self.gold = self.gold.saturating_add(amount);
        log.gold(format!("You gain {} gold", amount));
    }

    /// Buys `amount` potions if the full price is affordable. Nothing changes
    /// otherwise.
    pub fn buy_potion(&mut self, amount: u32, log: &mut MessageLog) -> bool {
        match amount.checked_mul(self.potion_price) {
            Some(cost) if self.gold >= cost => {
                self.gold -= cost;
                self.potions = self.potions.saturating_add(amount);
                log.success(format!("You bought {} potions", amount));
                true
            }
            _ => {
                log.warning("Not enough gold!");
                false
            }
        }
    }

    /// Removes `amount` potions if held. Healing is the caller's job.
    pub fn use_potion(&mut self, amount: u32, log: &mut MessageLog) -> bool {
        if self.potions >= amount {
            self.potions -= amount;
            log.info(format!("You used {} potions", amount));
            true
        } else {
            log.warning("Not enough potions!");
            false
        }
    }

    pub fn info_messages(&self, log: &mut MessageLog) {
        log.info(format!("Total Gold: {}", self.gold));
        log.info(format!("Total Potions: {}", self.potions));
        log.info(format!("Equipped Weapon: {}", self.weapon.name()));
    }
}

impl EquipmentProvider for InventoryManager {
    fn weapon(&self) -> &WeaponStats {
        &self.weapon
    }
}

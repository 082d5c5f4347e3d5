//! Hit points and defense.
//!
//! Max HP and total DP are never stored: they are recomputed from the base
//! values plus whatever the equipment provider currently reports.

use crate::error::GameError;
use crate::items::{EquipmentChanged, EquipmentProvider};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthManager {
    base_hp: u32,
    base_dp: u32,
    current_hp: u32,
}

impl HealthManager {
    /// Starts at full health for the given equipment.
    pub fn new(base_hp: u32, base_dp: u32, equipment: &impl EquipmentProvider) -> Self {
        let mut health = Self {
            base_hp,
            base_dp,
            current_hp: 0,
        };
        health.current_hp = health.max_hp(equipment);
        health
    }

    /// Rebuilds a manager from persisted values, clipping to max HP.
    pub fn from_parts(
        base_hp: u32,
        base_dp: u32,
        current_hp: u32,
        equipment: &impl EquipmentProvider,
    ) -> Self {
        let mut health = Self {
            base_hp,
            base_dp,
            current_hp,
        };
        health.clip_to_max(equipment);
        health
    }

    pub fn base_hp(&self) -> u32 {
        self.base_hp
    }

    pub fn base_dp(&self) -> u32 {
        self.base_dp
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    pub fn max_hp(&self, equipment: &impl EquipmentProvider) -> u32 {
        self.base_hp.saturating_add(equipment.weapon().hp())
    }

    pub fn total_dp(&self, equipment: &impl EquipmentProvider) -> u32 {
        self.base_dp.saturating_add(equipment.weapon().dp())
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Applies `raw` damage reduced by total DP. Returns the damage actually taken.
    pub fn take_damage(&mut self, raw: u32, equipment: &impl EquipmentProvider) -> u32 {
        let actual = raw.saturating_sub(self.total_dp(equipment));
        self.current_hp = self.current_hp.saturating_sub(actual);
        actual
    }

    /// Restores up to `amount` HP without exceeding max HP. Returns the HP gained.
    pub fn heal(
        &mut self,
        amount: u32,
        equipment: &impl EquipmentProvider,
    ) -> Result<u32, GameError> {
        if amount == 0 {
            return Err(GameError::NonPositiveAmount {
                what: "heal amount",
                amount,
            });
        }
        let before = self.current_hp;
        self.current_hp = self
            .current_hp
            .saturating_add(amount)
            .min(self.max_hp(equipment));
        Ok(self.current_hp.saturating_sub(before))
    }

    /// Raises base stats. Current HP grows by the same amount, uncapped.
    pub fn level_up(&mut self, hp_increase: u32, dp_increase: u32) {
        self.base_hp = self.base_hp.saturating_add(hp_increase);
        self.base_dp = self.base_dp.saturating_add(dp_increase);
        self.current_hp = self.current_hp.saturating_add(hp_increase);
    }

    /// Consumes the signal from an equipment swap and clips current HP to the
    /// new maximum.
    pub fn on_equipment_changed(
        &mut self,
        _changed: EquipmentChanged,
        equipment: &impl EquipmentProvider,
    ) {
        self.clip_to_max(equipment);
    }

    fn clip_to_max(&mut self, equipment: &impl EquipmentProvider) {
        let max = self.max_hp(equipment);
        if self.current_hp > max {
            self.current_hp = max;
        }
    }
}

//! The player aggregate: composes health, inventory, experience, combat, and
//! reward managers and keeps them consistent.

use chrono::Utc;
use rand::Rng;

use crate::character::{
    Combatant, Enemy, ExperienceManager, HealthManager, InventoryManager, PlayerSaveData,
    RewardManager, RewardTargets, WeaponData,
};
use crate::combat::{AttackReport, AttackStrategy, CombatManager};
use crate::core::config::GameConfig;
use crate::core::constants::MAX_PLAYER_NAME_LEN;
use crate::error::GameError;
use crate::input::PlayerState;
use crate::items::{EquipmentProvider, WeaponStats};
use crate::messages::MessageLog;
use crate::utils::SaveStore;

/// Checks a player name: non-blank and at most 16 characters.
pub fn validate_name(name: &str) -> Result<(), GameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(GameError::EmptyName);
    }
    let len = trimmed.chars().count();
    if len > MAX_PLAYER_NAME_LEN {
        return Err(GameError::NameTooLong {
            len,
            max: MAX_PLAYER_NAME_LEN,
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    base_ap: u32,
    potion_heal_amount: u32,
    health: HealthManager,
    inventory: InventoryManager,
    experience: ExperienceManager,
    combat: CombatManager,
    reward: RewardManager,
}

impl Player {
    pub fn new(name: &str, config: &GameConfig) -> Result<Self, GameError> {
        validate_name(name)?;

        let inventory = InventoryManager::new(
            config.player.initial_gold,
            config.player.initial_potions,
            config.items.potion.price,
        );
        let health = HealthManager::new(config.player.initial_hp, config.player.base_dp, &inventory);

        Ok(Self {
            name: name.trim().to_string(),
            base_ap: config.player.base_ap,
            potion_heal_amount: config.items.potion.heal_amount,
            health,
            inventory,
            experience: ExperienceManager::new(config.level_up.experience_required),
            combat: CombatManager::default(),
            reward: RewardManager::new(config.level_up),
        })
    }

    /// Rebuilds a live player from a save. Base HP is derived from the saved
    /// max HP minus the weapon's bonus.
    pub fn from_save_data(data: &PlayerSaveData, config: &GameConfig) -> Result<Self, GameError> {
        validate_name(&data.player_name)?;

        let weapon = WeaponStats::from(&data.equipped_weapon);
        let base_hp = data.max_hp.saturating_sub(weapon.hp());

        let mut inventory = InventoryManager::new(
            data.total_gold,
            data.total_potions,
            config.items.potion.price,
        );
        let mut scratch = MessageLog::new();
        let _restored = inventory.equip_weapon(weapon, &mut scratch);
        let health = HealthManager::from_parts(base_hp, data.base_dp, data.current_hp, &inventory);

        Ok(Self {
            name: data.player_name.trim().to_string(),
            base_ap: data.base_ap,
            potion_heal_amount: config.items.potion.heal_amount,
            health,
            inventory,
            experience: ExperienceManager::from_parts(
                data.level,
                data.total_experience,
                config.level_up.experience_required,
            ),
            combat: CombatManager::new(AttackStrategy::from_name(&data.attack_strategy)),
            reward: RewardManager::new(config.level_up),
        })
    }

    /// Resumes `name` from `slot`, or starts a new player. A missing save is
    /// reported as info; an unreadable or invalid one as a single warning.
    /// Only an invalid `name` is an error.
    pub fn load_or_new(
        store: &dyn SaveStore,
        name: &str,
        slot: &str,
        config: &GameConfig,
        log: &mut MessageLog,
    ) -> Result<Self, GameError> {
        validate_name(name)?;
        let name = name.trim();

        let restored = store
            .load(name, slot)
            .map_err(|e| e.to_string())
            .and_then(|data| match data {
                Some(data) => Self::from_save_data(&data, config)
                    .map(Some)
                    .map_err(|e| e.to_string()),
                None => Ok(None),
            });

        match restored {
            Ok(Some(player)) => {
                log.success(format!("Welcome back, {}!", player.name));
                Ok(player)
            }
            Ok(None) => {
                log.info("No saved game found. Starting fresh.");
                Self::new(name, config)
            }
            Err(e) => {
                log.warning(format!("Could not load save: {}; starting fresh.", e));
                Self::new(name, config)
            }
        }
    }

    // ── Stats ──

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hp(&self) -> u32 {
        self.health.current_hp()
    }

    pub fn max_hp(&self) -> u32 {
        self.health.max_hp(&self.inventory)
    }

    pub fn dp(&self) -> u32 {
        self.health.total_dp(&self.inventory)
    }

    pub fn ap(&self) -> u32 {
        self.base_ap.saturating_add(self.inventory.weapon().ap())
    }

    pub fn base_ap(&self) -> u32 {
        self.base_ap
    }

    pub fn base_hp(&self) -> u32 {
        self.health.base_hp()
    }

    pub fn base_dp(&self) -> u32 {
        self.health.base_dp()
    }

    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    pub fn gold(&self) -> u32 {
        self.inventory.gold()
    }

    pub fn potions(&self) -> u32 {
        self.inventory.potions()
    }

    pub fn potion_price(&self) -> u32 {
        self.inventory.potion_price()
    }

    pub fn potion_heal_amount(&self) -> u32 {
        self.potion_heal_amount
    }

    pub fn level(&self) -> u32 {
        self.experience.level()
    }

    pub fn total_experience(&self) -> u32 {
        self.experience.total_experience()
    }

    pub fn weapon(&self) -> &WeaponStats {
        self.inventory.weapon()
    }

    pub fn attack_strategy(&self) -> AttackStrategy {
        self.combat.strategy()
    }

    // ── Equipment ──

    pub fn equip_weapon(&mut self, weapon: WeaponStats, log: &mut MessageLog) {
        let changed = self.inventory.equip_weapon(weapon, log);
        self.health.on_equipment_changed(changed, &self.inventory);
    }

    // ── Combat ──

    pub fn attack(
        &self,
        target: Combatant<'_>,
        rng: &mut impl Rng,
        log: &mut MessageLog,
    ) -> AttackReport {
        self.combat.execute_attack(self.ap(), target, rng, log)
    }

    pub fn take_damage(&mut self, raw: u32, log: &mut MessageLog) -> u32 {
        let actual = self.health.take_damage(raw, &self.inventory);
        log.combat(format!(
            "{} takes {} damage! Remaining HP: {}",
            self.name,
            actual,
            self.hp()
        ));
        actual
    }

    pub fn change_attack_strategy(&mut self, name: &str) {
        self.combat.change_attack_strategy(name);
    }

    pub fn set_attack_strategy(&mut self, strategy: AttackStrategy) {
        self.combat.set_strategy(strategy);
    }

    // ── Recovery ──

    pub fn heal(&mut self, amount: u32, log: &mut MessageLog) -> Result<u32, GameError> {
        let healed = self.health.heal(amount, &self.inventory)?;
        log.success(format!("You heal {} HP", healed));
        Ok(healed)
    }

    /// Drinks `amount` potions. Heals only if the potions were actually
    /// consumed; returns whether they were.
    pub fn use_potion(&mut self, amount: u32, log: &mut MessageLog) -> Result<bool, GameError> {
        if amount == 0 {
            return Err(GameError::NonPositiveAmount {
                what: "potion amount",
                amount,
            });
        }
        if !self.inventory.use_potion(amount, log) {
            return Ok(false);
        }
        let heal = self.potion_heal_amount.saturating_mul(amount);
        self.heal(heal, log)?;
        Ok(true)
    }

    // ── Inventory ──

    pub fn buy_potion(&mut self, amount: u32, log: &mut MessageLog) -> Result<bool, GameError> {
        if amount == 0 {
            return Err(GameError::NonPositiveAmount {
                what: "potion amount",
                amount,
            });
        }
        Ok(self.inventory.buy_potion(amount, log))
    }

    pub fn gain_gold(&mut self, amount: u32, log: &mut MessageLog) {
        self.inventory.gain_gold(amount, log);
    }

    // ── Rewards ──

    pub fn defeat_enemy(&mut self, enemy: &Enemy, log: &mut MessageLog) {
        self.reward.process_enemy_defeat(
            &enemy.rewards(),
            RewardTargets {
                inventory: &mut self.inventory,
                experience: &mut self.experience,
                health: &mut self.health,
                base_ap: &mut self.base_ap,
            },
            log,
        );
    }

    // ── Views ──

    pub fn snapshot(&self) -> PlayerState {
        PlayerState {
            name: self.name.clone(),
            hp: self.hp(),
            max_hp: self.max_hp(),
            level: self.level(),
            experience: self.total_experience(),
            gold: self.gold(),
            potions: self.potions(),
            equipped_weapon: self.weapon().name().to_string(),
            is_alive: self.is_alive(),
            attack_power: self.ap(),
            defense_power: self.dp(),
        }
    }

    pub fn info_messages(&self, log: &mut MessageLog) {
        log.info(format!(
            "Name: {}  HP: {}/{}  AP: {}  DP: {}",
            self.name,
            self.hp(),
            self.max_hp(),
            self.ap(),
            self.dp()
        ));
        self.inventory.info_messages(log);
        self.experience.info_messages(log);
    }

    pub fn save_data(&self, slot_name: &str) -> PlayerSaveData {
        PlayerSaveData {
            player_name: self.name.clone(),
            current_hp: self.hp(),
            max_hp: self.max_hp(),
            base_ap: self.base_ap,
            base_dp: self.health.base_dp(),
            total_gold: self.gold(),
            total_potions: self.potions(),
            level: self.level(),
            total_experience: self.total_experience(),
            equipped_weapon: WeaponData::from(self.weapon()),
            attack_strategy: self.attack_strategy().name().to_string(),
            saved_at: Utc::now(),
            slot_name: slot_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::EnemySpec;
    use crate::core::config::EnemyConfig;
    use crate::messages::MessageType;
    use crate::utils::MemorySaveStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hero() -> Player {
        Player::new("Hero", &GameConfig::default()).unwrap()
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn test_new_player_uses_config() {
        let player = hero();
        assert_eq!(player.hp(), 100);
        assert_eq!(player.max_hp(), 100);
        assert_eq!(player.dp(), 5);
        assert_eq!(player.ap(), 10);
        assert_eq!(player.gold(), 50);
        assert_eq!(player.potions(), 0);
        assert_eq!(player.level(), 1);
        assert_eq!(player.attack_strategy(), AttackStrategy::Default);
        assert!(player.weapon().is_unarmed());
    }

    #[test]
    fn test_name_validation() {
        let config = GameConfig::default();
        assert_eq!(Player::new("   ", &config).unwrap_err(), GameError::EmptyName);
        assert!(matches!(
            Player::new("ABCDEFGHIJKLMNOPQ", &config),
            Err(GameError::NameTooLong { len: 17, max: 16 })
        ));
        assert_eq!(Player::new("  Ayla ", &config).unwrap().name(), "Ayla");
    }

    // =========================================================================
    // Equipment
    // =========================================================================

    #[test]
    fn test_weapon_raises_derived_stats() {
        let mut player = hero();
        let mut log = MessageLog::new();
        player.equip_weapon(WeaponStats::new("Sword", 100, 20, 5), &mut log);
        assert_eq!(player.max_hp(), 200);
        assert_eq!(player.hp(), 100);
        assert_eq!(player.ap(), 30);
        assert_eq!(player.dp(), 10);
    }

    #[test]
    fn test_downgrade_clips_current_hp() {
        let mut player = hero();
        let mut log = MessageLog::new();
        player.equip_weapon(WeaponStats::new("Charm", 20, 0, 0), &mut log);
        player.heal(20, &mut log).unwrap();
        assert_eq!((player.hp(), player.max_hp()), (120, 120));

        player.equip_weapon(WeaponStats::new("Stick", 0, 1, 0), &mut log);
        assert_eq!(player.max_hp(), 100);
        assert_eq!(player.hp(), 100);
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    #[test]
    fn test_use_potion_heals_only_when_consumed() {
        let mut player = hero();
        let mut log = MessageLog::new();
        player.take_damage(45, &mut log);
        assert_eq!(player.hp(), 60);

        assert_eq!(player.use_potion(1, &mut log), Ok(false));
        assert_eq!(player.hp(), 60);

        player.buy_potion(2, &mut log).unwrap();
        assert_eq!(player.use_potion(2, &mut log), Ok(true));
        assert_eq!(player.hp(), 80);
        assert_eq!(player.potions(), 0);
    }

    #[test]
    fn test_use_three_potions_with_two_held() {
        let mut config = GameConfig::default();
        config.player.initial_potions = 2;
        let mut player = Player::new("Hero", &config).unwrap();
        let mut log = MessageLog::new();

        assert_eq!(player.use_potion(3, &mut log), Ok(false));
        assert_eq!(player.potions(), 2);
        assert_eq!(log.count(MessageType::Warning), 1);
    }

    #[test]
    fn test_heal_message_reports_actual_gain() {
        let mut config = GameConfig::default();
        config.player.initial_potions = 2;
        let mut player = Player::new("Hero", &config).unwrap();
        let mut log = MessageLog::new();

        assert_eq!(player.use_potion(1, &mut log), Ok(true));
        player.take_damage(10, &mut log);
        assert_eq!(player.hp(), 95);
        assert_eq!(player.use_potion(1, &mut log), Ok(true));

        let heals: Vec<&str> = log
            .messages()
            .iter()
            .filter(|m| m.text.starts_with("You heal"))
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(heals, vec!["You heal 0 HP", "You heal 5 HP"]);
    }

    #[test]
    fn test_zero_amounts_are_contract_errors() {
        let mut player = hero();
        let mut log = MessageLog::new();
        assert!(player.heal(0, &mut log).is_err());
        assert!(player.use_potion(0, &mut log).is_err());
        assert!(player.buy_potion(0, &mut log).is_err());
        assert!(log.is_empty());
    }

    // =========================================================================
    // Rewards
    // =========================================================================

    #[test]
    fn test_defeat_enemy_grants_rewards_and_level() {
        let mut player = hero();
        let spec = EnemySpec {
            name: "Ogre".to_string(),
            hp: 50,
            ap: 8,
            dp: 2,
            attack_strategy: "Melee".to_string(),
            experience: 120,
        };
        let enemy = Enemy::from_spec(&spec, &EnemyConfig::default(), &mut StdRng::seed_from_u64(7));
        let gold = enemy.yield_gold();
        let mut log = MessageLog::new();

        player.defeat_enemy(&enemy, &mut log);
        assert_eq!(player.gold(), 50 + gold);
        assert_eq!(player.level(), 2);
        assert_eq!(player.total_experience(), 20);
        assert_eq!(player.max_hp(), 110);
        assert_eq!(player.hp(), 110);
        assert_eq!(player.ap(), 12);
        assert_eq!(player.dp(), 6);
    }

    // =========================================================================
    // Save data
    // =========================================================================

    #[test]
    fn test_save_data_round_trip() {
        let config = GameConfig::default();
        let mut player = hero();
        let mut log = MessageLog::new();
        player.equip_weapon(WeaponStats::new("Spear", 90, 25, 4), &mut log);
        player.take_damage(40, &mut log);
        player.set_attack_strategy(AttackStrategy::Magic);

        let data = player.save_data("slot1");
        assert_eq!(data.max_hp, 190);
        assert_eq!(data.current_hp, 69);
        assert_eq!(data.slot_name, "slot1");

        let restored = Player::from_save_data(&data, &config).unwrap();
        assert_eq!(restored.base_hp(), 100);
        assert_eq!(restored.max_hp(), 190);
        assert_eq!(restored.hp(), 69);
        assert_eq!(restored.ap(), 35);
        assert_eq!(restored.weapon().name(), "Spear");
        assert_eq!(restored.attack_strategy(), AttackStrategy::Magic);
    }

    #[test]
    fn test_load_or_new_restores_or_starts_fresh() {
        let config = GameConfig::default();
        let mut store = MemorySaveStore::new();
        let mut saved = hero();
        saved.gain_gold(100, &mut MessageLog::new());
        store.save(&saved.save_data("auto_save")).unwrap();

        let mut log = MessageLog::new();
        let resumed = Player::load_or_new(&store, " Hero ", "auto_save", &config, &mut log).unwrap();
        assert_eq!(resumed.gold(), 150);
        assert_eq!(log.messages()[0].text, "Welcome back, Hero!");

        let mut log = MessageLog::new();
        let fresh = Player::load_or_new(&store, "Zed", "auto_save", &config, &mut log).unwrap();
        assert_eq!(fresh.gold(), 50);
        assert_eq!(log.count(MessageType::Info), 1);
        assert_eq!(log.count(MessageType::Warning), 0);
    }

    #[test]
    fn test_load_or_new_rejects_bad_name() {
        let store = MemorySaveStore::new();
        let mut log = MessageLog::new();
        let result = Player::load_or_new(&store, "  ", "auto_save", &GameConfig::default(), &mut log);
        assert_eq!(result.unwrap_err(), GameError::EmptyName);
        assert!(log.is_empty());
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let player = hero();
        let state = player.snapshot();
        assert_eq!(state.name, "Hero");
        assert_eq!(state.hp, 100);
        assert_eq!(state.equipped_weapon, "Default");
        assert!(state.is_alive);
        assert_eq!(state.attack_power, 10);
        assert_eq!(state.defense_power, 5);
    }
}

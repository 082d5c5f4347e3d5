//! Weighted random encounters.

use rand::Rng;
use tracing::debug;

use crate::character::{EnemyCatalog, Player};
use crate::combat::{BattleManager, BattleOutcome};
use crate::core::config::GameConfig;
use crate::events::{GameRecord, RestSystem, ShopSystem};
use crate::input::GameInput;
use crate::items::WeaponCatalog;
use crate::messages::{GameMessage, MessageLog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEventType {
    Shop,
    Battle,
}

#[derive(Debug, Clone)]
pub struct EventResult {
    /// False once the player has died.
    pub continue_game: bool,
    pub event_type: GameEventType,
    pub battle_outcome: Option<BattleOutcome>,
    pub messages: Vec<GameMessage>,
}

/// Owns the session's content and picks one encounter per call.
#[derive(Debug, Clone)]
pub struct EventManager {
    config: GameConfig,
    enemies: EnemyCatalog,
    weapons: WeaponCatalog,
}

impl EventManager {
    pub fn new(config: GameConfig, enemies: EnemyCatalog, weapons: WeaponCatalog) -> Self {
        Self {
            config,
            enemies,
            weapons,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn enemies(&self) -> &EnemyCatalog {
        &self.enemies
    }

    pub fn weapons(&self) -> &WeaponCatalog {
        &self.weapons
    }

    /// Draws from `[0, total_weight)`; values below the shop weight pick a shop.
    pub fn determine_event_type(&self, rng: &mut impl Rng) -> GameEventType {
        let events = &self.config.events;
        let total = events.total_weight();
        if total == 0 {
            return GameEventType::Battle;
        }
        let roll = rng.gen_range(0..total);
        if roll < events.shop_event_weight {
            GameEventType::Shop
        } else {
            GameEventType::Battle
        }
    }

    pub fn trigger_random_event(
        &self,
        player: &mut Player,
        input: &mut dyn GameInput,
        record: &mut GameRecord,
        rng: &mut impl Rng,
    ) -> EventResult {
        let event_type = self.determine_event_type(rng);
        debug!(?event_type, "random event");
        self.run_event(event_type, player, input, record, rng)
    }

    pub fn run_event(
        &self,
        event_type: GameEventType,
        player: &mut Player,
        input: &mut dyn GameInput,
        record: &mut GameRecord,
        rng: &mut impl Rng,
    ) -> EventResult {
        let mut log = MessageLog::new();
        let battle_outcome = match event_type {
            GameEventType::Shop => {
                self.shop_event(player, input, rng, &mut log);
                None
            }
            GameEventType::Battle => Some(self.battle_event(player, input, record, rng, &mut log)),
        };

        EventResult {
            continue_game: player.is_alive(),
            event_type,
            battle_outcome,
            messages: log.into_messages(),
        }
    }

    fn shop_event(
        &self,
        player: &mut Player,
        input: &mut dyn GameInput,
        rng: &mut impl Rng,
        log: &mut MessageLog,
    ) {
        log.system("=== You found a shop! ===");

        let shop = &self.config.shop;
        let bonus = rng.gen_range(shop.gold_reward_min..=shop.gold_reward_max.max(shop.gold_reward_min));
        player.gain_gold(bonus, log);
        log.gold(format!("You received {} gold as a discovery bonus!", bonus));

        let shop_state = ShopSystem::shop_state(&self.config, &self.weapons);
        let action = input.select_shop_action(&shop_state, &player.snapshot());
        ShopSystem::process(player, &action, &self.weapons, log);

        log.info(format!("Status - {}: {} HP", player.name(), player.hp()));

        let rest = input.select_rest_action(&player.snapshot());
        RestSystem::process(player, rest.as_ref(), log);
    }

    fn battle_event(
        &self,
        player: &mut Player,
        input: &mut dyn GameInput,
        record: &mut GameRecord,
        rng: &mut impl Rng,
        log: &mut MessageLog,
    ) -> BattleOutcome {
        log.system("=== You encounter a wild enemy! ===");

        let result = BattleManager::new(&self.enemies, &self.config.enemy)
            .start_battle(player, input, record, rng);
        log.extend(result.messages);

        if player.is_alive() {
            let rest = input.select_rest_action(&player.snapshot());
            RestSystem::process(player, rest.as_ref(), log);
        }
        result.outcome
    }
}

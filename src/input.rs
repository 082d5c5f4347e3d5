//! The input boundary: player actions, their validation, the read-only
//! snapshots handed to an input provider, and the built-in [`AutoPilot`].

use serde::{Deserialize, Serialize};

use crate::combat::AttackStrategy;
use crate::core::constants::POTION_ITEM_NAME;

// ── Snapshots ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub level: u32,
    pub experience: u32,
    pub gold: u32,
    pub potions: u32,
    pub equipped_weapon: String,
    pub is_alive: bool,
    pub attack_power: u32,
    pub defense_power: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyState {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub is_alive: bool,
    pub attack_strategy: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    pub turn_number: u32,
    pub available_strategies: Vec<String>,
    pub last_player_action: Option<String>,
    pub last_damage_dealt: u32,
    pub last_damage_taken: u32,
    pub player_won: bool,
    pub battle_ended: bool,
}

impl Default for BattleState {
    fn default() -> Self {
        Self {
            turn_number: 0,
            available_strategies: AttackStrategy::names()
                .into_iter()
                .map(String::from)
                .collect(),
            last_player_action: None,
            last_damage_dealt: 0,
            last_damage_taken: 0,
            player_won: false,
            battle_ended: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    pub name: String,
    pub price: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponInfo {
    pub name: String,
    pub hp: u32,
    pub ap: u32,
    pub dp: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopState {
    pub items: Vec<ShopItem>,
    pub weapons: Vec<WeaponInfo>,
    pub potion_price: u32,
}

// ── Actions ──

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackAction {
    pub strategy_name: String,
}

impl AttackAction {
    pub fn new(strategy_name: impl Into<String>) -> Self {
        Self {
            strategy_name: strategy_name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopActionKind {
    BuyPotion,
    BuyWeapon,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopAction {
    pub kind: ShopActionKind,
    pub item_name: Option<String>,
    pub quantity: u32,
}

impl ShopAction {
    pub fn buy_potion(quantity: u32) -> Self {
        Self {
            kind: ShopActionKind::BuyPotion,
            item_name: Some(POTION_ITEM_NAME.to_string()),
            quantity,
        }
    }

    pub fn buy_weapon(name: impl Into<String>) -> Self {
        Self {
            kind: ShopActionKind::BuyWeapon,
            item_name: Some(name.into()),
            quantity: 1,
        }
    }

    pub fn exit() -> Self {
        Self {
            kind: ShopActionKind::Exit,
            item_name: None,
            quantity: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseItemAction {
    pub item_name: String,
    pub quantity: u32,
}

impl UseItemAction {
    pub fn potion(quantity: u32) -> Self {
        Self {
            item_name: POTION_ITEM_NAME.to_string(),
            quantity,
        }
    }
}

/// What to do between encounters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameControlAction {
    Continue,
    SaveAndContinue,
    SaveAndQuit,
    Quit,
}

impl GameControlAction {
    pub fn saves(self) -> bool {
        matches!(
            self,
            GameControlAction::SaveAndContinue | GameControlAction::SaveAndQuit
        )
    }

    pub fn quits(self) -> bool {
        matches!(self, GameControlAction::SaveAndQuit | GameControlAction::Quit)
    }
}

// ── Validation ──

/// Resolves an attack action to a strategy. Names are matched ignoring case.
pub fn validate_attack(action: &AttackAction) -> Result<AttackStrategy, String> {
    if action.strategy_name.trim().is_empty() {
        return Err("Attack strategy name is required.".to_string());
    }
    AttackStrategy::parse(&action.strategy_name).ok_or_else(|| {
        format!(
            "Invalid attack strategy: '{}'. Valid options: {}",
            action.strategy_name.trim(),
            AttackStrategy::names().join(", ")
        )
    })
}

pub fn validate_shop(action: &ShopAction) -> Result<(), String> {
    if action.kind == ShopActionKind::Exit {
        return Ok(());
    }
    if action.quantity == 0 {
        return Err("Quantity must be positive.".to_string());
    }
    if action.kind == ShopActionKind::BuyWeapon
        && action
            .item_name
            .as_deref()
            .map_or(true, |name| name.trim().is_empty())
    {
        return Err("Weapon name is required.".to_string());
    }
    Ok(())
}

pub fn validate_use_item(action: &UseItemAction) -> Result<(), String> {
    if action.item_name.trim().is_empty() {
        return Err("Item name is required.".to_string());
    }
    if action.quantity == 0 {
        return Err("Quantity must be positive.".to_string());
    }
    Ok(())
}

// ── Providers ──

/// Source of player decisions. Implementations never mutate game state; they
/// only look at the snapshots they are given.
pub trait GameInput {
    fn select_attack_action(
        &mut self,
        battle: &BattleState,
        player: &PlayerState,
        enemy: &EnemyState,
    ) -> AttackAction;

    fn select_shop_action(&mut self, shop: &ShopState, player: &PlayerState) -> ShopAction;

    /// `None` skips resting.
    fn select_rest_action(&mut self, player: &PlayerState) -> Option<UseItemAction>;

    fn select_game_action(&mut self, player: &PlayerState) -> GameControlAction;
}

/// Deterministic policy: fixed attack strategy, gears up once, buys potions
/// when it can, drinks one below half HP, and stops after a set number of
/// encounters.
#[derive(Debug, Clone)]
pub struct AutoPilot {
    strategy: AttackStrategy,
    preferred_weapon: Option<String>,
    potions_per_visit: u32,
    max_encounters: u32,
    encounters_seen: u32,
    save_on_quit: bool,
}

impl AutoPilot {
    pub fn new(max_encounters: u32) -> Self {
        Self {
            strategy: AttackStrategy::Melee,
            preferred_weapon: None,
            potions_per_visit: 3,
            max_encounters,
            encounters_seen: 0,
            save_on_quit: false,
        }
    }

    pub fn with_strategy(mut self, strategy: AttackStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_weapon(mut self, name: impl Into<String>) -> Self {
        self.preferred_weapon = Some(name.into());
        self
    }

    pub fn saving_on_quit(mut self) -> Self {
        self.save_on_quit = true;
        self
    }

    pub fn encounters_seen(&self) -> u32 {
        self.encounters_seen
    }
}

impl GameInput for AutoPilot {
    fn select_attack_action(
        &mut self,
        _battle: &BattleState,
        _player: &PlayerState,
        _enemy: &EnemyState,
    ) -> AttackAction {
        AttackAction::new(self.strategy.name())
    }

    fn select_shop_action(&mut self, shop: &ShopState, player: &PlayerState) -> ShopAction {
        if let Some(wanted) = &self.preferred_weapon {
            let stocked = shop
                .weapons
                .iter()
                .any(|w| w.name.eq_ignore_ascii_case(wanted));
            if stocked && !player.equipped_weapon.eq_ignore_ascii_case(wanted) {
                return ShopAction::buy_weapon(wanted.clone());
            }
        }

        if shop.potion_price == 0 {
            return ShopAction::buy_potion(self.potions_per_visit);
        }
        let affordable = (player.gold / shop.potion_price).min(self.potions_per_visit);
        if affordable > 0 {
            ShopAction::buy_potion(affordable)
        } else {
            ShopAction::exit()
        }
    }

    fn select_rest_action(&mut self, player: &PlayerState) -> Option<UseItemAction> {
        if player.potions > 0 && player.hp.saturating_mul(2) < player.max_hp {
            Some(UseItemAction::potion(1))
        } else {
            None
        }
    }

    fn select_game_action(&mut self, _player: &PlayerState) -> GameControlAction {
        self.encounters_seen += 1;
        if self.encounters_seen < self.max_encounters {
            GameControlAction::Continue
        } else if self.save_on_quit {
            GameControlAction::SaveAndQuit
        } else {
            GameControlAction::Quit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_state(hp: u32, max_hp: u32, gold: u32, potions: u32) -> PlayerState {
        PlayerState {
            name: "Hero".to_string(),
            hp,
            max_hp,
            level: 1,
            experience: 0,
            gold,
            potions,
            equipped_weapon: "Default".to_string(),
            is_alive: hp > 0,
            attack_power: 10,
            defense_power: 5,
        }
    }

    fn shop(potion_price: u32) -> ShopState {
        ShopState {
            items: Vec::new(),
            weapons: vec![WeaponInfo {
                name: "Sword".to_string(),
                hp: 100,
                ap: 20,
                dp: 5,
            }],
            potion_price,
        }
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn test_validate_attack() {
        assert_eq!(
            validate_attack(&AttackAction::new("magic")),
            Ok(AttackStrategy::Magic)
        );
        assert_eq!(
            validate_attack(&AttackAction::new("  ")),
            Err("Attack strategy name is required.".to_string())
        );
        let err = validate_attack(&AttackAction::new("Kick")).unwrap_err();
        assert!(err.contains("'Kick'"));
        assert!(err.contains("Default, Melee, Magic"));
    }

    #[test]
    fn test_validate_shop() {
        assert!(validate_shop(&ShopAction::buy_potion(2)).is_ok());
        assert!(validate_shop(&ShopAction::exit()).is_ok());
        assert_eq!(
            validate_shop(&ShopAction::buy_potion(0)),
            Err("Quantity must be positive.".to_string())
        );
        let nameless = ShopAction {
            kind: ShopActionKind::BuyWeapon,
            item_name: None,
            quantity: 1,
        };
        assert_eq!(
            validate_shop(&nameless),
            Err("Weapon name is required.".to_string())
        );
    }

    #[test]
    fn test_validate_use_item() {
        assert!(validate_use_item(&UseItemAction::potion(1)).is_ok());
        assert!(validate_use_item(&UseItemAction::potion(0)).is_err());
        let blank = UseItemAction {
            item_name: String::new(),
            quantity: 1,
        };
        assert_eq!(
            validate_use_item(&blank),
            Err("Item name is required.".to_string())
        );
    }

    #[test]
    fn test_control_action_flags() {
        assert!(GameControlAction::SaveAndQuit.saves());
        assert!(GameControlAction::SaveAndQuit.quits());
        assert!(GameControlAction::SaveAndContinue.saves());
        assert!(!GameControlAction::SaveAndContinue.quits());
        assert!(!GameControlAction::Continue.saves());
    }

    // =========================================================================
    // AutoPilot
    // =========================================================================

    #[test]
    fn test_autopilot_buys_what_it_can_afford() {
        let mut pilot = AutoPilot::new(5);
        let action = pilot.select_shop_action(&shop(10), &player_state(100, 100, 25, 0));
        assert_eq!(action, ShopAction::buy_potion(2));

        let broke = pilot.select_shop_action(&shop(10), &player_state(100, 100, 5, 0));
        assert_eq!(broke.kind, ShopActionKind::Exit);
    }

    #[test]
    fn test_autopilot_prefers_weapon_once() {
        let mut pilot = AutoPilot::new(5).with_weapon("sword");
        let first = pilot.select_shop_action(&shop(10), &player_state(100, 100, 50, 0));
        assert_eq!(first.kind, ShopActionKind::BuyWeapon);

        let mut armed = player_state(100, 100, 50, 0);
        armed.equipped_weapon = "Sword".to_string();
        let second = pilot.select_shop_action(&shop(10), &armed);
        assert_eq!(second.kind, ShopActionKind::BuyPotion);
    }

    #[test]
    fn test_autopilot_rests_below_half() {
        let mut pilot = AutoPilot::new(5);
        assert_eq!(pilot.select_rest_action(&player_state(60, 100, 0, 2)), None);
        assert_eq!(
            pilot.select_rest_action(&player_state(40, 100, 0, 2)),
            Some(UseItemAction::potion(1))
        );
        assert_eq!(pilot.select_rest_action(&player_state(40, 100, 0, 0)), None);
    }

    #[test]
    fn test_autopilot_stops_after_limit() {
        let mut pilot = AutoPilot::new(2).saving_on_quit();
        let state = player_state(100, 100, 0, 0);
        assert_eq!(pilot.select_game_action(&state), GameControlAction::Continue);
        assert_eq!(pilot.select_game_action(&state), GameControlAction::SaveAndQuit);
        assert_eq!(pilot.encounters_seen(), 2);
    }
}

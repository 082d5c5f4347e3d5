//! Integration test: full sessions through the state machine
//!
//! Drives `GameStateMachine` with scripted inputs and checks the flow between
//! encounters, saving, and the end-of-game summary.

use std::collections::{BTreeMap, VecDeque};

use cli_rpg::character::{EnemyCatalog, EnemySpec, Player, PlayerSaveData};
use cli_rpg::core::{FlowState, GameConfig, GameFlowContext, GameStateMachine};
use cli_rpg::error::PersistenceError;
use cli_rpg::events::EventManager;
use cli_rpg::input::{
    AttackAction, BattleState, EnemyState, GameControlAction, GameInput, PlayerState, ShopAction,
    ShopState, UseItemAction,
};
use cli_rpg::items::WeaponCatalog;
use cli_rpg::messages::{MemorySink, MessageType};
use cli_rpg::utils::{MemorySaveStore, SaveStore};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Plays Melee, skips shops and rests, and follows a fixed list of
/// between-encounter choices (quitting once it runs out).
struct Scripted {
    choices: VecDeque<GameControlAction>,
    asked: u32,
}

impl Scripted {
    fn new(choices: &[GameControlAction]) -> Self {
        Self {
            choices: choices.iter().copied().collect(),
            asked: 0,
        }
    }
}

impl GameInput for Scripted {
    fn select_attack_action(
        &mut self,
        _battle: &BattleState,
        _player: &PlayerState,
        _enemy: &EnemyState,
    ) -> AttackAction {
        AttackAction::new("Melee")
    }

    fn select_shop_action(&mut self, _shop: &ShopState, _player: &PlayerState) -> ShopAction {
        ShopAction::exit()
    }

    fn select_rest_action(&mut self, _player: &PlayerState) -> Option<UseItemAction> {
        None
    }

    fn select_game_action(&mut self, _player: &PlayerState) -> GameControlAction {
        self.asked += 1;
        self.choices.pop_front().unwrap_or(GameControlAction::Quit)
    }
}

/// Rejects every write.
struct BrokenStore;

impl SaveStore for BrokenStore {
    fn save(&mut self, _data: &PlayerSaveData) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("disk full".to_string()))
    }

    fn load(&self, _name: &str, _slot: &str) -> Result<Option<PlayerSaveData>, PersistenceError> {
        Ok(None)
    }

    fn list_saves(&self, _name: &str) -> Result<Vec<PlayerSaveData>, PersistenceError> {
        Ok(Vec::new())
    }

    fn delete(&mut self, _name: &str, _slot: &str) -> Result<bool, PersistenceError> {
        Ok(false)
    }
}

fn enemy(name: &str, hp: u32, ap: u32, dp: u32) -> EnemyCatalog {
    let mut specs = BTreeMap::new();
    specs.insert(
        name.to_lowercase(),
        EnemySpec {
            name: name.to_string(),
            hp,
            ap,
            dp,
            attack_strategy: "Default".to_string(),
            experience: 10,
        },
    );
    EnemyCatalog::from_specs(specs).unwrap()
}

/// Battles only, so every encounter is a fight.
fn battles_only(enemies: EnemyCatalog, input: Scripted) -> GameFlowContext<Scripted, MemorySink> {
    let mut config = GameConfig::default();
    config.events.shop_event_weight = 0;
    let player = Player::new("Hero", &config).unwrap();
    let weapons = WeaponCatalog::from_config(&config);
    let events = EventManager::new(config, enemies, weapons);
    GameFlowContext::new(player, events, input, MemorySink::new(), StdRng::seed_from_u64(9))
}

// =============================================================================
// Flow
// =============================================================================

#[test]
fn test_continue_runs_another_encounter() {
    let input = Scripted::new(&[GameControlAction::Continue, GameControlAction::Continue]);
    let mut ctx = battles_only(enemy("Rat", 5, 0, 0), input);
    let mut machine = GameStateMachine::new();

    machine.run(&mut ctx);

    assert_eq!(ctx.encounters(), 3);
    assert_eq!(ctx.input.asked, 3);
    assert_eq!(ctx.record.wins, 3);
    assert_eq!(
        machine.history(),
        &[
            FlowState::Start,
            FlowState::Encounter,
            FlowState::PostEncounter,
            FlowState::Encounter,
            FlowState::PostEncounter,
            FlowState::Encounter,
            FlowState::PostEncounter,
            FlowState::GameOver,
        ]
    );
    assert!(ctx.sink.contains("Total Wins: 3"));
    assert!(ctx.sink.contains("Win Rate: 100.00%"));
}

#[test]
fn test_death_skips_the_continue_prompt() {
    let input = Scripted::new(&[]);
    let mut ctx = battles_only(enemy("Dragon", 5000, 500, 100), input);
    let mut machine = GameStateMachine::new();

    machine.run(&mut ctx);

    assert!(!ctx.is_player_alive());
    assert_eq!(ctx.input.asked, 0);
    assert_eq!(ctx.record.losses, 1);
    assert_eq!(
        machine.history(),
        &[FlowState::Start, FlowState::Encounter, FlowState::GameOver]
    );
    assert!(ctx.sink.contains("GAME OVER"));
    assert!(!ctx.sink.contains("Thank you for playing!"));
    assert!(ctx.sink.contains("Hero has fallen..."));
}

#[test]
fn test_game_over_summary_lists_final_stats() {
    let mut ctx = battles_only(enemy("Rat", 5, 0, 0), Scripted::new(&[]));
    GameStateMachine::new().run(&mut ctx);

    let texts = ctx.sink.texts();
    let banner = texts
        .iter()
        .position(|t| *t == "Thank you for playing!")
        .unwrap();
    assert_eq!(texts[banner - 1], "===========================================");
    assert_eq!(texts[banner + 1], "===========================================");
    assert!(texts.contains(&"Final Stats:"));
    assert!(ctx
        .sink
        .contains(&format!("  Gold Earned: {}", ctx.player.gold())));
    assert!(ctx.sink.contains("  Potions Remaining: 0"));
}

// =============================================================================
// Saving
// =============================================================================

#[test]
fn test_failed_save_warns_once_and_keeps_playing() {
    let input = Scripted::new(&[GameControlAction::SaveAndContinue, GameControlAction::Quit]);
    let mut ctx =
        battles_only(enemy("Rat", 5, 0, 0), input).with_store(Box::new(BrokenStore));

    GameStateMachine::new().run(&mut ctx);

    let failures: Vec<_> = ctx
        .sink
        .messages
        .iter()
        .filter(|m| m.text.starts_with("Save failed"))
        .collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].kind, MessageType::Warning);
    assert!(failures[0].text.contains("disk full"));
    assert_eq!(ctx.encounters(), 2);
    assert!(ctx.sink.contains("Game ended by player choice."));
}

#[test]
fn test_save_and_continue_writes_the_slot() {
    let input = Scripted::new(&[GameControlAction::SaveAndContinue, GameControlAction::Quit]);
    let mut ctx = battles_only(enemy("Rat", 5, 0, 0), input)
        .with_store(Box::new(MemorySaveStore::new()))
        .with_save_slot("checkpoint");

    GameStateMachine::new().run(&mut ctx);

    let store = ctx.store().unwrap();
    assert!(store.load("Hero", "auto_save").unwrap().is_none());
    let saved = store.load("Hero", "checkpoint").unwrap().unwrap();
    assert_eq!(saved.slot_name, "checkpoint");
    assert_eq!(saved.total_experience, 10);
    assert_eq!(
        ctx.sink
            .messages
            .iter()
            .filter(|m| m.kind == MessageType::Success && m.text.starts_with("Game saved"))
            .count(),
        1
    );
}

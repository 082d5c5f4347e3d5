//! Integration test: random event dispatch
//!
//! Covers the weighted shop/battle draw and what each event does to the player.

use std::collections::BTreeMap;

use cli_rpg::character::{EnemyCatalog, EnemySpec, Player};
use cli_rpg::combat::BattleOutcome;
use cli_rpg::core::GameConfig;
use cli_rpg::events::{EventManager, GameEventType, GameRecord};
use cli_rpg::input::AutoPilot;
use cli_rpg::items::WeaponCatalog;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn slime_catalog() -> EnemyCatalog {
    let mut specs = BTreeMap::new();
    specs.insert(
        "slime".to_string(),
        EnemySpec {
            name: "Slime".to_string(),
            hp: 10,
            ap: 0,
            dp: 0,
            attack_strategy: "Default".to_string(),
            experience: 10,
        },
    );
    EnemyCatalog::from_specs(specs).unwrap()
}

fn manager(config: GameConfig) -> EventManager {
    let weapons = WeaponCatalog::from_config(&config);
    EventManager::new(config, slime_catalog(), weapons)
}

// =============================================================================
// Weighted draw
// =============================================================================

#[test]
fn test_default_weights_give_one_shop_in_three() {
    let events = manager(GameConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let draws = 6000;

    let shops = (0..draws)
        .filter(|_| events.determine_event_type(&mut rng) == GameEventType::Shop)
        .count();

    let ratio = shops as f64 / draws as f64;
    assert!((0.30..0.37).contains(&ratio), "shop ratio was {}", ratio);
}

#[test]
fn test_custom_weights_shift_the_ratio() {
    let mut config = GameConfig::default();
    config.events.shop_event_weight = 3;
    config.events.battle_event_weight = 1;
    let events = manager(config);
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let draws = 4000;

    let shops = (0..draws)
        .filter(|_| events.determine_event_type(&mut rng) == GameEventType::Shop)
        .count();

    let ratio = shops as f64 / draws as f64;
    assert!((0.71..0.79).contains(&ratio), "shop ratio was {}", ratio);
}

#[test]
fn test_same_seed_same_sequence() {
    let events = manager(GameConfig::default());
    let mut a = StdRng::seed_from_u64(8);
    let mut b = StdRng::seed_from_u64(8);
    for _ in 0..100 {
        assert_eq!(
            events.determine_event_type(&mut a),
            events.determine_event_type(&mut b)
        );
    }
}

// =============================================================================
// Event effects
// =============================================================================

#[test]
fn test_shop_event_pays_bonus_and_sells_potions() {
    let config = GameConfig::default();
    let events = manager(config.clone());
    let mut player = Player::new("Hero", &config).unwrap();
    let mut record = GameRecord::new();
    let mut rng = StdRng::seed_from_u64(4);

    let result = events.run_event(
        GameEventType::Shop,
        &mut player,
        &mut AutoPilot::new(5),
        &mut record,
        &mut rng,
    );

    assert_eq!(result.event_type, GameEventType::Shop);
    assert!(result.battle_outcome.is_none());
    assert!(result.continue_game);
    assert_eq!(record.total_games(), 0);

    // 50 starting gold plus a 10..=20 bonus, minus three potions at 10 each
    assert!((30..=40).contains(&player.gold()), "gold was {}", player.gold());
    assert_eq!(player.potions(), 3);

    let lines: Vec<&str> = result.messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(lines[0], "=== You found a shop! ===");
    assert!(lines[1].starts_with("You gain "));
    assert!(lines[2].starts_with("You received "));
    assert!(lines[2].ends_with(" gold as a discovery bonus!"));
    assert!(lines.contains(&"You bought 3 potions"));
    assert!(lines.contains(&"Status - Hero: 100 HP"));
    assert_eq!(lines.last(), Some(&"You decided not to rest."));
}

#[test]
fn test_shop_event_equips_preferred_weapon() {
    let config = GameConfig::default();
    let events = manager(config.clone());
    let mut player = Player::new("Hero", &config).unwrap();
    let mut rng = StdRng::seed_from_u64(4);

    events.run_event(
        GameEventType::Shop,
        &mut player,
        &mut AutoPilot::new(5).with_weapon("axe"),
        &mut GameRecord::new(),
        &mut rng,
    );

    assert_eq!(player.weapon().name(), "Axe");
    assert_eq!(player.ap(), 40);
    assert_eq!(player.max_hp(), 180);
    // Equipping never raises current HP
    assert_eq!(player.hp(), 100);
}

#[test]
fn test_battle_event_records_the_win() {
    let config = GameConfig::default();
    let events = manager(config.clone());
    let mut player = Player::new("Hero", &config).unwrap();
    let mut record = GameRecord::new();
    let mut rng = StdRng::seed_from_u64(12);

    let result = events.run_event(
        GameEventType::Battle,
        &mut player,
        &mut AutoPilot::new(5),
        &mut record,
        &mut rng,
    );

    assert_eq!(result.event_type, GameEventType::Battle);
    assert_eq!(result.battle_outcome, Some(BattleOutcome::Victory));
    assert!(result.continue_game);
    assert_eq!(record.wins, 1);
    assert_eq!(player.total_experience(), 10);
    assert_eq!(
        result.messages.first().map(|m| m.text.as_str()),
        Some("=== You encounter a wild enemy! ===")
    );
}

#[test]
fn test_trigger_random_event_mixes_both_kinds() {
    let config = GameConfig::default();
    let events = manager(config.clone());
    let mut player = Player::new("Hero", &config).unwrap();
    let mut record = GameRecord::new();
    let mut rng = StdRng::seed_from_u64(77);
    let mut pilot = AutoPilot::new(100);
    let mut shops = 0;

    for _ in 0..30 {
        let result = events.trigger_random_event(&mut player, &mut pilot, &mut record, &mut rng);
        if result.event_type == GameEventType::Shop {
            shops += 1;
        }
        assert!(result.continue_game);
    }

    assert!(shops > 0);
    assert!(record.wins > 0);
    assert_eq!(shops + record.wins, 30);
}

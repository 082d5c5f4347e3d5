//! One battle from spawn to a terminal outcome.
//!
//! The fight is an explicit phase machine:
//!
//! ```text
//! BattleStart -> PlayerTurn -> EnemyTurn -> PlayerTurn -> ...
//!                    |             |
//!                 Victory       Defeat
//! ```

use rand::Rng;
use tracing::debug;

use crate::character::{Combatant, Enemy, EnemyCatalog, Player};
use crate::combat::AttackStrategy;
use crate::core::config::EnemyConfig;
use crate::core::constants::MAX_BATTLE_TURNS;
use crate::events::GameRecord;
use crate::input::{validate_attack, BattleState, GameInput};
use crate::messages::{GameMessage, MessageLog};

const DIVIDER: &str = "-------------------------------------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    BattleStart,
    PlayerTurn,
    EnemyTurn,
    Victory,
    Defeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    /// The battle could not start or never resolved.
    Error,
}

#[derive(Debug, Clone)]
pub struct BattleResult {
    pub outcome: BattleOutcome,
    pub enemy_name: Option<String>,
    pub turns: u32,
    /// The battle state as it stood when the fight ended.
    pub final_state: BattleState,
    pub messages: Vec<GameMessage>,
}

impl BattleResult {
    pub fn is_victory(&self) -> bool {
        self.outcome == BattleOutcome::Victory
    }

    pub fn is_defeat(&self) -> bool {
        self.outcome == BattleOutcome::Defeat
    }

    pub fn is_error(&self) -> bool {
        self.outcome == BattleOutcome::Error
    }
}

/// Runs battles against enemies drawn from a catalog.
#[derive(Debug, Clone, Copy)]
pub struct BattleManager<'a> {
    enemies: &'a EnemyCatalog,
    rewards: &'a EnemyConfig,
    max_turns: u32,
}

impl<'a> BattleManager<'a> {
    pub fn new(enemies: &'a EnemyCatalog, rewards: &'a EnemyConfig) -> Self {
        Self {
            enemies,
            rewards,
            max_turns: MAX_BATTLE_TURNS,
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Spawns a random enemy and fights it to the end.
    pub fn start_battle(
        &self,
        player: &mut Player,
        input: &mut dyn GameInput,
        record: &mut GameRecord,
        rng: &mut impl Rng,
    ) -> BattleResult {
        match self.enemies.create_random(self.rewards, rng) {
            Ok(enemy) => self.fight(player, enemy, input, record, rng),
            Err(e) => {
                let mut log = MessageLog::new();
                log.error(format!("Error starting battle: {}", e));
                BattleResult {
                    outcome: BattleOutcome::Error,
                    enemy_name: None,
                    turns: 0,
                    final_state: BattleState::default(),
                    messages: log.into_messages(),
                }
            }
        }
    }

    /// Fights a given enemy. Victory records a win and grants rewards; defeat
    /// records a loss; hitting the turn cap records neither.
    pub fn fight(
        &self,
        player: &mut Player,
        mut enemy: Enemy,
        input: &mut dyn GameInput,
        record: &mut GameRecord,
        rng: &mut impl Rng,
    ) -> BattleResult {
        let mut log = MessageLog::new();
        let mut state = BattleState::default();
        let mut phase = BattlePhase::BattleStart;

        let outcome = loop {
            debug!(?phase, turn = state.turn_number, "battle phase");
            phase = match phase {
                BattlePhase::BattleStart => {
                    log.system(format!("A wild {} appears!", enemy.name()));
                    BattlePhase::PlayerTurn
                }

                BattlePhase::PlayerTurn => {
                    if state.turn_number >= self.max_turns {
                        log.error(format!(
                            "The battle against {} did not resolve after {} turns.",
                            enemy.name(),
                            self.max_turns
                        ));
                        state.battle_ended = true;
                        break BattleOutcome::Error;
                    }
                    state.turn_number += 1;
                    log.system(format!("--- Turn {} ---", state.turn_number));

                    let action =
                        input.select_attack_action(&state, &player.snapshot(), &enemy.snapshot());
                    let strategy = match validate_attack(&action) {
                        Ok(strategy) => strategy,
                        Err(reason) => {
                            log.warning(format!("{} Using Default.", reason));
                            AttackStrategy::Default
                        }
                    };
                    player.set_attack_strategy(strategy);

                    log.combat(format!(
                        "{} attacks {} with {}!",
                        player.name(),
                        enemy.name(),
                        strategy
                    ));
                    let report = player.attack(Combatant::Enemy(&mut enemy), rng, &mut log);
                    log.combat(format!("Dealt {} damage!", report.damage_dealt));
                    log.combat(DIVIDER);

                    state.last_player_action = Some(strategy.name().to_string());
                    state.last_damage_dealt = report.damage_dealt;

                    if enemy.is_alive() {
                        BattlePhase::EnemyTurn
                    } else {
                        BattlePhase::Victory
                    }
                }

                BattlePhase::EnemyTurn => {
                    log.combat(format!(
                        "{} attacks {} with {}!",
                        enemy.name(),
                        player.name(),
                        enemy.attack_strategy()
                    ));
                    let report = enemy.attack(Combatant::Player(&mut *player), rng, &mut log);
                    log.combat(format!("Received {} damage!", report.damage_dealt));
                    log.combat(DIVIDER);

                    state.last_damage_taken = report.damage_dealt;

                    if player.is_alive() {
                        log.info(format!(
                            "Status: {}: {} HP | {}: {} HP",
                            player.name(),
                            player.hp(),
                            enemy.name(),
                            enemy.hp()
                        ));
                        BattlePhase::PlayerTurn
                    } else {
                        BattlePhase::Defeat
                    }
                }

                BattlePhase::Victory => {
                    log.success(format!("{} has been defeated!", enemy.name()));
                    record.record_win();
                    record.summary_messages(&mut log);
                    player.defeat_enemy(&enemy, &mut log);
                    state.player_won = true;
                    state.battle_ended = true;
                    break BattleOutcome::Victory;
                }

                BattlePhase::Defeat => {
                    log.error(format!("{} has fallen...", player.name()));
                    record.record_loss();
                    record.summary_messages(&mut log);
                    state.battle_ended = true;
                    break BattleOutcome::Defeat;
                }
            };
        };

        debug!(?outcome, turns = state.turn_number, "battle finished");
        BattleResult {
            outcome,
            enemy_name: Some(enemy.name().to_string()),
            turns: state.turn_number,
            final_state: state,
            messages: log.into_messages(),
        }
    }
}

//! Session flow: `Start -> Encounter <-> PostEncounter -> GameOver`.
//!
//! Each state is plain data with a transition function that runs against a
//! [`GameFlowContext`] and returns the next state, or `None` when the session
//! is over.

use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::character::Player;
use crate::core::constants::DEFAULT_SAVE_SLOT;
use crate::events::{EventManager, GameRecord};
use crate::input::GameInput;
use crate::messages::{MessageLog, MessageSink};
use crate::utils::SaveStore;

const BANNER: &str = "===========================================";

/// Everything one session needs, owned in one place.
pub struct GameFlowContext<I: GameInput, S: MessageSink> {
    pub player: Player,
    pub events: EventManager,
    pub record: GameRecord,
    pub input: I,
    pub sink: S,
    store: Option<Box<dyn SaveStore>>,
    rng: StdRng,
    save_slot: String,
    encounters: u32,
}

impl<I: GameInput, S: MessageSink> GameFlowContext<I, S> {
    pub fn new(player: Player, events: EventManager, input: I, sink: S, rng: StdRng) -> Self {
        Self {
            player,
            events,
            record: GameRecord::new(),
            input,
            sink,
            store: None,
            rng,
            save_slot: DEFAULT_SAVE_SLOT.to_string(),
            encounters: 0,
        }
    }

    pub fn with_store(mut self, store: Box<dyn SaveStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_save_slot(mut self, slot: impl Into<String>) -> Self {
        self.save_slot = slot.into();
        self
    }

    pub fn store(&self) -> Option<&dyn SaveStore> {
        self.store.as_deref()
    }

    pub fn encounters(&self) -> u32 {
        self.encounters
    }

    pub fn is_player_alive(&self) -> bool {
        self.player.is_alive()
    }

    fn publish(&mut self, log: MessageLog) {
        if !log.is_empty() {
            self.sink.publish(log.messages());
        }
    }

    fn run_encounter(&mut self) -> bool {
        self.encounters += 1;
        let mut log = MessageLog::new();
        log.system("--- New Encounter ---");
        self.publish(log);

        let result = self.events.trigger_random_event(
            &mut self.player,
            &mut self.input,
            &mut self.record,
            &mut self.rng,
        );
        self.sink.publish(&result.messages);
        result.continue_game && self.player.is_alive()
    }

    /// Saves to the configured slot. Emits exactly one message either way.
    fn save_game(&mut self, log: &mut MessageLog) {
        let Some(store) = self.store.as_mut() else {
            log.warning("Save is not available: no save store configured.");
            return;
        };
        let data = self.player.save_data(&self.save_slot);
        match store.save(&data) {
            Ok(()) => {
                info!(slot = %self.save_slot, "game saved");
                log.success(format!("Game saved (slot: {}).", self.save_slot));
            }
            Err(e) => {
                warn!("Save failed: {}", e);
                log.warning(format!("Save failed: {}", e));
            }
        }
    }

    /// Asks what to do next and performs any save. Returns whether to keep playing.
    fn confirm_continue(&mut self) -> bool {
        let action = self.input.select_game_action(&self.player.snapshot());
        let mut log = MessageLog::new();

        if action.saves() {
            self.save_game(&mut log);
        }
        let keep_playing = !action.quits();
        if !keep_playing {
            log.info("Game ended by player choice.");
        }
        debug!(?action, "post-encounter choice");
        self.publish(log);
        keep_playing
    }

    fn display_game_over(&mut self) {
        let mut log = MessageLog::new();
        log.system(BANNER);
        if self.player.is_alive() {
            log.system("Thank you for playing!");
        } else {
            log.system("GAME OVER");
        }
        log.system(BANNER);
        self.player.info_messages(&mut log);
        self.record.summary_messages(&mut log);
        log.info("Final Stats:");
        log.gold(format!("  Gold Earned: {}", self.player.gold()));
        log.info(format!("  Potions Remaining: {}", self.player.potions()));
        self.publish(log);
    }

    fn show_player_info(&mut self) {
        let mut log = MessageLog::new();
        self.player.info_messages(&mut log);
        self.publish(log);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Start,
    Encounter,
    PostEncounter,
    GameOver,
}

impl FlowState {
    pub fn name(self) -> &'static str {
        match self {
            FlowState::Start => "Start",
            FlowState::Encounter => "Encounter",
            FlowState::PostEncounter => "PostEncounter",
            FlowState::GameOver => "GameOver",
        }
    }

    pub fn execute<I: GameInput, S: MessageSink>(
        self,
        ctx: &mut GameFlowContext<I, S>,
    ) -> Option<FlowState> {
        match self {
            FlowState::Start => {
                let mut log = MessageLog::new();
                log.system("=== Game Start ===");
                ctx.publish(log);
                ctx.show_player_info();
                Some(FlowState::Encounter)
            }
            FlowState::Encounter => {
                if ctx.run_encounter() {
                    Some(FlowState::PostEncounter)
                } else {
                    Some(FlowState::GameOver)
                }
            }
            FlowState::PostEncounter => {
                ctx.show_player_info();
                if ctx.confirm_continue() {
                    Some(FlowState::Encounter)
                } else {
                    Some(FlowState::GameOver)
                }
            }
            FlowState::GameOver => {
                ctx.display_game_over();
                None
            }
        }
    }
}

/// Drives a session by executing states until one returns `None`.
#[derive(Debug, Clone)]
pub struct GameStateMachine {
    current: Option<FlowState>,
    history: Vec<FlowState>,
}

impl Default for GameStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self::starting_at(FlowState::Start)
    }

    pub fn starting_at(state: FlowState) -> Self {
        Self {
            current: Some(state),
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<FlowState> {
        self.current
    }

    /// States executed so far, in order.
    pub fn history(&self) -> &[FlowState] {
        &self.history
    }

    /// Executes the current state once. Returns false when already finished.
    pub fn step<I: GameInput, S: MessageSink>(&mut self, ctx: &mut GameFlowContext<I, S>) -> bool {
        let Some(state) = self.current.take() else {
            return false;
        };
        let next = state.execute(ctx);
        debug!(
            from = state.name(),
            to = next.map_or("End", FlowState::name),
            "state transition"
        );
        self.history.push(state);
        self.current = next;
        true
    }

    pub fn run<I: GameInput, S: MessageSink>(&mut self, ctx: &mut GameFlowContext<I, S>) {
        while self.step(ctx) {}
    }
}

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use cli_rpg::character::{EnemyCatalog, Player};
use cli_rpg::core::constants::{
    DEFAULT_CONFIG_PATH, DEFAULT_ENEMY_SPECS_PATH, DEFAULT_PLAYER_NAME, DEFAULT_SAVE_SLOT,
    DEFAULT_WEAPON_SPECS_PATH,
};
use cli_rpg::core::{GameConfig, GameFlowContext, GameStateMachine};
use cli_rpg::events::EventManager;
use cli_rpg::input::{
    AttackAction, BattleState, EnemyState, GameControlAction, GameInput, PlayerState, ShopAction,
    ShopState, UseItemAction,
};
use cli_rpg::items::WeaponCatalog;
use cli_rpg::messages::{GameMessage, MessageLog, MessageSink, MessageType};
use cli_rpg::utils::{JsonSaveStore, SaveStore};
use crossterm::style::Stylize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

struct CliArgs {
    config: PathBuf,
    enemies: PathBuf,
    weapons: PathBuf,
    save_dir: Option<PathBuf>,
    seed: Option<u64>,
    load: bool,
}

/// Prints messages to stdout, coloured by kind.
struct ConsoleSink;

impl MessageSink for ConsoleSink {
    fn publish(&mut self, messages: &[GameMessage]) {
        for message in messages {
            let text = message.text.as_str();
            match message.kind {
                MessageType::Info => println!("{}", text),
                MessageType::Success => println!("{}", text.green()),
                MessageType::Warning => println!("{}", text.yellow()),
                MessageType::Error => println!("{}", text.red().bold()),
                MessageType::Combat => println!("{}", text.red()),
                MessageType::System => println!("{}", text.cyan().bold()),
                MessageType::Experience => println!("{}", text.magenta()),
                MessageType::Gold => println!("{}", text.yellow().bold()),
            }
        }
    }
}

/// Numbered menus over any line reader. End of input counts as quitting.
struct ConsoleInput<R: BufRead> {
    reader: R,
}

impl<R: BufRead> ConsoleInput<R> {
    fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Returns the trimmed line, or `None` at end of input.
    fn prompt(&mut self, text: &str) -> Option<String> {
        print!("{} ", text.bold());
        let _ = io::stdout().flush();
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    /// Re-asks until a number in `1..=max` is given.
    fn choose(&mut self, text: &str, max: usize) -> Option<usize> {
        loop {
            let answer = self.prompt(text)?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=max).contains(&n) => return Some(n),
                _ => println!("{}", format!("Please enter a number from 1 to {}.", max).yellow()),
            }
        }
    }

    fn quantity(&mut self, text: &str) -> Option<u32> {
        loop {
            let answer = self.prompt(text)?;
            match answer.parse::<u32>() {
                Ok(n) => return Some(n),
                Err(_) => println!("{}", "Please enter a whole number.".yellow()),
            }
        }
    }
}

impl<R: BufRead> GameInput for ConsoleInput<R> {
    fn select_attack_action(
        &mut self,
        battle: &BattleState,
        player: &PlayerState,
        enemy: &EnemyState,
    ) -> AttackAction {
        println!();
        println!(
            "{}",
            format!(
                "[Turn {}] {} {}/{} HP  vs  {} {}/{} HP",
                battle.turn_number + 1,
                player.name,
                player.hp,
                player.max_hp,
                enemy.name,
                enemy.hp,
                enemy.max_hp
            )
            .bold()
        );
        for (i, name) in battle.available_strategies.iter().enumerate() {
            println!("  {}) {}", i + 1, name);
        }
        let choice = self.choose("Choose your attack:", battle.available_strategies.len());
        let name = choice
            .and_then(|n| battle.available_strategies.get(n - 1))
            .cloned()
            .unwrap_or_default();
        AttackAction::new(name)
    }

    fn select_shop_action(&mut self, shop: &ShopState, player: &PlayerState) -> ShopAction {
        println!();
        println!("Gold: {}  Potions: {}", player.gold, player.potions);
        for item in &shop.items {
            println!("  {} - {} gold ({})", item.name, item.price, item.description);
        }
        println!("  Weapons:");
        for weapon in &shop.weapons {
            println!(
                "    {} (HP +{}, AP +{}, DP +{})",
                weapon.name, weapon.hp, weapon.ap, weapon.dp
            );
        }
        println!("  1) Buy potions");
        println!("  2) Take a weapon");
        println!("  3) Leave");

        match self.choose("What would you like to do?", 3) {
            Some(1) => match self.quantity("How many potions?") {
                Some(n) => ShopAction::buy_potion(n),
                None => ShopAction::exit(),
            },
            Some(2) => match self.prompt("Weapon name:") {
                Some(name) => ShopAction::buy_weapon(name),
                None => ShopAction::exit(),
            },
            _ => ShopAction::exit(),
        }
    }

    fn select_rest_action(&mut self, player: &PlayerState) -> Option<UseItemAction> {
        if player.potions == 0 {
            return None;
        }
        println!();
        println!(
            "HP {}/{}. You have {} potion(s).",
            player.hp, player.max_hp, player.potions
        );
        match self.quantity("How many potions to drink? (0 to skip)") {
            Some(0) | None => None,
            Some(n) => Some(UseItemAction::potion(n)),
        }
    }

    fn select_game_action(&mut self, _player: &PlayerState) -> GameControlAction {
        println!();
        println!("  1) Continue");
        println!("  2) Save and continue");
        println!("  3) Save and quit");
        println!("  4) Quit");
        match self.choose("Next?", 4) {
            Some(1) => GameControlAction::Continue,
            Some(2) => GameControlAction::SaveAndContinue,
            Some(3) => GameControlAction::SaveAndQuit,
            _ => GameControlAction::Quit,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let cli = match parse_args(&args) {
        Some(cli) => cli,
        None => {
            print_help();
            return Ok(());
        }
    };

    let config = GameConfig::load_or_default(&cli.config)?;
    let enemies = EnemyCatalog::load(&cli.enemies)
        .with_context(|| format!("loading enemies from {}", cli.enemies.display()))?;
    let weapons = WeaponCatalog::load_or(&cli.weapons, &config);
    info!(
        enemies = enemies.len(),
        weapons = weapons.len(),
        "content loaded"
    );

    let store = open_store(cli.save_dir.as_ref());

    let stdin = io::stdin();
    let mut input = ConsoleInput::new(stdin.lock());
    let name = input
        .prompt(&format!("Enter your name [{}]:", DEFAULT_PLAYER_NAME))
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string());

    let player = match (cli.load, store.as_deref()) {
        (true, Some(store)) => {
            let mut log = MessageLog::new();
            let player = Player::load_or_new(store, &name, DEFAULT_SAVE_SLOT, &config, &mut log)?;
            ConsoleSink.publish(log.messages());
            player
        }
        _ => Player::new(&name, &config)?,
    };

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let events = EventManager::new(config, enemies, weapons);
    let mut ctx = GameFlowContext::new(player, events, input, ConsoleSink, rng);
    if let Some(store) = store {
        ctx = ctx.with_store(store);
    }

    GameStateMachine::new().run(&mut ctx);
    Ok(())
}

fn open_store(save_dir: Option<&PathBuf>) -> Option<Box<dyn SaveStore>> {
    let opened = match save_dir {
        Some(dir) => JsonSaveStore::new(dir),
        None => JsonSaveStore::default_location(),
    };
    match opened {
        Ok(store) => Some(Box::new(store)),
        Err(e) => {
            warn!("Saving disabled: {}", e);
            None
        }
    }
}

/// Returns `None` when help was requested.
fn parse_args(args: &[String]) -> Option<CliArgs> {
    let mut cli = CliArgs {
        config: PathBuf::from(DEFAULT_CONFIG_PATH),
        enemies: PathBuf::from(DEFAULT_ENEMY_SPECS_PATH),
        weapons: PathBuf::from(DEFAULT_WEAPON_SPECS_PATH),
        save_dir: None,
        seed: None,
        load: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                cli.config = PathBuf::from(&args[i + 1]);
                i += 1;
            }
            "--enemies" if i + 1 < args.len() => {
                cli.enemies = PathBuf::from(&args[i + 1]);
                i += 1;
            }
            "--weapons" if i + 1 < args.len() => {
                cli.weapons = PathBuf::from(&args[i + 1]);
                i += 1;
            }
            "--save-dir" if i + 1 < args.len() => {
                cli.save_dir = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
            "--seed" if i + 1 < args.len() => {
                cli.seed = args[i + 1].parse().ok();
                i += 1;
            }
            "--load" => cli.load = true,
            "--help" | "-h" => return None,
            other => warn!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }
    Some(cli)
}

fn print_help() {
    println!("CLI RPG - turn-based console RPG\n");
    println!("Usage: cli-rpg [OPTIONS]\n");
    println!("Options:");
    println!("  --config <PATH>     Game settings (default: {})", DEFAULT_CONFIG_PATH);
    println!("  --enemies <PATH>    Enemy specs (default: {})", DEFAULT_ENEMY_SPECS_PATH);
    println!("  --weapons <PATH>    Weapon specs (default: {})", DEFAULT_WEAPON_SPECS_PATH);
    println!("  --save-dir <PATH>   Save directory (default: platform data dir)");
    println!("  --seed <N>          Seed the random number generator");
    println!("  --load              Resume the auto-saved game for your name");
    println!("  -h, --help          Print this help");
}

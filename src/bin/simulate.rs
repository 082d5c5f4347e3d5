//! Balance simulator CLI.
//!
//! Plays many auto-pilot sessions and prints aggregate results.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                     # 1000 runs, 20 encounters each
//!   cargo run --bin simulate -- -n 100 -e 5      # 100 short runs
//!   cargo run --bin simulate -- --seed 42        # Reproducible run

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use cli_rpg::character::EnemyCatalog;
use cli_rpg::combat::AttackStrategy;
use cli_rpg::core::constants::{
    DEFAULT_CONFIG_PATH, DEFAULT_ENEMY_SPECS_PATH, DEFAULT_WEAPON_SPECS_PATH,
};
use cli_rpg::core::GameConfig;
use cli_rpg::items::WeaponCatalog;
use cli_rpg::simulator::{run_simulation, SimConfig};
use tracing_subscriber::EnvFilter;

struct Paths {
    config: PathBuf,
    enemies: PathBuf,
    weapons: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let (config, paths) = parse_args(&args);

    let game = GameConfig::load_or_default(&paths.config)?;
    let enemies = EnemyCatalog::load(&paths.enemies)
        .with_context(|| format!("loading enemies from {}", paths.enemies.display()))?;
    let weapons = WeaponCatalog::load_or(&paths.weapons, &game);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                CLI RPG BALANCE SIMULATOR                      ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Encounters:     {}", config.encounters_per_run);
    println!("  Strategy:       {}", config.strategy);
    if let Some(weapon) = &config.preferred_weapon {
        println!("  Weapon:         {}", weapon);
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!("  Enemy types:    {}", enemies.len());
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config, &game, &enemies, &weapons)?;

    if config.verbosity >= 1 {
        println!("{}", report.to_text());
    }
    Ok(())
}

fn parse_args(args: &[String]) -> (SimConfig, Paths) {
    let mut config = SimConfig::default();
    let mut paths = Paths {
        config: PathBuf::from(DEFAULT_CONFIG_PATH),
        enemies: PathBuf::from(DEFAULT_ENEMY_SPECS_PATH),
        weapons: PathBuf::from(DEFAULT_WEAPON_SPECS_PATH),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-e" | "--encounters" => {
                if i + 1 < args.len() {
                    config.encounters_per_run = args[i + 1].parse().unwrap_or(20);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--strategy" => {
                if i + 1 < args.len() {
                    config.strategy =
                        AttackStrategy::parse(&args[i + 1]).unwrap_or(AttackStrategy::Melee);
                    i += 1;
                }
            }
            "--weapon" => {
                if i + 1 < args.len() {
                    config.preferred_weapon = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    paths.config = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--enemies" => {
                if i + 1 < args.len() {
                    paths.enemies = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--weapons" => {
                if i + 1 < args.len() {
                    paths.weapons = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--quick" => {
                config = SimConfig::quick(config.seed.unwrap_or(42));
            }
            _ => {}
        }
        i += 1;
    }

    (config, paths)
}

fn print_help() {
    println!("CLI RPG Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>         Number of sessions (default: 1000)");
    println!("    -e, --encounters <N>   Encounters per session (default: 20)");
    println!("    -s, --seed <S>         Random seed for reproducibility");
    println!("    --strategy <NAME>      Default, Melee or Magic (default: Melee)");
    println!("    --weapon <NAME>        Weapon to pick up at the first shop");
    println!("    --config <PATH>        Game settings (default: {})", DEFAULT_CONFIG_PATH);
    println!("    --enemies <PATH>       Enemy specs (default: {})", DEFAULT_ENEMY_SPECS_PATH);
    println!("    --weapons <PATH>       Weapon specs (default: {})", DEFAULT_WEAPON_SPECS_PATH);
    println!("    --quick                50 short seeded runs");
    println!("    -v, --verbose          Print every run");
    println!("    -q, --quiet            Skip the report");
    println!("    -h, --help             Show this help");
}

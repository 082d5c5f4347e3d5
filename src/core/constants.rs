// Attack strategy damage rolls, half-open [min, max)
pub const DEFAULT_ATTACK_MIN: u32 = 8;
pub const DEFAULT_ATTACK_MAX: u32 = 10;
pub const MELEE_ATTACK_MIN: u32 = 10;
pub const MELEE_ATTACK_MAX: u32 = 16;
pub const MAGIC_ATTACK_MIN: u32 = 0;
pub const MAGIC_ATTACK_MAX: u32 = 25;

// Battle
pub const MAX_BATTLE_TURNS: u32 = 1_000;

// Items
pub const POTION_ITEM_NAME: &str = "Potion";
pub const UNARMED_WEAPON_NAME: &str = "Default";

// Save system
pub const DEFAULT_SAVE_SLOT: &str = "auto_save";
pub const SAVE_FILE_EXTENSION: &str = "json";
pub const MAX_PLAYER_NAME_LEN: usize = 16;

// Content file locations (relative to the working directory)
pub const DEFAULT_CONFIG_PATH: &str = "data/game-config.toml";
pub const DEFAULT_ENEMY_SPECS_PATH: &str = "data/enemy-specs.ron";
pub const DEFAULT_WEAPON_SPECS_PATH: &str = "data/weapon-specs.ron";
pub const DEFAULT_PLAYER_NAME: &str = "Hero";

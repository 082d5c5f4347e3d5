//! Enemies and the enemy catalog.

use std::collections::BTreeMap;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::character::{Combatant, EnemyRewards, HealthManager};
use crate::combat::{AttackReport, AttackStrategy, CombatManager};
use crate::core::config::EnemyConfig;
use crate::error::{CatalogError, GameError};
use crate::input::EnemyState;
use crate::items::WeaponStats;
use crate::messages::MessageLog;
use crate::utils::spec_loader;

/// Template for one kind of enemy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpec {
    pub name: String,
    pub hp: u32,
    pub ap: u32,
    pub dp: u32,
    pub attack_strategy: String,
    pub experience: u32,
}

/// Lists every rule an enemy spec breaks. Negative numbers cannot reach this
/// point: they fail to parse into `u32`.
pub fn validate_enemy_spec(_key: &str, spec: &EnemySpec) -> Vec<String> {
    let mut violations = Vec::new();

    if spec.name.trim().is_empty() {
        violations.push("Name is required".to_string());
    }
    if spec.hp == 0 {
        violations.push("HP must be positive (got 0)".to_string());
    }
    if spec.attack_strategy.trim().is_empty() {
        violations.push("AttackStrategy is required".to_string());
    } else if AttackStrategy::parse(&spec.attack_strategy).is_none() {
        violations.push(format!(
            "Unknown AttackStrategy '{}'. Valid values: {}",
            spec.attack_strategy,
            AttackStrategy::names().join(", ")
        ));
    }

    violations
}

/// A live enemy. Created per battle and dropped when the battle ends.
#[derive(Debug, Clone)]
pub struct Enemy {
    name: String,
    base_ap: u32,
    health: HealthManager,
    unarmed: WeaponStats,
    combat: CombatManager,
    yield_experience: u32,
    yield_gold: u32,
}

impl Enemy {
    /// Builds an enemy from a validated spec. Gold is
    /// `experience / multiplier + random[min, max)`.
    pub fn from_spec(spec: &EnemySpec, rewards: &EnemyConfig, rng: &mut impl Rng) -> Self {
        let unarmed = WeaponStats::unarmed();
        let strategy = AttackStrategy::parse(&spec.attack_strategy).unwrap_or_default();

        let base_gold = spec
            .experience
            .checked_div(rewards.gold_base_multiplier)
            .unwrap_or(0);
        let bonus = if rewards.gold_random_max > rewards.gold_random_min {
            rng.gen_range(rewards.gold_random_min..rewards.gold_random_max)
        } else {
            rewards.gold_random_min
        };

        Self {
            name: spec.name.clone(),
            base_ap: spec.ap,
            health: HealthManager::new(spec.hp, spec.dp, &unarmed),
            unarmed,
            combat: CombatManager::new(strategy),
            yield_experience: spec.experience,
            yield_gold: base_gold.saturating_add(bonus),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hp(&self) -> u32 {
        self.health.current_hp()
    }

    pub fn max_hp(&self) -> u32 {
        self.health.max_hp(&self.unarmed)
    }

    pub fn ap(&self) -> u32 {
        self.base_ap
    }

    pub fn dp(&self) -> u32 {
        self.health.total_dp(&self.unarmed)
    }

    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    pub fn yield_experience(&self) -> u32 {
        self.yield_experience
    }

    pub fn yield_gold(&self) -> u32 {
        self.yield_gold
    }

    pub fn attack_strategy(&self) -> AttackStrategy {
        self.combat.strategy()
    }

    pub fn rewards(&self) -> EnemyRewards {
        EnemyRewards {
            enemy_name: self.name.clone(),
            gold: self.yield_gold,
            experience: self.yield_experience,
        }
    }

    pub fn attack(
        &self,
        target: Combatant<'_>,
        rng: &mut impl Rng,
        log: &mut MessageLog,
    ) -> AttackReport {
        self.combat.execute_attack(self.base_ap, target, rng, log)
    }

    pub fn take_damage(&mut self, raw: u32, log: &mut MessageLog) -> u32 {
        let actual = self.health.take_damage(raw, &self.unarmed);
        log.combat(format!(
            "{} takes {} damage! Remaining HP: {}",
            self.name,
            actual,
            self.hp()
        ));
        actual
    }

    pub fn heal(&mut self, amount: u32) -> Result<u32, GameError> {
        self.health.heal(amount, &self.unarmed)
    }

    pub fn change_attack_strategy(&mut self, name: &str) {
        self.combat.change_attack_strategy(name);
    }

    pub fn snapshot(&self) -> EnemyState {
        EnemyState {
            name: self.name.clone(),
            hp: self.hp(),
            max_hp: self.max_hp(),
            is_alive: self.is_alive(),
            attack_strategy: self.attack_strategy().name().to_string(),
        }
    }
}

/// Validated enemy templates keyed by id, in key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemyCatalog {
    specs: BTreeMap<String, EnemySpec>,
}

impl EnemyCatalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let specs = spec_loader::load_specs(path, "enemy", validate_enemy_spec)?;
        info!("Loaded {} enemy specs from {}", specs.len(), path.display());
        Ok(Self { specs })
    }

    pub fn from_specs(specs: BTreeMap<String, EnemySpec>) -> Result<Self, CatalogError> {
        let specs = spec_loader::validate_specs("enemy", specs, validate_enemy_spec)?;
        Ok(Self { specs })
    }

    pub fn keys(&self) -> Vec<&str> {
        self.specs.keys().map(String::as_str).collect()
    }

    pub fn spec(&self, key: &str) -> Option<&EnemySpec> {
        self.specs.get(key)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn create(
        &self,
        key: &str,
        rewards: &EnemyConfig,
        rng: &mut impl Rng,
    ) -> Result<Enemy, CatalogError> {
        let spec = self.specs.get(key).ok_or_else(|| CatalogError::UnknownKey {
            label: "enemy",
            key: key.to_string(),
            available: self.specs.keys().cloned().collect(),
        })?;
        Ok(Enemy::from_spec(spec, rewards, rng))
    }

    pub fn create_random(
        &self,
        rewards: &EnemyConfig,
        rng: &mut impl Rng,
    ) -> Result<Enemy, CatalogError> {
        if self.specs.is_empty() {
            return Err(CatalogError::NoEntries { label: "enemy" });
        }
        let index = rng.gen_range(0..self.specs.len());
        let spec = self
            .specs
            .values()
            .nth(index)
            .ok_or(CatalogError::NoEntries { label: "enemy" })?;
        Ok(Enemy::from_spec(spec, rewards, rng))
    }
}

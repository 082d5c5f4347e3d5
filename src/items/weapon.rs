//! Weapons: the immutable stat block a character has equipped, the
//! equipment-provider capability, and the weapon catalog used by the shop.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::config::GameConfig;
use crate::core::constants::UNARMED_WEAPON_NAME;
use crate::error::CatalogError;
use crate::utils::spec_loader;

/// Stat contribution of one piece of equipment. Fields are fixed at
/// construction; swapping gear means replacing the whole value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponStats {
    name: String,
    hp: u32,
    ap: u32,
    dp: u32,
}

impl WeaponStats {
    pub fn new(name: impl Into<String>, hp: u32, ap: u32, dp: u32) -> Self {
        Self {
            name: name.into(),
            hp,
            ap,
            dp,
        }
    }

    /// The "nothing equipped" sentinel.
    pub fn unarmed() -> Self {
        Self::new(UNARMED_WEAPON_NAME, 0, 0, 0)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn ap(&self) -> u32 {
        self.ap
    }

    pub fn dp(&self) -> u32 {
        self.dp
    }

    pub fn is_unarmed(&self) -> bool {
        self.name == UNARMED_WEAPON_NAME && self.hp == 0 && self.ap == 0 && self.dp == 0
    }
}

impl Default for WeaponStats {
    fn default() -> Self {
        Self::unarmed()
    }
}

/// Anything that can report the weapon currently contributing stats.
pub trait EquipmentProvider {
    fn weapon(&self) -> &WeaponStats;
}

impl EquipmentProvider for WeaponStats {
    fn weapon(&self) -> &WeaponStats {
        self
    }
}

/// Returned by every equipment swap. The owning aggregate passes it to
/// `HealthManager::on_equipment_changed` before doing anything else.
#[must_use = "current HP must be clipped after an equipment change"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquipmentChanged;

/// Catalog entry: the weapon's stats, keyed by its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub hp: u32,
    pub ap: u32,
    pub dp: u32,
}

fn validate_weapon_spec(key: &str, _spec: &WeaponSpec) -> Vec<String> {
    let mut violations = Vec::new();
    if key.trim().is_empty() {
        violations.push("Weapon name is required".to_string());
    }
    violations
}

/// Weapons the shop can hand out, ordered by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponCatalog {
    specs: BTreeMap<String, WeaponSpec>,
}

impl WeaponCatalog {
    pub fn from_specs(specs: BTreeMap<String, WeaponSpec>) -> Self {
        Self { specs }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::from_specs(config.weapons.clone())
    }

    /// Loads weapon specs from a RON file. Any failure falls back to the
    /// weapon table in the game settings.
    pub fn load_or(path: &Path, config: &GameConfig) -> Self {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("{}; using weapons from game configuration", e);
                Self::from_config(config)
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let specs = spec_loader::load_specs(path, "weapon", validate_weapon_spec)?;
        info!("Loaded {} weapon specs from {}", specs.len(), path.display());
        Ok(Self::from_specs(specs))
    }

    /// Looks a weapon up by name, ignoring case.
    pub fn create(&self, name: &str) -> Option<WeaponStats> {
        let wanted = name.trim();
        self.specs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(wanted))
            .map(|(key, spec)| WeaponStats::new(key.clone(), spec.hp, spec.ap, spec.dp))
    }

    pub fn names(&self) -> Vec<&str> {
        self.specs.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = WeaponStats> + '_ {
        self.specs
            .iter()
            .map(|(key, spec)| WeaponStats::new(key.clone(), spec.hp, spec.ap, spec.dp))
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

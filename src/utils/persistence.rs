//! Save stores for player snapshots.
//!
//! The game only talks to the [`SaveStore`] trait. [`JsonSaveStore`] keeps one
//! pretty-printed JSON file per (player, slot) pair; [`MemorySaveStore`] keeps
//! everything in a map.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{info, warn};

use crate::character::PlayerSaveData;
use crate::core::constants::SAVE_FILE_EXTENSION;
use crate::error::PersistenceError;

pub trait SaveStore {
    /// Writes a snapshot, replacing any existing save in the same slot.
    fn save(&mut self, data: &PlayerSaveData) -> Result<(), PersistenceError>;

    /// `None` unless a save exists for exactly this player name and slot.
    fn load(&self, player_name: &str, slot: &str) -> Result<Option<PlayerSaveData>, PersistenceError>;

    /// All saves for a player, most recent first.
    fn list_saves(&self, player_name: &str) -> Result<Vec<PlayerSaveData>, PersistenceError>;

    /// Returns whether a save was removed.
    fn delete(&mut self, player_name: &str, slot: &str) -> Result<bool, PersistenceError>;
}

/// Encodes a player or slot name as a file name component.
///
/// Lowercase ASCII letters, digits, `-` and `_` are kept. An uppercase letter
/// becomes `~` plus its lowercase form, a space becomes `+`, and every other
/// UTF-8 byte becomes `%XX`. Distinct names always give distinct outputs, the
/// output never contains `.`, and it stays unique on case-insensitive
/// filesystems.
pub fn encode_file_component(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            'a'..='z' | '0'..='9' | '-' | '_' => encoded.push(c),
            'A'..='Z' => {
                encoded.push('~');
                encoded.push(c.to_ascii_lowercase());
            }
            ' ' => encoded.push('+'),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    encoded.push_str(&format!("%{:02x}", byte));
                }
            }
        }
    }
    encoded
}

pub struct JsonSaveStore {
    save_dir: PathBuf,
}

impl JsonSaveStore {
    /// Opens (creating if needed) a save directory.
    pub fn new(save_dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let save_dir = save_dir.into();
        fs::create_dir_all(&save_dir)?;
        Ok(Self { save_dir })
    }

    /// Uses the platform data directory, e.g. `~/.local/share/cli-rpg/saves`.
    pub fn default_location() -> Result<Self, PersistenceError> {
        let project_dirs = ProjectDirs::from("", "", "cli-rpg").ok_or_else(|| {
            PersistenceError::Unavailable("could not determine data directory".to_string())
        })?;
        Self::new(project_dirs.data_dir().join("saves"))
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// `<player>.` where `.` never appears inside an encoded name.
    fn file_prefix(player_name: &str) -> String {
        format!("{}.", encode_file_component(player_name))
    }

    fn path_for(&self, player_name: &str, slot: &str) -> PathBuf {
        self.save_dir.join(format!(
            "{}{}.{}",
            Self::file_prefix(player_name),
            encode_file_component(slot),
            SAVE_FILE_EXTENSION
        ))
    }

    fn read_file(path: &Path) -> Result<PlayerSaveData, PersistenceError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl SaveStore for JsonSaveStore {
    fn save(&mut self, data: &PlayerSaveData) -> Result<(), PersistenceError> {
        let path = self.path_for(&data.player_name, &data.slot_name);
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&path, json)?;
        info!("Saved {} to {}", data.player_name, path.display());
        Ok(())
    }

    fn load(&self, player_name: &str, slot: &str) -> Result<Option<PlayerSaveData>, PersistenceError> {
        let path = self.path_for(player_name, slot);
        match Self::read_file(&path) {
            Ok(data) if data.player_name == player_name => Ok(Some(data)),
            Ok(data) => {
                warn!(
                    "{} belongs to {}, not {}",
                    path.display(),
                    data.player_name,
                    player_name
                );
                Ok(None)
            }
            Err(PersistenceError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn list_saves(&self, player_name: &str) -> Result<Vec<PlayerSaveData>, PersistenceError> {
        let prefix = Self::file_prefix(player_name);
        let mut saves = Vec::new();

        for entry in fs::read_dir(&self.save_dir)? {
            let path = entry?.path();
            let matches = path.extension().and_then(|e| e.to_str()) == Some(SAVE_FILE_EXTENSION)
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix));
            if !matches {
                continue;
            }
            match Self::read_file(&path) {
                Ok(data) if data.player_name == player_name => saves.push(data),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable save {}: {}", path.display(), e),
            }
        }

        saves.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(saves)
    }

    fn delete(&mut self, player_name: &str, slot: &str) -> Result<bool, PersistenceError> {
        match fs::remove_file(self.path_for(player_name, slot)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store keyed by (player, slot).
#[derive(Debug, Default)]
pub struct MemorySaveStore {
    saves: BTreeMap<(String, String), PlayerSaveData>,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.saves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saves.is_empty()
    }
}

impl SaveStore for MemorySaveStore {
    fn save(&mut self, data: &PlayerSaveData) -> Result<(), PersistenceError> {
        self.saves.insert(
            (data.player_name.clone(), data.slot_name.clone()),
            data.clone(),
        );
        Ok(())
    }

    fn load(&self, player_name: &str, slot: &str) -> Result<Option<PlayerSaveData>, PersistenceError> {
        Ok(self
            .saves
            .get(&(player_name.to_string(), slot.to_string()))
            .cloned())
    }

    fn list_saves(&self, player_name: &str) -> Result<Vec<PlayerSaveData>, PersistenceError> {
        let mut saves: Vec<_> = self
            .saves
            .values()
            .filter(|s| s.player_name == player_name)
            .cloned()
            .collect();
        saves.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(saves)
    }

    fn delete(&mut self, player_name: &str, slot: &str) -> Result<bool, PersistenceError> {
        Ok(self
            .saves
            .remove(&(player_name.to_string(), slot.to_string()))
            .is_some())
    }
}

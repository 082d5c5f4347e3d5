//! Generic loader for keyed content specs stored as a RON map:
//!
//! ```ron
//! {
//!     "goblin": (name: "Goblin", hp: 30, ap: 5, dp: 0, attack_strategy: "Melee", experience: 20),
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::CatalogError;

/// Reads and validates a spec file. Every entry is checked by `validate`,
/// which returns the list of rule violations for one `(key, spec)` pair.
pub fn load_specs<T, F>(
    path: &Path,
    label: &'static str,
    validate: F,
) -> Result<BTreeMap<String, T>, CatalogError>
where
    T: DeserializeOwned,
    F: Fn(&str, &T) -> Vec<String>,
{
    let text = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            CatalogError::NotFound {
                label,
                path: path.to_path_buf(),
            }
        } else {
            CatalogError::Io {
                label,
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    if text.trim().is_empty() {
        return Err(CatalogError::Empty {
            label,
            path: path.to_path_buf(),
        });
    }

    let specs: BTreeMap<String, T> =
        ron::from_str(&text).map_err(|e| CatalogError::Parse {
            label,
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    validate_specs(label, specs, validate)
}

/// Runs per-entry validation over an already-parsed map. The first key with
/// violations is reported with all of its problems.
pub fn validate_specs<T, F>(
    label: &'static str,
    specs: BTreeMap<String, T>,
    validate: F,
) -> Result<BTreeMap<String, T>, CatalogError>
where
    F: Fn(&str, &T) -> Vec<String>,
{
    if specs.is_empty() {
        return Err(CatalogError::NoEntries { label });
    }

    for (key, spec) in &specs {
        let violations = validate(key, spec);
        if !violations.is_empty() {
            return Err(CatalogError::InvalidSpec {
                label,
                key: key.clone(),
                violations,
            });
        }
    }

    Ok(specs)
}

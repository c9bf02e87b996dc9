//! Normalized surface form to canonical value mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::EntityValue;

/// Synonym table keyed by normalized surface form.
///
/// Keys and values are stored already normalized: text lowercased,
/// non-textual values in their JSON form. A key never maps to itself.
/// Serializes as a flat JSON object, e.g. `{"nyc": "new york"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct SynonymTable {
    entries: BTreeMap<String, String>,
}

impl SynonymTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `surface` as a synonym of `canonical` after normalizing both.
    ///
    /// Does nothing when `canonical` is absent or both sides normalize to
    /// the same string. An existing entry for the key is overwritten.
    /// Returns `true` when the table was written.
    pub fn add_if_synonyms(
        &mut self,
        surface: &EntityValue,
        canonical: Option<&EntityValue>,
    ) -> bool {
        let Some(canonical) = canonical else {
            return false;
        };

        let original = surface.normalized();
        let replacement = canonical.normalized();
        if original == replacement {
            return false;
        }

        if let Some(previous) = self.entries.get(&original) {
            if *previous != replacement {
                log::debug!(
                    "Synonym '{}' remapped from '{}' to '{}'",
                    original,
                    previous,
                    replacement
                );
            }
        }
        self.entries.insert(original, replacement);
        true
    }

    /// Canonical value for a textual surface form, matched case-insensitively.
    pub fn get(&self, surface: &str) -> Option<&str> {
        self.get_normalized(&surface.to_lowercase())
    }

    /// Canonical value for an already normalized key.
    pub fn get_normalized(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Canonical value for an entity value, normalized the same way as keys.
    pub fn lookup(&self, value: &EntityValue) -> Option<&str> {
        self.get_normalized(&value.normalized())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl From<BTreeMap<String, String>> for SynonymTable {
    fn from(mut entries: BTreeMap<String, String>) -> Self {
        entries.retain(|key, value| key != value);
        Self { entries }
    }
}

impl From<SynonymTable> for BTreeMap<String, String> {
    fn from(table: SynonymTable) -> Self {
        table.entries
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SynonymTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries: BTreeMap<String, String> = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::from(entries)
    }
}

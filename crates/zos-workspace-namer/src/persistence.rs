//! Positional name snapshot
//!
//! The durable form of workspace names: one string per slot, empty where a
//! workspace has no name. This is what the settings store holds and what
//! configuration UIs read. It is a cache over the fingerprint registry, never
//! the source of truth once a fingerprint-keyed name exists.

use serde::{Deserialize, Serialize};

use crate::error::NamerResult;
use crate::host::SettingsStore;
use crate::types::Slot;

/// Names indexed by slot
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionalSnapshot {
    names: Vec<String>,
}

impl PositionalSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Load the snapshot stored under `key`.
    pub fn load<S>(store: &S, key: &str) -> NamerResult<Self>
    where
        S: SettingsStore + ?Sized,
    {
        store.read_string_array(key).map(Self::from_names)
    }

    /// Write the snapshot under `key`.
    pub fn store<S>(&self, store: &S, key: &str) -> NamerResult<()>
    where
        S: SettingsStore + ?Sized,
    {
        store.write_string_array(key, &self.names)
    }

    /// Trimmed name at `slot`, or `None` when missing or blank.
    ///
    /// Short snapshots are treated as having empty trailing entries.
    pub fn name_at(&self, slot: Slot) -> Option<&str> {
        self.names
            .get(slot)
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
    }

    /// Set the entry at `slot`, padding with empty strings as needed.
    pub fn set(&mut self, slot: Slot, name: &str) {
        if self.names.len() <= slot {
            self.names.resize(slot + 1, String::new());
        }
        self.names[slot] = name.to_string();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// `(slot, trimmed name)` for every non-blank entry
    pub fn named_slots(&self) -> impl Iterator<Item = (Slot, &str)> + '_ {
        (0..self.names.len()).filter_map(move |slot| self.name_at(slot).map(|name| (slot, name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemorySettings;

    #[test]
    fn test_set_pads_short_snapshot() {
        let mut snapshot = PositionalSnapshot::from_names(vec!["A".to_string()]);
        snapshot.set(3, "D");

        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot.names(), &["A", "", "", "D"]);
    }

    #[test]
    fn test_name_at_treats_missing_and_blank_alike() {
        let snapshot =
            PositionalSnapshot::from_names(vec!["  Mail ".to_string(), "   ".to_string()]);

        assert_eq!(snapshot.name_at(0), Some("Mail"));
        assert_eq!(snapshot.name_at(1), None);
        assert_eq!(snapshot.name_at(9), None);
    }

    #[test]
    fn test_named_slots() {
        let snapshot = PositionalSnapshot::from_names(vec![
            "Alpha".to_string(),
            String::new(),
            "Gamma".to_string(),
        ]);
        let named: Vec<_> = snapshot.named_slots().collect();
        assert_eq!(named, vec![(0, "Alpha"), (2, "Gamma")]);
    }

    #[test]
    fn test_load_and_store() {
        let settings = MemorySettings::new();
        settings.set("workspace-names", &["Web", "", "Chat"]);

        let mut snapshot = PositionalSnapshot::load(&settings, "workspace-names").unwrap();
        assert_eq!(snapshot.name_at(2), Some("Chat"));

        snapshot.set(1, "Code");
        snapshot.store(&settings, "workspace-names").unwrap();
        assert_eq!(settings.get("workspace-names"), vec!["Web", "Code", "Chat"]);
    }

    #[test]
    fn test_json_form_is_plain_array() {
        let snapshot = PositionalSnapshot::from_names(vec!["A".to_string(), String::new()]);
        assert_eq!(serde_json::to_string(&snapshot).unwrap(), r#"["A",""]"#);
    }
}

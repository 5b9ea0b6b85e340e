use std::collections::BTreeMap;

use tracing::debug;

use crate::fingerprint::Fingerprint;

/// Fingerprint -> user-assigned name
///
/// Names are stored trimmed and are never empty. Entries never expire; they
/// only move when a tracked workspace's window set changes.
#[derive(Clone, Debug, Default)]
pub struct NameRegistry {
    names: BTreeMap<Fingerprint, String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `name` under `fingerprint`.
    ///
    /// Returns false (and stores nothing) if `name` is blank.
    pub fn insert(&mut self, fingerprint: Fingerprint, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.names.insert(fingerprint, name.to_string());
        true
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&str> {
        self.names.get(fingerprint).map(String::as_str)
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.names.contains_key(fingerprint)
    }

    pub fn remove(&mut self, fingerprint: &Fingerprint) -> Option<String> {
        self.names.remove(fingerprint)
    }

    /// Re-key `name` from `from` to `to`.
    pub fn migrate(&mut self, from: &Fingerprint, to: Fingerprint, name: &str) {
        debug!(%from, %to, name, "migrating workspace name to new fingerprint");
        self.names.remove(from);
        self.insert(to, name);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Fingerprint, &str)> {
        self.names.iter().map(|(fp, name)| (fp, name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_trims_and_rejects_blank() {
        let mut registry = NameRegistry::new();
        let fp = Fingerprint::from_windows(0, &[1]);

        assert!(!registry.insert(fp.clone(), "   "));
        assert!(registry.is_empty());

        assert!(registry.insert(fp.clone(), "  Mail  "));
        assert_eq!(registry.get(&fp), Some("Mail"));
    }

    #[test]
    fn test_migrate_moves_entry() {
        let mut registry = NameRegistry::new();
        let old = Fingerprint::from_windows(0, &[5, 7]);
        let new = Fingerprint::from_windows(0, &[5, 7, 9]);
        registry.insert(old.clone(), "Foo");

        registry.migrate(&old, new.clone(), "Foo");

        assert!(!registry.contains(&old));
        assert_eq!(registry.get(&new), Some("Foo"));
        assert_eq!(registry.len(), 1);
    }
}

use std::collections::BTreeMap;

use crate::fingerprint::Fingerprint;
use crate::types::Slot;

/// What a slot currently resolves to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    /// Fingerprint of the workspace when it was last tracked
    pub fingerprint: Fingerprint,
    /// Registered name, `None` for unnamed workspaces
    pub name: Option<String>,
}

impl Instance {
    pub fn named(fingerprint: Fingerprint, name: &str) -> Self {
        Self {
            fingerprint,
            name: Some(name.to_string()),
        }
    }

    pub fn unnamed(fingerprint: Fingerprint) -> Self {
        Self {
            fingerprint,
            name: None,
        }
    }

    /// Name, if present and non-blank
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.trim().is_empty())
    }
}

/// Slot -> instance index over the name registry
///
/// Fully derived: safe to discard and rebuild at any time.
#[derive(Clone, Debug, Default)]
pub struct InstanceMap {
    instances: BTreeMap<Slot, Instance>,
}

impl InstanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<&Instance> {
        self.instances.get(&slot)
    }

    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut Instance> {
        self.instances.get_mut(&slot)
    }

    pub fn insert(&mut self, slot: Slot, instance: Instance) {
        self.instances.insert(slot, instance);
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Slots in ascending order
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.instances.keys().copied()
    }
}

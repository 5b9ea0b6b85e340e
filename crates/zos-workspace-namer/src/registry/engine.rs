//! Resolve, assign, reconcile and bootstrap
//!
//! ## Resolution order
//!
//! 1. Instance tracked at the slot (migrating its fingerprint if the window
//!    set changed since)
//! 2. Registry entry for the workspace's current fingerprint
//! 3. Positional snapshot entry
//! 4. Generated default (`"Workspace N"`)
//!
//! ## Reorders
//!
//! Reconciliation matches by exact fingerprint only. A workspace whose entire
//! window set changed in the same event as a reorder loses its name; there is
//! no partial-overlap matching.

use tracing::{debug, info, warn};

use super::instances::{Instance, InstanceMap};
use super::names::NameRegistry;
use crate::config::NamerConfig;
use crate::error::NamerResult;
use crate::fingerprint::{derive_fingerprint, Fingerprint};
use crate::host::{SettingsStore, Workspace, WorkspaceSource};
use crate::persistence::PositionalSnapshot;
use crate::types::Slot;

/// Where a resolved name came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameSource {
    Instance,
    Registry,
    Snapshot,
    Default,
}

/// A name plus its provenance
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedName {
    pub name: String,
    pub source: NameSource,
}

impl ResolvedName {
    fn new(name: &str, source: NameSource) -> Self {
        Self {
            name: name.to_string(),
            source,
        }
    }

    /// The generated default for `slot`
    pub fn default_for(config: &NamerConfig, slot: Slot) -> Self {
        Self {
            name: config.default_name(slot),
            source: NameSource::Default,
        }
    }

    pub fn is_default(&self) -> bool {
        self.source == NameSource::Default
    }
}

/// Result of [`NameEngine::assign_name`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssignOutcome {
    /// Name stored under this fingerprint and persisted
    Saved { fingerprint: Fingerprint },
    /// Blank submission, nothing changed
    Ignored,
}

/// Fingerprint-keyed workspace naming
#[derive(Debug, Default)]
pub struct NameEngine {
    config: NamerConfig,
    registry: NameRegistry,
    instances: InstanceMap,
}

impl NameEngine {
    pub fn new(config: NamerConfig) -> Self {
        Self {
            config,
            registry: NameRegistry::new(),
            instances: InstanceMap::new(),
        }
    }

    pub fn config(&self) -> &NamerConfig {
        &self.config
    }

    pub fn registry(&self) -> &NameRegistry {
        &self.registry
    }

    pub fn instances(&self) -> &InstanceMap {
        &self.instances
    }

    /// Registered name for a fingerprint
    pub fn name_for(&self, fingerprint: &Fingerprint) -> Option<&str> {
        self.registry.get(fingerprint)
    }

    pub fn instance(&self, slot: Slot) -> Option<&Instance> {
        self.instances.get(slot)
    }

    /// Drop all in-memory state.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.instances.clear();
    }

    /// Resolve the display name for a live workspace.
    ///
    /// If the instance tracked at this slot has a name but its window set
    /// changed, the registry entry follows it to the new fingerprint.
    pub fn resolve_name<W, S>(
        &mut self,
        workspaces: &W,
        settings: &S,
        workspace: &Workspace,
    ) -> ResolvedName
    where
        W: WorkspaceSource + ?Sized,
        S: SettingsStore + ?Sized,
    {
        let slot = workspace.slot;
        let fingerprint = derive_fingerprint(workspaces, workspace);

        if let Some(instance) = self.instances.get_mut(slot) {
            if let Some(name) = instance.name().map(str::to_string) {
                // A fallback fingerprint means the host hiccuped, not that
                // the windows changed.
                if instance.fingerprint != fingerprint && !fingerprint.is_fallback() {
                    self.registry
                        .migrate(&instance.fingerprint, fingerprint.clone(), &name);
                    instance.fingerprint = fingerprint;
                }
                return ResolvedName::new(&name, NameSource::Instance);
            }
        }

        self.lookup_untracked(settings, slot, &fingerprint)
    }

    /// Name to pre-fill the rename prompt with. Same order as
    /// [`resolve_name`](Self::resolve_name) but never migrates.
    pub fn current_name<W, S>(&self, workspaces: &W, settings: &S, workspace: &Workspace) -> ResolvedName
    where
        W: WorkspaceSource + ?Sized,
        S: SettingsStore + ?Sized,
    {
        let slot = workspace.slot;
        if let Some(name) = self.instances.get(slot).and_then(Instance::name) {
            return ResolvedName::new(name, NameSource::Instance);
        }

        let fingerprint = derive_fingerprint(workspaces, workspace);
        self.lookup_untracked(settings, slot, &fingerprint)
    }

    fn lookup_untracked<S>(&self, settings: &S, slot: Slot, fingerprint: &Fingerprint) -> ResolvedName
    where
        S: SettingsStore + ?Sized,
    {
        if let Some(name) = self.registry.get(fingerprint) {
            return ResolvedName::new(name, NameSource::Registry);
        }

        let snapshot = self.load_snapshot(settings);
        if let Some(name) = snapshot.name_at(slot) {
            return ResolvedName::new(name, NameSource::Snapshot);
        }

        debug!(slot, "no stored name, using default");
        ResolvedName::default_for(&self.config, slot)
    }

    /// Assign a user-entered name to a live workspace and persist it.
    ///
    /// Blank input is ignored without touching any state. The in-memory maps
    /// are updated before the snapshot write, so a failed write still leaves
    /// the name visible for this session.
    pub fn assign_name<W, S>(
        &mut self,
        workspaces: &W,
        settings: &S,
        workspace: &Workspace,
        name: &str,
    ) -> NamerResult<AssignOutcome>
    where
        W: WorkspaceSource + ?Sized,
        S: SettingsStore + ?Sized,
    {
        let name = name.trim();
        if name.is_empty() {
            debug!(slot = workspace.slot, "ignoring blank workspace name");
            return Ok(AssignOutcome::Ignored);
        }

        let slot = workspace.slot;
        let fingerprint = derive_fingerprint(workspaces, workspace);

        self.registry.insert(fingerprint.clone(), name);
        self.instances
            .insert(slot, Instance::named(fingerprint.clone(), name));

        let mut snapshot = self.load_snapshot(settings);
        snapshot.set(slot, name);
        snapshot.store(settings, &self.config.names_key)?;

        info!(slot, %fingerprint, name, "workspace renamed");
        Ok(AssignOutcome::Saved { fingerprint })
    }

    /// Rebuild the slot index after workspaces were added or removed.
    ///
    /// Every live slot gets exactly one instance; only exact fingerprint
    /// matches keep their names. The rebuilt snapshot is persisted unless it
    /// equals what the store already holds.
    pub fn reconcile<W, S>(&mut self, workspaces: &W, settings: &S) -> NamerResult<PositionalSnapshot>
    where
        W: WorkspaceSource + ?Sized,
        S: SettingsStore + ?Sized,
    {
        let count = workspaces.workspace_count();
        let mut instances = InstanceMap::new();
        let mut snapshot = PositionalSnapshot::new();

        for slot in 0..count {
            let fingerprint = match workspaces.workspace_at(slot) {
                Some(workspace) => derive_fingerprint(workspaces, &workspace),
                None => {
                    warn!(slot, count, "host reported fewer workspaces than its count");
                    Fingerprint::fallback(slot)
                }
            };

            match self.registry.get(&fingerprint) {
                Some(name) => {
                    snapshot.set(slot, name);
                    instances.insert(slot, Instance::named(fingerprint, name));
                }
                None => {
                    snapshot.set(slot, "");
                    instances.insert(slot, Instance::unnamed(fingerprint));
                }
            }
        }

        self.instances = instances;
        debug!(count, named = snapshot.named_slots().count(), "reconciled workspace names");

        let key = &self.config.names_key;
        let unchanged = PositionalSnapshot::load(settings, key)
            .map(|stored| stored == snapshot)
            .unwrap_or(false);
        if !unchanged {
            snapshot.store(settings, key)?;
        }

        Ok(snapshot)
    }

    /// Seed both maps from a persisted positional snapshot.
    ///
    /// Each named slot with a live workspace is keyed under that workspace's
    /// current fingerprint. Returns how many names were seeded.
    pub fn initialize_from_snapshot<W>(&mut self, workspaces: &W, snapshot: &PositionalSnapshot) -> usize
    where
        W: WorkspaceSource + ?Sized,
    {
        let count = workspaces.workspace_count();
        let mut seeded = 0;

        for (slot, name) in snapshot.named_slots() {
            if slot >= count {
                break;
            }
            let Some(workspace) = workspaces.workspace_at(slot) else {
                continue;
            };

            let fingerprint = derive_fingerprint(workspaces, &workspace);
            self.registry.insert(fingerprint.clone(), name);
            self.instances.insert(slot, Instance::named(fingerprint, name));
            seeded += 1;
        }

        info!(seeded, stored = snapshot.len(), "seeded workspace names from snapshot");
        seeded
    }

    /// Stored snapshot, or one rebuilt from tracked instances if the store
    /// can't be read.
    fn load_snapshot<S>(&self, settings: &S) -> PositionalSnapshot
    where
        S: SettingsStore + ?Sized,
    {
        match PositionalSnapshot::load(settings, &self.config.names_key) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "cannot read name snapshot, rebuilding from tracked instances");
                let mut snapshot = PositionalSnapshot::new();
                for slot in self.instances.slots() {
                    let name = self
                        .instances
                        .get(slot)
                        .and_then(Instance::name)
                        .unwrap_or("");
                    snapshot.set(slot, name);
                }
                snapshot
            }
        }
    }
}

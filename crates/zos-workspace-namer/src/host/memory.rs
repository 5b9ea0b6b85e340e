//! In-memory collaborators for testing.
//!
//! RefCell-backed hosts that keep everything in process. They never dispatch
//! events themselves: the test (or embedding loop) calls
//! [`WorkspaceNamer::handle`](crate::WorkspaceNamer::handle) after mutating
//! them, the same way a real shell forwards its signals.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::{
    DisplaySurface, PromptOutcome, RenamePrompt, SettingsStore, SignalHandle, Workspace,
    WorkspaceSignal, WorkspaceSource,
};
use crate::error::{NamerError, NamerResult};
use crate::types::{Slot, WindowId};

/// Connection bookkeeping shared by the memory hosts
#[derive(Default)]
struct SignalTable {
    next: Cell<u64>,
    /// Live connections: handle -> signal name
    connected: RefCell<BTreeMap<SignalHandle, String>>,
    /// Signal names whose `connect` should fail
    refused: RefCell<BTreeSet<String>>,
}

impl SignalTable {
    fn connect(&self, signal: &'static str, detail: &str) -> NamerResult<SignalHandle> {
        let name = if detail.is_empty() {
            signal.to_string()
        } else {
            format!("{}::{}", signal, detail)
        };
        if self.refused.borrow().contains(&name) {
            return Err(NamerError::Subscription {
                signal,
                reason: "refused by host".to_string(),
            });
        }
        let handle = SignalHandle(self.next.get() + 1);
        self.next.set(handle.0);
        self.connected.borrow_mut().insert(handle, name);
        Ok(handle)
    }

    fn disconnect(&self, handle: SignalHandle) {
        self.connected.borrow_mut().remove(&handle);
    }

    fn refuse(&self, name: &str) {
        self.refused.borrow_mut().insert(name.to_string());
    }

    fn count(&self) -> usize {
        self.connected.borrow().len()
    }
}

// =============================================================================
// Workspaces
// =============================================================================

/// In-memory workspace manager.
#[derive(Default)]
pub struct MemoryWorkspaces {
    /// Window ids per slot, in host enumeration order
    workspaces: RefCell<Vec<Vec<WindowId>>>,
    active: Cell<Slot>,
    /// Slots whose window listing fails
    failing: RefCell<BTreeSet<Slot>>,
    signals: SignalTable,
}

impl MemoryWorkspaces {
    /// Create a host with no workspaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host with one workspace per entry of `layout`.
    pub fn with_layout(layout: &[&[WindowId]]) -> Self {
        let host = Self::new();
        for windows in layout {
            host.push_workspace(windows);
        }
        host
    }

    /// Append a workspace, returning its slot.
    pub fn push_workspace(&self, windows: &[WindowId]) -> Slot {
        let mut workspaces = self.workspaces.borrow_mut();
        workspaces.push(windows.to_vec());
        workspaces.len() - 1
    }

    /// Insert a workspace at `slot`, shifting later workspaces right.
    pub fn insert_workspace(&self, slot: Slot, windows: &[WindowId]) {
        let mut workspaces = self.workspaces.borrow_mut();
        let slot = slot.min(workspaces.len());
        workspaces.insert(slot, windows.to_vec());
    }

    /// Remove the workspace at `slot`. Returns false if out of range.
    pub fn remove_workspace(&self, slot: Slot) -> bool {
        let mut workspaces = self.workspaces.borrow_mut();
        if slot >= workspaces.len() {
            return false;
        }
        workspaces.remove(slot);

        // Adjust active index if needed
        if self.active.get() >= workspaces.len() {
            self.active.set(workspaces.len().saturating_sub(1));
        }
        true
    }

    /// Replace the window set of the workspace at `slot`.
    pub fn set_windows(&self, slot: Slot, windows: &[WindowId]) {
        if let Some(ws) = self.workspaces.borrow_mut().get_mut(slot) {
            *ws = windows.to_vec();
        }
    }

    /// Place a window on the workspace at `slot`.
    pub fn add_window(&self, slot: Slot, window_id: WindowId) {
        if let Some(ws) = self.workspaces.borrow_mut().get_mut(slot) {
            if !ws.contains(&window_id) {
                ws.push(window_id);
            }
        }
    }

    /// Switch the active workspace. Returns false if out of range.
    pub fn switch_to(&self, slot: Slot) -> bool {
        if slot < self.workspaces.borrow().len() {
            self.active.set(slot);
            true
        } else {
            false
        }
    }

    /// Make window listing fail for `slot`.
    pub fn fail_window_listing(&self, slot: Slot) {
        self.failing.borrow_mut().insert(slot);
    }

    /// Make `connect` fail for `signal`.
    pub fn refuse_signal(&self, signal: WorkspaceSignal) {
        self.signals.refuse(signal.name());
    }

    /// Number of live signal connections.
    pub fn connection_count(&self) -> usize {
        self.signals.count()
    }
}

impl WorkspaceSource for MemoryWorkspaces {
    fn active_slot(&self) -> NamerResult<Slot> {
        let count = self.workspace_count();
        let active = self.active.get();
        if active < count {
            Ok(active)
        } else {
            Err(NamerError::WorkspaceNotFound {
                slot: active,
                count,
            })
        }
    }

    fn workspace_at(&self, slot: Slot) -> Option<Workspace> {
        (slot < self.workspace_count()).then(|| Workspace::at(slot))
    }

    fn workspace_count(&self) -> usize {
        self.workspaces.borrow().len()
    }

    fn list_window_ids(&self, workspace: &Workspace) -> NamerResult<Vec<WindowId>> {
        if self.failing.borrow().contains(&workspace.slot) {
            return Err(NamerError::window_query(workspace.slot, "listing failed"));
        }
        self.workspaces
            .borrow()
            .get(workspace.slot)
            .cloned()
            .ok_or(NamerError::WorkspaceNotFound {
                slot: workspace.slot,
                count: self.workspace_count(),
            })
    }

    fn connect(&self, signal: WorkspaceSignal) -> NamerResult<SignalHandle> {
        self.signals.connect(signal.name(), "")
    }

    fn disconnect(&self, handle: SignalHandle) {
        self.signals.disconnect(handle);
    }
}

// =============================================================================
// Settings
// =============================================================================

/// In-memory settings store.
#[derive(Default)]
pub struct MemorySettings {
    values: RefCell<BTreeMap<String, Vec<String>>>,
    /// Successful writes through [`SettingsStore::write_string_array`]
    writes: Cell<usize>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    signals: SignalTable,
}

impl MemorySettings {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value as an external party would (not counted as a write).
    pub fn set(&self, key: &str, values: &[&str]) {
        self.values.borrow_mut().insert(
            key.to_string(),
            values.iter().map(|s| s.to_string()).collect(),
        );
    }

    /// Current value of `key` (empty if unset).
    pub fn get(&self, key: &str) -> Vec<String> {
        self.values.borrow().get(key).cloned().unwrap_or_default()
    }

    /// Number of writes made through the store interface.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Make `connect_changed(key)` fail.
    pub fn refuse_changed(&self, key: &str) {
        self.signals.refuse(&format!("changed::{}", key));
    }

    /// Number of live signal connections.
    pub fn connection_count(&self) -> usize {
        self.signals.count()
    }
}

impl SettingsStore for MemorySettings {
    fn read_string_array(&self, key: &str) -> NamerResult<Vec<String>> {
        if self.fail_reads.get() {
            return Err(NamerError::settings(format!("cannot read '{}'", key)));
        }
        Ok(self.get(key))
    }

    fn write_string_array(&self, key: &str, values: &[String]) -> NamerResult<()> {
        if self.fail_writes.get() {
            return Err(NamerError::settings(format!("cannot write '{}'", key)));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), values.to_vec());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn connect_changed(&self, key: &str) -> NamerResult<SignalHandle> {
        self.signals.connect("changed", key)
    }

    fn disconnect(&self, handle: SignalHandle) {
        self.signals.disconnect(handle);
    }
}

// =============================================================================
// Display and prompt
// =============================================================================

/// In-memory panel label.
#[derive(Default)]
pub struct MemoryDisplay {
    text: RefCell<String>,
    /// Every text ever set, oldest first
    history: RefCell<Vec<String>>,
    signals: SignalTable,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently displayed text.
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }

    /// Make `connect_clicked` fail.
    pub fn refuse_clicks(&self) {
        self.signals.refuse("button-press-event");
    }

    /// Number of live signal connections.
    pub fn connection_count(&self) -> usize {
        self.signals.count()
    }
}

impl DisplaySurface for MemoryDisplay {
    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
        self.history.borrow_mut().push(text.to_string());
    }

    fn connect_clicked(&self) -> NamerResult<SignalHandle> {
        self.signals.connect("button-press-event", "")
    }

    fn disconnect(&self, handle: SignalHandle) {
        self.signals.disconnect(handle);
    }
}

/// Rename prompt answering from a queue of scripted outcomes.
///
/// An empty queue behaves like the user pressing Cancel.
#[derive(Default)]
pub struct ScriptedPrompt {
    responses: RefCell<VecDeque<PromptOutcome>>,
    /// Names the prompt was opened with
    shown: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a submission of `text` (raw, untrimmed).
    pub fn submit(&self, text: &str) {
        self.responses
            .borrow_mut()
            .push_back(PromptOutcome::Submitted(text.to_string()));
    }

    pub fn cancel(&self) {
        self.responses.borrow_mut().push_back(PromptOutcome::Cancelled);
    }

    /// Names the prompt has been pre-filled with, oldest first.
    pub fn shown(&self) -> Vec<String> {
        self.shown.borrow().clone()
    }
}

impl RenamePrompt for ScriptedPrompt {
    fn ask(&self, current_name: &str) -> PromptOutcome {
        self.shown.borrow_mut().push(current_name.to_string());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or(PromptOutcome::Cancelled)
    }
}

//! Host collaborator interfaces
//!
//! The namer never talks to the compositor, the settings backend or the panel
//! directly. Everything it needs goes through the narrow traits below, which
//! the embedding shell implements. [`memory`] provides in-memory versions for
//! tests and headless use.

pub mod memory;

use crate::error::NamerResult;
use crate::types::{Slot, WindowId};

/// Handle to a live workspace
///
/// Only valid until the host next reshapes the workspace list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Workspace {
    /// Current positional index
    pub slot: Slot,
}

impl Workspace {
    pub fn at(slot: Slot) -> Self {
        Self { slot }
    }
}

/// Opaque connection id returned by a `connect_*` call
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignalHandle(pub u64);

/// Workspace manager signals the namer listens to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WorkspaceSignal {
    ActiveChanged,
    Added,
    Removed,
}

impl WorkspaceSignal {
    /// Host signal name
    pub fn name(&self) -> &'static str {
        match self {
            WorkspaceSignal::ActiveChanged => "active-workspace-changed",
            WorkspaceSignal::Added => "workspace-added",
            WorkspaceSignal::Removed => "workspace-removed",
        }
    }
}

/// Workspace and window enumeration
pub trait WorkspaceSource {
    /// Index of the focused workspace.
    fn active_slot(&self) -> NamerResult<Slot>;

    /// Workspace at `slot`, or `None` if out of range.
    fn workspace_at(&self, slot: Slot) -> Option<Workspace>;

    /// Number of workspaces.
    fn workspace_count(&self) -> usize;

    /// Ids of the windows placed on `workspace`, in host order.
    fn list_window_ids(&self, workspace: &Workspace) -> NamerResult<Vec<WindowId>>;

    fn connect(&self, signal: WorkspaceSignal) -> NamerResult<SignalHandle>;

    fn disconnect(&self, handle: SignalHandle);
}

/// Key-value settings store with string-array fields
pub trait SettingsStore {
    fn read_string_array(&self, key: &str) -> NamerResult<Vec<String>>;

    fn write_string_array(&self, key: &str, values: &[String]) -> NamerResult<()>;

    /// Subscribe to `changed::<key>`. Fires for our own writes too.
    fn connect_changed(&self, key: &str) -> NamerResult<SignalHandle>;

    fn disconnect(&self, handle: SignalHandle);
}

/// Panel label showing the active workspace name
pub trait DisplaySurface {
    fn set_text(&self, text: &str);

    /// Subscribe to clicks on the label (opens the rename prompt).
    fn connect_clicked(&self) -> NamerResult<SignalHandle>;

    fn disconnect(&self, handle: SignalHandle);
}

/// Outcome of showing the rename prompt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Raw text as entered, not yet trimmed or validated
    Submitted(String),
    Cancelled,
}

/// Modal rename dialog
pub trait RenamePrompt {
    /// Show the prompt pre-filled with `current_name` and wait for the user.
    fn ask(&self, current_name: &str) -> PromptOutcome;
}

// Borrowed collaborators, so a caller can keep inspecting its host while the
// namer holds it.

impl<T: WorkspaceSource + ?Sized> WorkspaceSource for &T {
    fn active_slot(&self) -> NamerResult<Slot> {
        (**self).active_slot()
    }

    fn workspace_at(&self, slot: Slot) -> Option<Workspace> {
        (**self).workspace_at(slot)
    }

    fn workspace_count(&self) -> usize {
        (**self).workspace_count()
    }

    fn list_window_ids(&self, workspace: &Workspace) -> NamerResult<Vec<WindowId>> {
        (**self).list_window_ids(workspace)
    }

    fn connect(&self, signal: WorkspaceSignal) -> NamerResult<SignalHandle> {
        (**self).connect(signal)
    }

    fn disconnect(&self, handle: SignalHandle) {
        (**self).disconnect(handle)
    }
}

impl<T: SettingsStore + ?Sized> SettingsStore for &T {
    fn read_string_array(&self, key: &str) -> NamerResult<Vec<String>> {
        (**self).read_string_array(key)
    }

    fn write_string_array(&self, key: &str, values: &[String]) -> NamerResult<()> {
        (**self).write_string_array(key, values)
    }

    fn connect_changed(&self, key: &str) -> NamerResult<SignalHandle> {
        (**self).connect_changed(key)
    }

    fn disconnect(&self, handle: SignalHandle) {
        (**self).disconnect(handle)
    }
}

impl<T: DisplaySurface + ?Sized> DisplaySurface for &T {
    fn set_text(&self, text: &str) {
        (**self).set_text(text)
    }

    fn connect_clicked(&self) -> NamerResult<SignalHandle> {
        (**self).connect_clicked()
    }

    fn disconnect(&self, handle: SignalHandle) {
        (**self).disconnect(handle)
    }
}

impl<T: RenamePrompt + ?Sized> RenamePrompt for &T {
    fn ask(&self, current_name: &str) -> PromptOutcome {
        (**self).ask(current_name)
    }
}

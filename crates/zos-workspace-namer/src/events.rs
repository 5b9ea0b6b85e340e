//! Typed events dispatched to [`WorkspaceNamer::handle`](crate::WorkspaceNamer::handle)

use crate::host::WorkspaceSignal;

/// Everything the namer reacts to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NamerEvent {
    /// The focused workspace changed
    ActiveChanged,
    /// A workspace was inserted somewhere in the list
    WorkspaceAdded,
    /// A workspace was removed from somewhere in the list
    WorkspaceRemoved,
    /// A settings key changed, possibly by our own write
    SettingsChanged { key: String },
    /// The user clicked the label
    RenameRequested,
}

impl NamerEvent {
    pub fn settings_changed(key: impl Into<String>) -> Self {
        Self::SettingsChanged { key: key.into() }
    }

    /// Whether this event changes the shape of the workspace list
    pub fn is_shape_change(&self) -> bool {
        matches!(self, Self::WorkspaceAdded | Self::WorkspaceRemoved)
    }
}

impl From<WorkspaceSignal> for NamerEvent {
    fn from(signal: WorkspaceSignal) -> Self {
        match signal {
            WorkspaceSignal::ActiveChanged => Self::ActiveChanged,
            WorkspaceSignal::Added => Self::WorkspaceAdded,
            WorkspaceSignal::Removed => Self::WorkspaceRemoved,
        }
    }
}

//! Workspace Namer for Zero OS
//!
//! Keeps user-assigned workspace names attached to the right workspace while
//! the host reorders, adds and removes workspaces:
//! - Content fingerprints derived from each workspace's window set
//! - A fingerprint-keyed name registry (the source of truth)
//! - Reconciliation of slot -> name mappings when the list changes shape
//! - A positional snapshot persisted for configuration UIs and recovery
//!
//! ## Architecture
//!
//! - [`fingerprint`]: Window set -> stable identity string
//! - [`registry`]: Name registry, instance index, and the [`NameEngine`]
//! - [`persistence`]: Positional snapshot stored in the settings backend
//! - [`host`]: Collaborator traits plus in-memory implementations
//! - [`events`]: Typed host events
//! - [`service`]: The [`WorkspaceNamer`] lifecycle and event dispatch
//!
//! ## Example
//!
//! ```rust
//! use zos_workspace_namer::host::memory::{
//!     MemoryDisplay, MemorySettings, MemoryWorkspaces, ScriptedPrompt,
//! };
//! use zos_workspace_namer::{NamerConfig, NamerEvent, WorkspaceNamer};
//!
//! let host = MemoryWorkspaces::with_layout(&[&[10, 11], &[12]]);
//! let mut namer = WorkspaceNamer::new(
//!     NamerConfig::default(),
//!     host,
//!     MemorySettings::new(),
//!     MemoryDisplay::new(),
//!     ScriptedPrompt::new(),
//! )
//! .unwrap();
//! namer.enable().unwrap();
//!
//! namer.rename_active("Mail").unwrap();
//!
//! // A workspace is inserted in front; the name follows the windows to slot 1
//! namer.workspaces().insert_workspace(0, &[]);
//! namer.handle(NamerEvent::WorkspaceAdded).unwrap();
//! assert_eq!(namer.settings().get("workspace-names"), vec!["", "Mail", ""]);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Host-agnostic core**: No compositor or toolkit types; everything goes
//!    through the [`host`] traits
//! 2. **Nothing fatal**: Every failure degrades to a default name or a skipped
//!    write, and is logged with `tracing`
//! 3. **Run to completion**: Single-threaded, one event at a time, no locking

pub mod config;
pub mod error;
pub mod events;
pub mod fingerprint;
pub mod host;
pub mod persistence;
pub mod registry;
pub mod service;
pub mod types;

// Re-export core types for convenience
pub use config::NamerConfig;
pub use error::{NamerError, NamerResult};
pub use events::NamerEvent;
pub use fingerprint::{derive_fingerprint, Fingerprint};
pub use host::{
    DisplaySurface, PromptOutcome, RenamePrompt, SettingsStore, SignalHandle, Workspace,
    WorkspaceSignal, WorkspaceSource,
};
pub use persistence::PositionalSnapshot;
pub use registry::{AssignOutcome, Instance, InstanceMap, NameEngine, NameRegistry, NameSource, ResolvedName};
pub use service::WorkspaceNamer;
pub use types::{Slot, WindowId};

//! The namer service
//!
//! One [`WorkspaceNamer`] per shell session. It owns the [`NameEngine`], the
//! injected host collaborators, and every signal connection made on their
//! behalf.
//!
//! ## Lifecycle
//!
//! - [`enable`](WorkspaceNamer::enable): seed names from the stored snapshot,
//!   show the loading text, connect signals, show the active name
//! - [`handle`](WorkspaceNamer::handle): one call per host event, runs to
//!   completion
//! - [`disable`](WorkspaceNamer::disable): disconnect everything (also on drop)
//!
//! Handlers are idempotent: the host echoes our own snapshot writes back as
//! `SettingsChanged`, which only re-resolves the label and never writes.

use tracing::{debug, info, warn};

use crate::config::NamerConfig;
use crate::error::{NamerError, NamerResult};
use crate::events::NamerEvent;
use crate::host::{
    DisplaySurface, PromptOutcome, RenamePrompt, SettingsStore, SignalHandle, Workspace,
    WorkspaceSignal, WorkspaceSource,
};
use crate::persistence::PositionalSnapshot;
use crate::registry::{AssignOutcome, NameEngine, ResolvedName};

/// A live signal connection and the collaborator that issued it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Subscription {
    Workspace(SignalHandle),
    Settings(SignalHandle),
    Display(SignalHandle),
}

/// Workspace naming service bound to its host collaborators
pub struct WorkspaceNamer<W, S, D, P>
where
    W: WorkspaceSource,
    S: SettingsStore,
    D: DisplaySurface,
    P: RenamePrompt,
{
    engine: NameEngine,
    workspaces: W,
    settings: S,
    display: D,
    prompt: P,
    subscriptions: Vec<Subscription>,
    enabled: bool,
}

impl<W, S, D, P> WorkspaceNamer<W, S, D, P>
where
    W: WorkspaceSource,
    S: SettingsStore,
    D: DisplaySurface,
    P: RenamePrompt,
{
    /// Create a disabled namer. Fails only on invalid config.
    pub fn new(config: NamerConfig, workspaces: W, settings: S, display: D, prompt: P) -> NamerResult<Self> {
        config.validate()?;
        Ok(Self {
            engine: NameEngine::new(config),
            workspaces,
            settings,
            display,
            prompt,
            subscriptions: Vec::new(),
            enabled: false,
        })
    }

    /// Seed names, connect signals and show the active workspace's name.
    ///
    /// If any connection fails, the ones already made are released before
    /// the error is returned and the namer stays disabled.
    pub fn enable(&mut self) -> NamerResult<()> {
        if self.enabled {
            return Err(NamerError::InvalidOperation {
                op: "enable",
                reason: "namer is already enabled",
            });
        }

        self.seed_from_settings();
        self.display.set_text(&self.engine.config().loading_text);

        if let Err(e) = self.connect_all() {
            warn!(error = %e, "failed to connect host signals");
            self.release_subscriptions();
            self.engine.clear();
            return Err(e);
        }

        self.enabled = true;
        info!(
            connections = self.subscriptions.len(),
            tracked = self.engine.registry().len(),
            "workspace namer enabled"
        );

        // Failure already logged and replaced by the default name
        let _ = self.refresh_label();
        Ok(())
    }

    /// Release every connection and drop in-memory state. Idempotent.
    pub fn disable(&mut self) {
        self.release_subscriptions();
        self.engine.clear();
        if self.enabled {
            self.enabled = false;
            info!("workspace namer disabled");
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Dispatch one host event.
    ///
    /// Errors are reported after the fallback has been applied (default name
    /// on the label, or no write); the caller may ignore them.
    pub fn handle(&mut self, event: NamerEvent) -> NamerResult<()> {
        if !self.enabled {
            debug!(?event, "namer disabled, ignoring event");
            return Err(NamerError::InvalidOperation {
                op: "handle",
                reason: "namer is disabled",
            });
        }

        match event {
            NamerEvent::ActiveChanged => self.refresh_label().map(|_| ()),
            NamerEvent::WorkspaceAdded | NamerEvent::WorkspaceRemoved => {
                self.on_workspaces_changed().map(|_| ())
            }
            NamerEvent::SettingsChanged { key } => {
                if key == self.engine.config().names_key {
                    self.refresh_label().map(|_| ())
                } else {
                    Ok(())
                }
            }
            NamerEvent::RenameRequested => self.request_rename().map(|_| ()),
        }
    }

    /// Resolve the active workspace's name and show it.
    ///
    /// On failure the label shows the default name for the active slot.
    pub fn refresh_label(&mut self) -> NamerResult<ResolvedName> {
        let result = self.active_workspace().map(|workspace| {
            self.engine
                .resolve_name(&self.workspaces, &self.settings, &workspace)
        });

        match result {
            Ok(resolved) => {
                debug!(name = %resolved.name, source = ?resolved.source, "label updated");
                self.display.set_text(&resolved.name);
                Ok(resolved)
            }
            Err(e) => {
                warn!(error = %e, "cannot resolve active workspace name");
                let slot = self.workspaces.active_slot().unwrap_or(0);
                let fallback = ResolvedName::default_for(self.engine.config(), slot);
                self.display.set_text(&fallback.name);
                Err(e)
            }
        }
    }

    /// Show the rename prompt for the active workspace and apply the result.
    pub fn request_rename(&mut self) -> NamerResult<AssignOutcome> {
        let workspace = self.active_workspace().map_err(|e| {
            warn!(error = %e, "cannot open rename prompt");
            e
        })?;
        let current = self
            .engine
            .current_name(&self.workspaces, &self.settings, &workspace);

        match self.prompt.ask(&current.name) {
            PromptOutcome::Submitted(candidate) => self.rename_active(&candidate),
            PromptOutcome::Cancelled => {
                debug!(slot = workspace.slot, "rename cancelled");
                Ok(AssignOutcome::Ignored)
            }
        }
    }

    /// Assign `candidate` (untrimmed) to the active workspace.
    pub fn rename_active(&mut self, candidate: &str) -> NamerResult<AssignOutcome> {
        let workspace = self.active_workspace()?;
        let result =
            self.engine
                .assign_name(&self.workspaces, &self.settings, &workspace, candidate);

        match &result {
            Ok(AssignOutcome::Ignored) => {}
            Ok(AssignOutcome::Saved { .. }) => {
                let _ = self.refresh_label();
            }
            Err(e) => {
                // The name is still tracked in memory, show it
                warn!(error = %e, slot = workspace.slot, "failed to persist workspace name");
                let _ = self.refresh_label();
            }
        }
        result
    }

    /// Reconcile after the workspace list changed shape, then refresh.
    pub fn on_workspaces_changed(&mut self) -> NamerResult<PositionalSnapshot> {
        let result = self.engine.reconcile(&self.workspaces, &self.settings);
        if let Err(e) = &result {
            warn!(error = %e, "failed to persist reconciled names");
        }
        let _ = self.refresh_label();
        result
    }

    pub fn engine(&self) -> &NameEngine {
        &self.engine
    }

    pub fn workspaces(&self) -> &W {
        &self.workspaces
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    fn active_workspace(&self) -> NamerResult<Workspace> {
        let slot = self.workspaces.active_slot()?;
        self.workspaces
            .workspace_at(slot)
            .ok_or(NamerError::WorkspaceNotFound {
                slot,
                count: self.workspaces.workspace_count(),
            })
    }

    fn seed_from_settings(&mut self) {
        let key = self.engine.config().names_key.clone();
        match PositionalSnapshot::load(&self.settings, &key) {
            Ok(snapshot) => {
                self.engine
                    .initialize_from_snapshot(&self.workspaces, &snapshot);
            }
            Err(e) => warn!(error = %e, "cannot read stored names, starting empty"),
        }
    }

    fn connect_all(&mut self) -> NamerResult<()> {
        for signal in [
            WorkspaceSignal::ActiveChanged,
            WorkspaceSignal::Added,
            WorkspaceSignal::Removed,
        ] {
            let handle = self.workspaces.connect(signal)?;
            self.subscriptions.push(Subscription::Workspace(handle));
        }

        let handle = self
            .settings
            .connect_changed(&self.engine.config().names_key)?;
        self.subscriptions.push(Subscription::Settings(handle));

        let handle = self.display.connect_clicked()?;
        self.subscriptions.push(Subscription::Display(handle));
        Ok(())
    }

    /// Disconnect in reverse order of connection.
    fn release_subscriptions(&mut self) {
        while let Some(subscription) = self.subscriptions.pop() {
            match subscription {
                Subscription::Workspace(handle) => self.workspaces.disconnect(handle),
                Subscription::Settings(handle) => self.settings.disconnect(handle),
                Subscription::Display(handle) => self.display.disconnect(handle),
            }
        }
    }
}

impl<W, S, D, P> Drop for WorkspaceNamer<W, S, D, P>
where
    W: WorkspaceSource,
    S: SettingsStore,
    D: DisplaySurface,
    P: RenamePrompt,
{
    fn drop(&mut self) {
        self.disable();
    }
}

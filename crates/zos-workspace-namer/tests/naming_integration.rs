//! Workspace Naming Integration Tests
//!
//! Drives the namer service end to end through the in-memory host.

use zos_workspace_namer::host::memory::{
    MemoryDisplay, MemorySettings, MemoryWorkspaces, ScriptedPrompt,
};
use zos_workspace_namer::{
    Fingerprint, NameSource, NamerConfig, NamerEvent, WorkspaceNamer, WorkspaceSource,
};

const KEY: &str = "workspace-names";

type Namer = WorkspaceNamer<MemoryWorkspaces, MemorySettings, MemoryDisplay, ScriptedPrompt>;

fn start(layout: &[&[u64]], stored: &[&str]) -> Namer {
    let settings = MemorySettings::new();
    if !stored.is_empty() {
        settings.set(KEY, stored);
    }
    let mut namer = WorkspaceNamer::new(
        NamerConfig::default(),
        MemoryWorkspaces::with_layout(layout),
        settings,
        MemoryDisplay::new(),
        ScriptedPrompt::new(),
    )
    .unwrap();
    namer.enable().unwrap();
    namer
}

fn switch(namer: &mut Namer, slot: usize) {
    assert!(namer.workspaces().switch_to(slot));
    namer.handle(NamerEvent::ActiveChanged).unwrap();
}

/// Test that a saved name is shown again for the same window set.
#[test]
fn test_rename_round_trip() {
    let mut namer = start(&[&[1, 2], &[3]], &[]);

    namer.rename_active("Foo").unwrap();
    switch(&mut namer, 1);
    assert_eq!(namer.display().text(), "Workspace 2");

    switch(&mut namer, 0);
    assert_eq!(namer.display().text(), "Foo");
}

/// Test that a name follows its workspace when windows are added.
#[test]
fn test_name_migrates_with_window_changes() {
    let mut namer = start(&[&[5, 7]], &[]);
    namer.rename_active("Foo").unwrap();

    namer.workspaces().add_window(0, 9);
    namer.handle(NamerEvent::ActiveChanged).unwrap();

    assert_eq!(namer.display().text(), "Foo");
    let engine = namer.engine();
    assert_eq!(engine.name_for(&Fingerprint::from_windows(0, &[5, 7])), None);
    assert_eq!(
        engine.name_for(&Fingerprint::from_windows(0, &[5, 7, 9])),
        Some("Foo")
    );
}

/// Test that names follow windows when a leading workspace is removed and the rest reorder.
#[test]
fn test_reorder_preserves_name() {
    // Slot 0 is a scratch workspace, A = {1,2} "Work", B = {3,4}
    let mut namer = start(&[&[99], &[1, 2], &[3, 4]], &[]);
    switch(&mut namer, 1);
    namer.rename_active("Work").unwrap();

    namer.workspaces().remove_workspace(0);
    namer.workspaces().set_windows(0, &[3, 4]);
    namer.workspaces().set_windows(1, &[1, 2]);
    namer.handle(NamerEvent::WorkspaceRemoved).unwrap();

    assert_eq!(namer.settings().get(KEY), vec!["", "Work"]);
    switch(&mut namer, 1);
    assert_eq!(namer.display().text(), "Work");
    switch(&mut namer, 0);
    assert_eq!(namer.display().text(), "Workspace 1");
}

/// Test the documented limitation: content replaced during a reorder drops the name.
#[test]
fn test_reorder_with_replaced_content_loses_name() {
    let mut namer = start(&[&[1, 2], &[3, 4]], &[]);
    namer.rename_active("Work").unwrap();

    namer.workspaces().remove_workspace(1);
    namer.workspaces().insert_workspace(0, &[3, 4]);
    namer.workspaces().set_windows(1, &[70, 80]);
    namer.handle(NamerEvent::WorkspaceAdded).unwrap();

    assert_eq!(namer.settings().get(KEY), vec!["", ""]);
    switch(&mut namer, 1);
    assert_eq!(namer.display().text(), "Workspace 2");
}

/// Test that blank rename submissions change nothing.
#[test]
fn test_blank_rename_is_discarded() {
    let mut namer = start(&[&[1]], &["Keep"]);
    let writes = namer.settings().write_count();
    let registry_len = namer.engine().registry().len();

    namer.prompt().submit("   ");
    namer.handle(NamerEvent::RenameRequested).unwrap();

    assert_eq!(namer.prompt().shown(), vec!["Keep"]);
    assert_eq!(namer.settings().write_count(), writes);
    assert_eq!(namer.settings().get(KEY), vec!["Keep"]);
    assert_eq!(namer.engine().registry().len(), registry_len);
    assert_eq!(namer.display().text(), "Keep");
}

/// Test that stored positional names are migrated into fingerprints at startup.
#[test]
fn test_bootstrap_from_snapshot() {
    let namer = start(&[&[10, 11], &[], &[12]], &["Alpha", "", ""]);

    assert_eq!(namer.display().text(), "Alpha");
    assert_eq!(
        namer
            .engine()
            .name_for(&Fingerprint::from_windows(0, &[11, 10])),
        Some("Alpha")
    );
    let instance = namer.engine().instance(0).unwrap();
    assert_eq!(instance.name(), Some("Alpha"));
}

/// Test that bootstrapped names survive a later reorder.
#[test]
fn test_bootstrapped_name_follows_reorder() {
    let mut namer = start(&[&[10, 11], &[20]], &["Alpha", "Beta"]);

    namer.workspaces().insert_workspace(0, &[]);
    namer.handle(NamerEvent::WorkspaceAdded).unwrap();

    assert_eq!(namer.settings().get(KEY), vec!["", "Alpha", "Beta"]);
}

/// Test that our own snapshot writes echoed back by the store are no-ops.
#[test]
fn test_settings_echo_is_idempotent() {
    let mut namer = start(&[&[1], &[2]], &[]);
    namer.rename_active("Web").unwrap();
    namer.handle(NamerEvent::WorkspaceAdded).unwrap();
    let writes = namer.settings().write_count();
    let label = namer.display().text();

    for _ in 0..3 {
        namer.handle(NamerEvent::settings_changed(KEY)).unwrap();
        namer.handle(NamerEvent::WorkspaceAdded).unwrap();
    }

    assert_eq!(namer.settings().write_count(), writes);
    assert_eq!(namer.display().text(), label);
}

/// Test that an external settings change is picked up for unnamed workspaces.
#[test]
fn test_external_settings_change_updates_label() {
    let mut namer = start(&[&[1]], &[]);
    assert_eq!(namer.display().text(), "Workspace 1");

    namer.settings().set(KEY, &["Edited"]);
    namer.handle(NamerEvent::settings_changed(KEY)).unwrap();

    assert_eq!(namer.display().text(), "Edited");
}

/// Test that a host window-listing failure degrades without losing names.
#[test]
fn test_window_listing_failure_degrades() {
    let mut namer = start(&[&[1, 2], &[3]], &[]);
    namer.rename_active("Work").unwrap();

    namer.workspaces().fail_window_listing(1);
    switch(&mut namer, 1);
    assert_eq!(namer.display().text(), "Workspace 2");

    switch(&mut namer, 0);
    assert_eq!(namer.display().text(), "Work");
}

/// Test that resolution never produces an empty label.
#[test]
fn test_label_never_empty() {
    let mut namer = start(&[&[], &[1], &[2, 3], &[]], &["", "  ", "Named"]);

    for slot in 0..namer.workspaces().workspace_count() {
        switch(&mut namer, slot);
        assert!(!namer.display().text().trim().is_empty());
    }

    let resolved = namer.refresh_label().unwrap();
    assert_eq!(resolved.source, NameSource::Default);
}

/// Test that dropping the namer releases every host connection.
#[test]
fn test_drop_disconnects() {
    let host = MemoryWorkspaces::with_layout(&[&[1]]);
    let settings = MemorySettings::new();
    let display = MemoryDisplay::new();

    let mut namer = WorkspaceNamer::new(
        NamerConfig::default(),
        &host,
        &settings,
        &display,
        ScriptedPrompt::new(),
    )
    .unwrap();
    namer.enable().unwrap();
    assert_eq!(host.connection_count(), 3);
    drop(namer);

    assert_eq!(host.connection_count(), 0);
    assert_eq!(settings.connection_count(), 0);
    assert_eq!(display.connection_count(), 0);
}

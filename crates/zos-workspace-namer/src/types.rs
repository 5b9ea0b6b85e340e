//! Core type definitions for the workspace namer
//!
//! This module centralizes type aliases used throughout the crate
//! for consistency and discoverability.

/// Host-assigned window identifier
///
/// Opaque integer assigned by the window manager. Unique for the lifetime of
/// the window, never reused while the window exists.
pub type WindowId = u64;

/// Positional workspace index
///
/// Slots are reassigned by the host whenever workspaces are added, removed,
/// or reordered, so a slot never identifies a workspace on its own.
pub type Slot = usize;

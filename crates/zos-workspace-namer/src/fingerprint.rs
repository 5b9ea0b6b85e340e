//! Content-based workspace identity
//!
//! A workspace's slot changes whenever the host adds, removes or reorders
//! workspaces. Its windows don't, so the sorted set of window ids is what we
//! key names on.
//!
//! | Workspace state          | Fingerprint          |
//! |--------------------------|----------------------|
//! | windows `{7, 5, 12}`     | `windows-5-7-12`     |
//! | no windows, slot 3       | `empty-ws-3`         |
//! | enumeration failed, slot | `fallback-3`         |
//!
//! Empty and fallback fingerprints are positional and do not survive a
//! reorder.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::host::{Workspace, WorkspaceSource};
use crate::types::{Slot, WindowId};

const WINDOWS_PREFIX: &str = "windows-";
const EMPTY_PREFIX: &str = "empty-ws-";
const FALLBACK_PREFIX: &str = "fallback-";

/// Deterministic identity string for a workspace
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Build a fingerprint from a window listing.
    ///
    /// Ids are sorted numerically and deduplicated, so enumeration order and
    /// repeated listings never change the result.
    pub fn from_windows(slot: Slot, windows: &[WindowId]) -> Self {
        if windows.is_empty() {
            return Self::empty(slot);
        }

        let mut ids = windows.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join("-");
        Self(format!("{}{}", WINDOWS_PREFIX, joined))
    }

    /// Fingerprint for a workspace with no windows
    pub fn empty(slot: Slot) -> Self {
        Self(format!("{}{}", EMPTY_PREFIX, slot))
    }

    /// Fingerprint used when the host could not list windows
    pub fn fallback(slot: Slot) -> Self {
        Self(format!("{}{}", FALLBACK_PREFIX, slot))
    }

    /// Whether this fingerprint was derived from window membership
    /// (and so survives reorders).
    pub fn is_content_based(&self) -> bool {
        self.0.starts_with(WINDOWS_PREFIX)
    }

    /// Whether the host failed to enumerate windows for this workspace
    pub fn is_fallback(&self) -> bool {
        self.0.starts_with(FALLBACK_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the current fingerprint of a live workspace.
///
/// Never fails: a host enumeration error degrades to [`Fingerprint::fallback`]
/// and is logged.
pub fn derive_fingerprint<W>(source: &W, workspace: &Workspace) -> Fingerprint
where
    W: WorkspaceSource + ?Sized,
{
    match source.list_window_ids(workspace) {
        Ok(windows) => Fingerprint::from_windows(workspace.slot, &windows),
        Err(e) => {
            warn!(slot = workspace.slot, error = %e, "window listing failed, using fallback fingerprint");
            Fingerprint::fallback(workspace.slot)
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Enumeration order never changes the fingerprint
        #[test]
        fn fingerprint_permutation_invariant(
            ids in prop::collection::vec(any::<u64>(), 1..16),
            seed in any::<u64>(),
        ) {
            let mut shuffled = ids.clone();
            // Deterministic rotation + reversal stands in for an arbitrary host order
            let len = shuffled.len();
            shuffled.rotate_left((seed as usize) % len);
            if seed % 2 == 0 {
                shuffled.reverse();
            }

            prop_assert_eq!(
                Fingerprint::from_windows(0, &ids),
                Fingerprint::from_windows(0, &shuffled)
            );
        }

        /// Repeated derivation is a pure function of the set
        #[test]
        fn fingerprint_idempotent(ids in prop::collection::vec(any::<u64>(), 0..16), slot in 0usize..32) {
            let first = Fingerprint::from_windows(slot, &ids);
            let second = Fingerprint::from_windows(slot, &ids);
            prop_assert_eq!(first, second);
        }

        /// Non-empty sets are always content-based, empty ones never are
        #[test]
        fn fingerprint_kind_matches_content(ids in prop::collection::vec(any::<u64>(), 0..8), slot in 0usize..32) {
            let fp = Fingerprint::from_windows(slot, &ids);
            prop_assert_eq!(fp.is_content_based(), !ids.is_empty());
        }
    }
}

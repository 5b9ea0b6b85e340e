//! Name registry and reconciliation
//!
//! Two maps back every lookup:
//!
//! - [`NameRegistry`]: fingerprint -> name, the source of truth
//! - [`InstanceMap`]: slot -> (fingerprint, name), a derived index rebuilt
//!   whenever the workspace list changes shape
//!
//! [`NameEngine`] owns both and implements resolve, assign, reconcile and
//! bootstrap against the host collaborators.

mod engine;
mod instances;
mod names;

pub use engine::{AssignOutcome, NameEngine, NameSource, ResolvedName};
pub use instances::{Instance, InstanceMap};
pub use names::NameRegistry;

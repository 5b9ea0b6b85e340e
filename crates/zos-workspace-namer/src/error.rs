//! Error types for the workspace namer
//!
//! Every fallible operation in the crate returns a [`NamerResult`]. Nothing in
//! here is fatal: callers pick a fallback (default name, or no write) and log.

use crate::types::Slot;

/// Errors that can occur while naming workspaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamerError {
    /// No live workspace exists at the given slot
    WorkspaceNotFound {
        /// The requested slot
        slot: Slot,
        /// The actual number of workspaces
        count: usize,
    },

    /// The host failed to enumerate windows for a workspace
    WindowQuery {
        /// Slot of the workspace being queried
        slot: Slot,
        /// Host-provided failure description
        reason: String,
    },

    /// Reading or writing the settings store failed
    Settings(String),

    /// Connecting to a host signal failed
    Subscription {
        /// Signal name (e.g. `workspace-added`)
        signal: &'static str,
        /// Why the connection failed
        reason: String,
    },

    /// Configuration could not be parsed or is invalid
    Config(String),

    /// An operation was attempted that is not valid in the current state
    InvalidOperation {
        /// The operation that was attempted
        op: &'static str,
        /// Why the operation failed
        reason: &'static str,
    },
}

impl NamerError {
    /// Create a settings error with message.
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    /// Create a window query error for a slot.
    pub fn window_query(slot: Slot, reason: impl Into<String>) -> Self {
        Self::WindowQuery {
            slot,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for NamerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WorkspaceNotFound { slot, count } => {
                write!(f, "workspace slot {} out of bounds (count: {})", slot, count)
            }
            Self::WindowQuery { slot, reason } => {
                write!(f, "window query failed for slot {}: {}", slot, reason)
            }
            Self::Settings(msg) => write!(f, "settings error: {}", msg),
            Self::Subscription { signal, reason } => {
                write!(f, "failed to connect '{}': {}", signal, reason)
            }
            Self::Config(msg) => write!(f, "config error: {}", msg),
            Self::InvalidOperation { op, reason } => {
                write!(f, "invalid operation '{}': {}", op, reason)
            }
        }
    }
}

impl std::error::Error for NamerError {}

impl From<serde_json::Error> for NamerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

/// Result type alias for naming operations
pub type NamerResult<T> = Result<T, NamerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NamerError::WorkspaceNotFound { slot: 5, count: 3 };
        assert_eq!(err.to_string(), "workspace slot 5 out of bounds (count: 3)");

        let err = NamerError::window_query(2, "compositor gone");
        assert_eq!(
            err.to_string(),
            "window query failed for slot 2: compositor gone"
        );

        let err = NamerError::settings("schema missing");
        assert_eq!(err.to_string(), "settings error: schema missing");

        let err = NamerError::Subscription {
            signal: "workspace-added",
            reason: "bus closed".to_string(),
        };
        assert_eq!(err.to_string(), "failed to connect 'workspace-added': bus closed");

        let err = NamerError::InvalidOperation {
            op: "enable",
            reason: "already enabled",
        };
        assert_eq!(err.to_string(), "invalid operation 'enable': already enabled");
    }

    #[test]
    fn test_error_equality() {
        let err1 = NamerError::WorkspaceNotFound { slot: 1, count: 1 };
        let err2 = NamerError::WorkspaceNotFound { slot: 1, count: 1 };
        let err3 = NamerError::WorkspaceNotFound { slot: 2, count: 1 };

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }

    #[test]
    fn test_json_error_becomes_config_error() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: NamerError = json_err.into();
        assert!(matches!(err, NamerError::Config(_)));
    }
}

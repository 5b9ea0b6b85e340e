//! Namer configuration
//!
//! Every field has a default matching the stock GNOME window-manager
//! preferences, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::{NamerError, NamerResult};
use crate::types::Slot;

/// Default settings schema holding the names array
pub const DEFAULT_SETTINGS_SCHEMA: &str = "org.gnome.desktop.wm.preferences";

/// Default key of the positional names array
pub const DEFAULT_NAMES_KEY: &str = "workspace-names";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamerConfig {
    /// Schema the names array lives in (informational for the host)
    pub settings_schema: String,
    /// Key of the positional names array
    pub names_key: String,
    /// Prefix for generated names ("Workspace" -> "Workspace 3")
    pub default_name_prefix: String,
    /// Label text shown before the first name is resolved
    pub loading_text: String,
}

impl Default for NamerConfig {
    fn default() -> Self {
        Self {
            settings_schema: DEFAULT_SETTINGS_SCHEMA.to_string(),
            names_key: DEFAULT_NAMES_KEY.to_string(),
            default_name_prefix: "Workspace".to_string(),
            loading_text: "Loading...".to_string(),
        }
    }
}

impl NamerConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> NamerResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> NamerResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> NamerResult<()> {
        if self.names_key.trim().is_empty() {
            return Err(NamerError::Config("names_key must not be blank".to_string()));
        }
        if self.default_name_prefix.trim().is_empty() {
            return Err(NamerError::Config(
                "default_name_prefix must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// Generated name for a workspace without one (1-based)
    pub fn default_name(&self, slot: Slot) -> String {
        format!("{} {}", self.default_name_prefix, slot + 1)
    }
}

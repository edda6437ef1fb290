//! Host settings lookup.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Settings section owned by this participant.
pub const SETTINGS_SECTION: &str = "copilotContextPrepender";

/// Key holding the context reference.
pub const CONTEXT_SOURCE_KEY: &str = "contextSource";

/// Context reference used when the host has nothing configured.
pub const DEFAULT_CONTEXT_SOURCE: &str = "~/.copilot.md";

/// Read-only view of host-provided settings.
///
/// The host owns the settings store; the participant only reads from it
/// once per request.
pub trait Configuration: Send + Sync {
    /// Look up a string value under `section.key`.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
}

/// Typed settings for the participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrependerSettings {
    /// File path or URL of the custom instructions.
    #[serde(default = "default_context_source")]
    pub context_source: String,
}

fn default_context_source() -> String {
    DEFAULT_CONTEXT_SOURCE.to_string()
}

impl Default for PrependerSettings {
    fn default() -> Self {
        Self {
            context_source: default_context_source(),
        }
    }
}

impl PrependerSettings {
    /// Create settings pointing at a specific context source.
    #[must_use]
    pub fn new(context_source: impl Into<String>) -> Self {
        Self {
            context_source: context_source.into(),
        }
    }

    /// Read settings from the host, falling back to defaults.
    #[must_use]
    pub fn load(config: &dyn Configuration) -> Self {
        config
            .get_string(SETTINGS_SECTION, CONTEXT_SOURCE_KEY)
            .map_or_else(Self::default, Self::new)
    }
}

impl Configuration for PrependerSettings {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        (section == SETTINGS_SECTION && key == CONTEXT_SOURCE_KEY)
            .then(|| self.context_source.clone())
    }
}

/// Configuration backed by an editor-style settings document.
///
/// Both flat dotted keys (`"section.key": ...`) and nested objects
/// (`"section": { "key": ... }`) are understood; the flat form wins when
/// both are present.
#[derive(Debug, Clone, Default)]
pub struct JsonConfiguration {
    root: Value,
}

impl JsonConfiguration {
    /// Wrap a parsed settings document.
    #[must_use]
    pub const fn new(root: Value) -> Self {
        Self { root }
    }

    /// Parse a settings document.
    ///
    /// # Errors
    /// Returns error if the input is not valid JSON.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::new)
    }
}

impl Configuration for JsonConfiguration {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        let flat = self.root.get(format!("{section}.{key}"));
        let nested = || self.root.get(section).and_then(|s| s.get(key));
        flat.or_else(nested)
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

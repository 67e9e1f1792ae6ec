//! Persisted plugin settings.

use serde::{Deserialize, Serialize};

/// The plugin's persisted settings. Both keys are optional on load and always written on
/// save, without validating against live registry state.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub output_frame: Option<String>,
}

//! Display configuration options.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Options controlling how results are presented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewOptions {
    /// Whether the displacement field is applied to the geometry. When
    /// false, the reference configuration is displayed at every step.
    pub deformed: bool,

    /// Whether the legend carries min/max lines for the current color range.
    pub show_min_max: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            deformed: true,
            show_min_max: true,
        }
    }
}

impl ViewOptions {
    /// Serializes the options to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restores options from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

//! Output configuration for the inspector.

use serde::{Deserialize, Serialize};

/// How inspection results are rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: `"table"` or `"json"`.
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "table".to_string()
}

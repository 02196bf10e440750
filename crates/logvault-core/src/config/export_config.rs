use serde::{Deserialize, Serialize};

use super::defaults;

/// Query and export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Limit carried by `LogVault::query_params`. `QueryParams::new` keeps
    /// the built-in default of 100.
    pub default_limit: usize,
    /// Directory for exports written without an explicit path.
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_limit: defaults::DEFAULT_QUERY_LIMIT,
            output_dir: defaults::DEFAULT_EXPORT_DIR.to_string(),
        }
    }
}

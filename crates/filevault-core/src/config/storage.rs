//! File storage configuration.

use serde::{Deserialize, Serialize};

/// Local file storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for uploaded files.
    #[serde(default = "default_upload_root")]
    pub upload_root: String,
    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

fn default_upload_root() -> String {
    "data/uploads".to_string()
}

fn default_max_upload() -> u64 {
    // 100 MiB
    100 * 1024 * 1024
}

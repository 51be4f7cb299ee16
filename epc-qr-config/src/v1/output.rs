use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where saved QR images go.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        let documents = dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join("Documents")))
            .unwrap_or_default();
        Self {
            directory: documents.join("EPC_QR"),
        }
    }
}

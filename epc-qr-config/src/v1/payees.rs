use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PayeesConfig {
    pub path: PathBuf,
}

impl Default for PayeesConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_default();
        Self {
            path: home.join(".epc_qr_payees.json"),
        }
    }
}

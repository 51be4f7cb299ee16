use epc_qr_payload::{Charset, UnknownCode, Version};
use serde::{Deserialize, Serialize};

/// Version and character set used when a transfer does not name its own.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EncodeDefaults {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_charset")]
    pub charset: String,
}

impl EncodeDefaults {
    pub fn version(&self) -> Result<Version, UnknownCode> {
        self.version.parse()
    }

    pub fn charset(&self) -> Result<Charset, UnknownCode> {
        self.charset.parse()
    }
}

impl Default for EncodeDefaults {
    fn default() -> Self {
        Self {
            version: default_version(),
            charset: default_charset(),
        }
    }
}

fn default_version() -> String {
    Version::default().to_string()
}

fn default_charset() -> String {
    Charset::default().to_string()
}

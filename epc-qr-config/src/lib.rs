use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use v1::defaults::EncodeDefaults;
pub use v1::output::OutputConfig;
pub use v1::payees::PayeesConfig;

mod v1 {
    /// Default version and charset
    pub mod defaults;

    /// QR image output
    pub mod output;

    /// Saved payee store
    pub mod payees;
}

pub const CURRENT_VERSION: usize = 1;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse Error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialize Error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Paths and defaults handed to the collaborators at construction time.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    version: usize,
    #[serde(default)]
    payees: PayeesConfig,
    #[serde(default)]
    output: OutputConfig,
    #[serde(default)]
    defaults: EncodeDefaults,
}

impl Config {
    pub fn payees(&self) -> &PayeesConfig {
        &self.payees
    }

    pub fn payees_mut(&mut self) -> &mut PayeesConfig {
        &mut self.payees
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut OutputConfig {
        &mut self.output
    }

    pub fn defaults(&self) -> &EncodeDefaults {
        &self.defaults
    }

    pub fn defaults_mut(&mut self) -> &mut EncodeDefaults {
        &mut self.defaults
    }

    pub fn needs_upgrade(&self) -> bool {
        self.version < CURRENT_VERSION
    }

    pub fn upgrade_to_latest(mut self) -> Self {
        self.version = CURRENT_VERSION;
        self
    }

    pub fn from_toml(toml: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Reads the config at `path`, or the defaults if there is no file yet.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Default::default());
        }
        let config = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&config)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let toml = self.to_toml()?;
        let mut buf = BufWriter::new(std::fs::File::create(path)?);
        buf.write_all(toml.as_bytes())?;
        buf.flush()?;
        Ok(())
    }

    pub fn load_from_file() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_location())
    }

    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_location())
    }

    pub fn config_location() -> PathBuf {
        match dirs::config_dir() {
            Some(config_dir) => config_dir.join("epc-qr").join("config.toml"),
            None => PathBuf::from("epc-qr.toml"),
        }
    }

    /// get a list of all things potentially wrong with the config
    pub fn config_errors(&self) -> Vec<&str> {
        let mut errors = Vec::new();
        if self.payees().path.as_os_str().is_empty() {
            errors.push("Payee store path is empty");
        }
        if self.output().directory.as_os_str().is_empty() {
            errors.push("Output directory is empty");
        }
        if self.defaults().version().is_err() {
            errors.push("Default version must be 001 or 002");
        }
        if self.defaults().charset().is_err() {
            errors.push("Default charset must be 1");
        }
        errors
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            payees: PayeesConfig::default(),
            output: OutputConfig::default(),
            defaults: EncodeDefaults::default(),
        }
    }
}

//! noon configuration.
//!
//! Loaded from `~/.noon/config.toml`. Defaults apply when the file is missing.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::check::DEFAULT_LOOKBACK;
use crate::storage::Storage;

/// noon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// How many recent reports must agree before a differing cargo status
    /// is flagged.
    pub lookback: usize,

    /// Where the report database lives. Defaults to `~/.noon/`.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookback: DEFAULT_LOOKBACK,
            data_dir: None,
        }
    }
}

impl Config {
    /// Load config from `~/.noon/config.toml`.
    /// Returns an error if the file exists but is invalid.
    pub fn load() -> Result<Self, String> {
        let path = Self::path().ok_or("could not determine home directory")?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        Self::parse(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// Parse and validate config file contents.
    fn parse(contents: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(contents).map_err(|e| e.to_string())?;

        if config.lookback == 0 {
            return Err("lookback must be at least 1".to_string());
        }

        Ok(config)
    }

    /// The config file path: `~/.noon/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".noon").join("config.toml"))
    }

    /// The storage root: `data-dir` if set, otherwise `~/.noon/`.
    pub fn storage_root(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(Storage::default_root)
    }
}

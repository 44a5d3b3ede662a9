//! Search defaults and word-file format
//!
//! Stored as JSON in ~/.config/fuzzy_trie/config.json (platform config dir).
//! Every field is optional in the file; missing fields take their defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default edit budget for fuzzy lookups
pub const DEFAULT_MAX_EDITS: usize = 2;

/// Default cap on fuzzy lookup results
pub const DEFAULT_MAX_RESULTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Edit budget used by `Lexicon::fuzzy`
    pub max_edits: usize,
    /// Result cap used by `Lexicon::fuzzy`
    pub max_results: usize,
    /// Separates key from value on a word-file line
    pub separator: char,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_edits: DEFAULT_MAX_EDITS,
            max_results: DEFAULT_MAX_RESULTS,
            separator: '\t',
        }
    }
}

impl Config {
    /// Default location (~/.config/fuzzy_trie/config.json)
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not find config directory".into()))?;
        Ok(config_dir.join("fuzzy_trie").join("config.json"))
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load(path)
    }

    /// Write this config as pretty JSON, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(Error::Config("max_results must be at least 1".into()));
        }
        if self.separator == '\n' || self.separator == '\r' {
            return Err(Error::Config("separator cannot be a line break".into()));
        }
        Ok(())
    }
}

//! Parser configuration.
//!
//! Bundles the section layouts, key vocabulary and the few scalar knobs of
//! the index format into one YAML-serializable record. Every field is
//! optional in YAML; omitted fields fall back to the built-in tables.
//!
//! # Example YAML
//!
//! ```yaml
//! tab_width: 8
//! preamble_pattern: "^={10,}"
//! modes:
//!   - name: insert
//!     header: "1. Insert mode"
//!     skip_lines: 3
//!     chars_col: 16
//!     description_col: 32
//!   - name: normal
//!     header: "2. Normal mode"
//!     skip_lines: 12
//!     chars_col: 16
//!     flags_col: 32
//!     description_col: 35
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::builtin::{default_modes, default_vocabulary};
use crate::error::{ConfigError, Result};
use crate::validate::validate_config;
use crate::{KeySpec, ModeLayout};

/// Width each tab character expands to.
pub const DEFAULT_TAB_WIDTH: usize = 8;

/// Lines up to and including the first match are the document preamble.
pub const DEFAULT_PREAMBLE_PATTERN: &str = "^={10,}";

/// Configuration for the index parser and key tokenizer.
///
/// # Examples
///
/// ```
/// use keyref_core::IndexConfig;
///
/// let config = IndexConfig::from_yaml_str("tab_width: 4").unwrap();
/// assert_eq!(config.tab_width, 4);
/// assert_eq!(config.modes.len(), 14);
/// assert!(config.mode("visual").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Number of spaces each tab expands to.
    pub tab_width: usize,
    /// Regular expression matching the line that ends the preamble.
    pub preamble_pattern: String,
    /// Section layouts in document order.
    pub modes: Vec<ModeLayout>,
    /// Key vocabulary for notation decoding.
    pub keys: Vec<KeySpec>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            preamble_pattern: DEFAULT_PREAMBLE_PATTERN.to_string(),
            modes: default_modes(),
            keys: default_vocabulary(),
        }
    }
}

impl IndexConfig {
    /// Parses configuration from YAML text without validating it.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads configuration from a YAML file and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if parsing fails, or [`ConfigError::Invalid`]
    /// if the tables do not validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validated()
    }

    /// Writes the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Returns the configuration if it passes [`validate_config`].
    pub fn validated(self) -> Result<Self> {
        let errors = validate_config(&self);
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Looks up a section layout by name.
    pub fn mode(&self, name: &str) -> Option<&ModeLayout> {
        self.modes.iter().find(|mode| mode.name == name)
    }
}

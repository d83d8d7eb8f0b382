//! Configuration validation.
//!
//! Checks the static tables that drive the parser and the tokenizer before
//! any input is read: layouts must be well-ordered and uniquely named, and
//! no key pattern may be registered twice.
//!
//! # Examples
//!
//! ```
//! use keyref_core::*;
//!
//! assert!(validate_config(&IndexConfig::default()).is_empty());
//!
//! let mut config = IndexConfig::default();
//! config.keys.push(KeySpec::new("AGAIN", &["w"], KeyCategory::Literal));
//! let errors = validate_config(&config);
//! assert!(errors.iter().any(|e| matches!(e, ValidationError::DuplicatePattern { .. })));
//! ```

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::{IndexConfig, KeySpec, ModeLayout};

/// Static-table errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("at least one mode layout is required")]
    NoModes,
    #[error("tab width must be greater than zero")]
    ZeroTabWidth,
    #[error("preamble pattern cannot be empty")]
    EmptyPreamblePattern,
    #[error("mode name cannot be empty")]
    EmptyModeName,
    #[error("mode '{0}' has an empty header")]
    EmptyHeader(String),
    #[error("duplicate mode name: {0}")]
    DuplicateMode(String),
    /// Columns must satisfy `chars_col < flags_col < description_col`.
    #[error("mode '{0}' has columns out of order")]
    InvalidColumns(String),
    #[error("key name cannot be empty")]
    EmptyKeyName,
    #[error("key '{0}' has no patterns")]
    NoPatterns(String),
    #[error("key '{0}' has an empty pattern")]
    EmptyPattern(String),
    /// The same surface text is bound to two entries (or twice to one).
    #[error("pattern '{pattern}' registered by both '{first}' and '{second}'")]
    DuplicatePattern {
        pattern: String,
        first: String,
        second: String,
    },
}

/// Validates a full configuration.
pub fn validate_config(config: &IndexConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.tab_width == 0 {
        errors.push(ValidationError::ZeroTabWidth);
    }
    if config.preamble_pattern.trim().is_empty() {
        errors.push(ValidationError::EmptyPreamblePattern);
    }
    errors.extend(validate_modes(&config.modes));
    errors.extend(validate_vocabulary(&config.keys));

    errors
}

/// Validates section layouts.
pub fn validate_modes(modes: &[ModeLayout]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if modes.is_empty() {
        errors.push(ValidationError::NoModes);
        return errors;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for mode in modes {
        let name = mode.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::EmptyModeName);
            continue;
        }
        if !seen.insert(name) {
            errors.push(ValidationError::DuplicateMode(name.to_string()));
        }
        if mode.header.is_empty() {
            errors.push(ValidationError::EmptyHeader(name.to_string()));
        }

        let ordered = match mode.flags_col {
            Some(flags) => mode.chars_col < flags && flags < mode.description_col,
            None => mode.chars_col < mode.description_col,
        };
        if !ordered {
            errors.push(ValidationError::InvalidColumns(name.to_string()));
        }
    }

    errors
}

/// Validates a key vocabulary.
pub fn validate_vocabulary(keys: &[KeySpec]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut owners: HashMap<&str, &str> = HashMap::new();

    for key in keys {
        if key.name.trim().is_empty() {
            errors.push(ValidationError::EmptyKeyName);
            continue;
        }
        if key.patterns.is_empty() {
            errors.push(ValidationError::NoPatterns(key.name.clone()));
        }
        for pattern in &key.patterns {
            if pattern.is_empty() {
                errors.push(ValidationError::EmptyPattern(key.name.clone()));
                continue;
            }
            if let Some(first) = owners.insert(pattern.as_str(), key.name.as_str()) {
                errors.push(ValidationError::DuplicatePattern {
                    pattern: pattern.clone(),
                    first: first.to_string(),
                    second: key.name.clone(),
                });
            }
        }
    }

    errors
}

//! Core types and static tables for editor keybinding index extraction.
//!
//! This crate defines the data model shared by the parser and the CLI:
//!
//! - [`ModeLayout`]: one section of the help index (header text, skip
//!   count and column layout).
//! - [`Command`]: a keybinding record extracted from a data row.
//! - [`KeySpec`], [`Key`], [`KeyCategory`]: the key-notation vocabulary.
//! - [`KeyCombination`]: a decoded key with its modifiers.
//! - [`IndexConfig`]: layouts, vocabulary and format knobs, loadable from
//!   YAML and defaulting to the built-in tables.
//!
//! Validation ([`validate_config`]) catches table errors such as duplicate
//! key patterns and out-of-order columns before any input is parsed.
//!
//! # Example
//!
//! ```
//! use keyref_core::*;
//!
//! let config = IndexConfig::default();
//! assert!(validate_config(&config).is_empty());
//!
//! let normal = config.mode("normal").unwrap();
//! let cmd = Command::new(normal, Some("x"), "x", Some("2"), "delete N characters", 1).unwrap();
//! assert!(cmd.is_undoable);
//! assert_eq!(cmd.mode, "normal");
//! ```

mod builtin;
mod config;
mod error;
mod types;
mod validate;

pub use builtin::{default_modes, default_vocabulary};
pub use config::{DEFAULT_PREAMBLE_PATTERN, DEFAULT_TAB_WIDTH, IndexConfig};
pub use error::{ConfigError, Result};
pub use types::*;
pub use validate::{ValidationError, validate_config, validate_modes, validate_vocabulary};

//! Keybinding extraction from the editor help index.
//!
//! This crate turns the semi-tabular help index into structured
//! [`Command`] records and decodes the key notation used in it.
//!
//! # Main entry points
//!
//! - [`parse_index`]: parse a whole index document with a configuration.
//! - [`IndexParser`]: the section/record driver, reusable across
//!   documents and exposing [`ParseStats`] for the last run.
//! - [`KeyTokenizer`]: decode notation like `<C-W>` or `2dw` into
//!   [`KeyCombination`]s.
//!
//! # Example
//!
//! ```
//! use keyref_core::IndexConfig;
//! use keyref_parser::{KeyTokenizer, parse_index};
//!
//! let index = "\
//! *index.txt*  For Vim
//! ==============================================================================
//! 1. Insert mode
//! tag\t\tchar\t\taction in Insert mode
//! -----------------------------------------------------------------------
//!
//! |i_CTRL-W|\tCTRL-W\t\tdelete word before the cursor
//! ";
//!
//! let config = IndexConfig::default();
//! let commands = parse_index(index, &config).unwrap();
//! assert_eq!(commands.len(), 1);
//! assert_eq!(commands[0].mode, "insert");
//!
//! let tokenizer = KeyTokenizer::new(&config.keys).unwrap();
//! let keys = tokenizer.tokenize(&commands[0].chars).unwrap();
//! assert_eq!(keys[0].to_string(), "Ctrl+W");
//! ```
//!
//! [`Command`]: keyref_core::Command
//! [`KeyCombination`]: keyref_core::KeyCombination

pub mod columns;
pub mod driver;
pub mod error;
pub mod keys;
pub mod output;
pub mod trie;

use keyref_core::{Command, ConfigError, IndexConfig};
use thiserror::Error;

pub use driver::{IndexParser, ParseStats};
pub use error::ParseError;
pub use keys::{KeyError, KeyTokenizer};
pub use trie::{DuplicateKey, Trie};

/// Any failure from the convenience entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Key(#[from] KeyError),
}

/// Parses an index document held in memory.
///
/// Builds an [`IndexParser`] for `config` and runs it once. Use the parser
/// directly to read from a stream or to inspect [`ParseStats`].
pub fn parse_index(text: &str, config: &IndexConfig) -> Result<Vec<Command>, Error> {
    let mut parser = IndexParser::new(config)?;
    Ok(parser.parse(text)?)
}

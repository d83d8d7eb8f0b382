//! Data model for index records and key notation.
//!
//! This module defines the values produced by the index parser
//! ([`Command`]) and by the key-notation tokenizer ([`KeyCombination`]),
//! along with the static configuration records they are derived from
//! ([`ModeLayout`], [`KeySpec`]). All types serialize with [`serde`] so they
//! can be loaded from YAML configuration and dumped as JSON/YAML output.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Column layout of one section (mode) of the help index.
///
/// A section begins at the first line starting with [`header`](Self::header).
/// The next [`skip_lines`](Self::skip_lines) lines are column headings and
/// rulers and are dropped. Data rows are then split at the configured byte
/// columns (after tab expansion).
///
/// # Examples
///
/// ```
/// use keyref_core::ModeLayout;
///
/// let normal = ModeLayout::new("normal", "2. Normal mode", 12, 16, Some(32), 35);
/// assert!(normal.decodes_flags());
/// assert_eq!(normal.chars_boundary(), 32);
///
/// let insert = ModeLayout::new("insert", "1. Insert mode", 3, 16, None, 32);
/// assert!(!insert.decodes_flags());
/// assert_eq!(insert.chars_boundary(), 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeLayout {
    /// Stable identifier (e.g. `"normal"`), copied into every [`Command`].
    pub name: String,
    /// Text a line must start with to enter this section.
    pub header: String,
    /// Number of lines dropped right after the header line.
    #[serde(default)]
    pub skip_lines: usize,
    /// Column where the key characters start on tag-less rows.
    pub chars_col: usize,
    /// Column where the flags field starts, if the section has one.
    #[serde(default)]
    pub flags_col: Option<usize>,
    /// Column where the description starts.
    pub description_col: usize,
}

impl ModeLayout {
    /// Creates a layout.
    pub fn new(
        name: impl Into<String>,
        header: impl Into<String>,
        skip_lines: usize,
        chars_col: usize,
        flags_col: Option<usize>,
        description_col: usize,
    ) -> Self {
        Self {
            name: name.into(),
            header: header.into(),
            skip_lines,
            chars_col,
            flags_col,
            description_col,
        }
    }

    /// Returns `true` when rows in this section carry a flags field.
    pub fn decodes_flags(&self) -> bool {
        self.flags_col.is_some()
    }

    /// Column at or past which an unguarded space ends the chars field.
    pub fn chars_boundary(&self) -> usize {
        self.flags_col.unwrap_or(self.description_col)
    }
}

/// Error raised when a record is built against a layout that cannot hold it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Flags were supplied for a section without a flags column.
    #[error("mode '{mode}' does not decode flags")]
    FlagsUnsupported { mode: String },
}

/// One keybinding entry extracted from the index.
///
/// # Examples
///
/// ```
/// use keyref_core::{Command, ModeLayout};
///
/// let normal = ModeLayout::new("normal", "2. Normal mode", 12, 16, Some(32), 35);
/// let mut cmd = Command::new(&normal, Some("w"), "w", Some("1"), "N words forward", 42).unwrap();
/// assert!(cmd.is_cursor_movement);
/// assert!(!cmd.is_undoable);
///
/// cmd.append_description("(exclusive)");
/// assert_eq!(cmd.description, "N words forward (exclusive)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Name of the [`ModeLayout`] the row was found under.
    pub mode: String,
    /// Cross-reference label from a leading `|tag|`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Raw key characters as written in the index.
    pub chars: String,
    /// Raw flags field, for sections that have one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
    /// Flags contain `1`: the command moves the cursor.
    #[serde(default)]
    pub is_cursor_movement: bool,
    /// Flags contain `2`: the command can be undone.
    #[serde(default)]
    pub is_undoable: bool,
    /// Description, joined across continuation lines.
    pub description: String,
    /// 1-based line number of the row that started the record.
    #[serde(default)]
    pub line: usize,
}

impl Command {
    /// Creates a record, decoding flags when present.
    ///
    /// Fails with [`CommandError::FlagsUnsupported`] when `flags` is given
    /// for a layout without a flags column.
    pub fn new(
        layout: &ModeLayout,
        tag: Option<&str>,
        chars: &str,
        flags: Option<&str>,
        description: &str,
        line: usize,
    ) -> Result<Self, CommandError> {
        let mut is_cursor_movement = false;
        let mut is_undoable = false;
        if let Some(flags) = flags {
            if !layout.decodes_flags() {
                return Err(CommandError::FlagsUnsupported {
                    mode: layout.name.clone(),
                });
            }
            is_cursor_movement = flags.contains('1');
            is_undoable = flags.contains('2');
        }

        Ok(Self {
            mode: layout.name.clone(),
            tag: tag.map(String::from),
            chars: chars.to_string(),
            flags: flags.map(String::from),
            is_cursor_movement,
            is_undoable,
            description: description.to_string(),
            line,
        })
    }

    /// Appends continuation text, separated by a single space.
    pub fn append_description(&mut self, more: &str) {
        if !self.description.is_empty() {
            self.description.push(' ');
        }
        self.description.push_str(more);
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.mode)?;
        if let Some(tag) = &self.tag {
            write!(f, "|{tag}| ")?;
        }
        write!(f, "{} -- {}", self.chars, self.description)
    }
}

/// Keyboard modifier folded into the following key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    Control,
    Alt,
    Shift,
}

/// Category of a vocabulary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCategory {
    /// A single printable character (`w`, `2`, `"`).
    Literal,
    /// A special key spelled out by name (`BS`, `PageUp`).
    Named,
    /// A placeholder slot such as `{count}` or `{register}`.
    Identifier,
    /// A character-class placeholder such as `{a-z}`.
    Regex,
    /// `CTRL-` / `C-` prefix.
    Control,
    /// `ALT-` / `A-` prefix.
    Alt,
    /// `SHIFT-` / `S-` prefix.
    Shift,
    /// A phrase that only matches a whole notation line.
    Multiword,
}

impl KeyCategory {
    /// Returns the modifier this category stands for, if any.
    pub fn modifier(self) -> Option<Modifier> {
        match self {
            Self::Control => Some(Modifier::Control),
            Self::Alt => Some(Modifier::Alt),
            Self::Shift => Some(Modifier::Shift),
            _ => None,
        }
    }

    pub fn is_modifier(self) -> bool {
        self.modifier().is_some()
    }
}

/// A logical key, as bound in the tokenizer trie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    pub name: String,
    pub category: KeyCategory,
}

impl Key {
    pub fn new(name: impl Into<String>, category: KeyCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// Vocabulary entry: a logical key and every surface form that denotes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySpec {
    pub name: String,
    pub patterns: Vec<String>,
    pub category: KeyCategory,
}

impl KeySpec {
    pub fn new(name: &str, patterns: &[&str], category: KeyCategory) -> Self {
        Self {
            name: name.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            category,
        }
    }

    /// Returns the value bound for each of this entry's patterns.
    pub fn key(&self) -> Key {
        Key::new(self.name.clone(), self.category)
    }
}

/// A principal key plus the modifiers held with it.
///
/// # Examples
///
/// ```
/// use keyref_core::{Key, KeyCategory, KeyCombination, Modifier};
///
/// let w = Key::new("W", KeyCategory::Literal);
/// let combo = KeyCombination::new(w).with_modifier(Modifier::Control);
/// assert_eq!(combo.to_string(), "Ctrl+W");
/// assert_eq!(combo.optional().to_string(), "[Ctrl+W]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCombination {
    pub key: Key,
    #[serde(default)]
    pub with_shift: bool,
    #[serde(default)]
    pub with_control: bool,
    #[serde(default)]
    pub with_alt: bool,
    #[serde(default)]
    pub is_optional: bool,
}

impl KeyCombination {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            with_shift: false,
            with_control: false,
            with_alt: false,
            is_optional: false,
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        match modifier {
            Modifier::Control => self.with_control = true,
            Modifier::Alt => self.with_alt = true,
            Modifier::Shift => self.with_shift = true,
        }
        self
    }

    /// Marks the combination as optional (bracketed when displayed).
    ///
    /// The tokenizer never sets this; it exists for callers that build
    /// combinations themselves.
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    pub fn has_modifiers(&self) -> bool {
        self.with_shift || self.with_control || self.with_alt
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_optional {
            f.write_str("[")?;
        }
        if self.with_control {
            f.write_str("Ctrl+")?;
        }
        if self.with_alt {
            f.write_str("Alt+")?;
        }
        if self.with_shift {
            f.write_str("Shift+")?;
        }
        f.write_str(&self.key.name)?;
        if self.is_optional {
            f.write_str("]")?;
        }
        Ok(())
    }
}

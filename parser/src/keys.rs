//! Key-notation tokenizer.
//!
//! Decodes the notation used in the index chars column (`<C-W>`, `2dw`,
//! `CTRL-V {char}`) into [`KeyCombination`]s. Every surface pattern of the
//! vocabulary is bound in a [`Trie`]; each word is consumed front to back by
//! longest-prefix match, and modifier keys fold into the key that follows.

use keyref_core::{ConfigError, Key, KeyCategory, KeyCombination, KeySpec, Modifier};
use thiserror::Error;
use tracing::debug;

use crate::trie::{DuplicateKey, Trie};

/// Notation the vocabulary cannot decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// No vocabulary pattern is a prefix of `remaining`.
    #[error("no key matches '{remaining}' in word '{word}'")]
    UnmatchedToken { word: String, remaining: String },
    /// The word ends with a modifier that has no key to apply to.
    #[error("modifier without a key in word '{word}'")]
    DanglingModifier { word: String },
}

/// Decodes key notation with a vocabulary trie.
#[derive(Debug, Clone)]
pub struct KeyTokenizer {
    trie: Trie<Key>,
}

impl KeyTokenizer {
    /// Builds the trie, binding every pattern of every entry.
    pub fn new(vocabulary: &[KeySpec]) -> Result<Self, DuplicateKey> {
        let mut trie = Trie::new();
        for spec in vocabulary {
            let key = spec.key();
            for pattern in &spec.patterns {
                trie.insert(pattern, key.clone())?;
            }
        }
        debug!(patterns = trie.len(), "Built key trie");
        Ok(Self { trie })
    }

    /// Builds a tokenizer, reporting duplicates as a configuration error.
    pub fn from_config(vocabulary: &[KeySpec]) -> Result<Self, ConfigError> {
        Self::new(vocabulary).map_err(|DuplicateKey(pattern)| ConfigError::DuplicatePattern(pattern))
    }

    /// Exact lookup of a single surface pattern.
    pub fn lookup(&self, pattern: &str) -> Option<&Key> {
        self.trie.get(pattern)
    }

    /// Decodes one line of notation.
    ///
    /// A line equal to a multiword phrase decodes to that phrase alone.
    /// Otherwise each space-separated word is split into keys independently.
    pub fn tokenize(&self, line: &str) -> Result<Vec<KeyCombination>, KeyError> {
        if let Some(key) = self.trie.get(line) {
            if key.category == KeyCategory::Multiword {
                return Ok(vec![KeyCombination::new(key.clone())]);
            }
        }

        let mut combos = Vec::new();
        for word in line.split(' ') {
            let keys = self.split_word(word)?;
            fold_modifiers(word, keys, &mut combos)?;
        }
        Ok(combos)
    }

    /// Splits one word into vocabulary keys, front to back.
    fn split_word(&self, word: &str) -> Result<Vec<&Key>, KeyError> {
        let mut keys = Vec::new();
        let mut rest = word.to_string();

        while !rest.is_empty() {
            if rest.starts_with('<') {
                if let Some(close) = rest.find('>') {
                    rest = format!("{}{}", &rest[1..close], &rest[close + 1..]);
                }
            }

            match self.trie.get_longest_match(&rest) {
                (len, Some(key)) if len > 0 => {
                    debug!(word, matched = &rest[..len], key = %key.name, "Matched key");
                    keys.push(key);
                    rest.replace_range(..len, "");
                }
                _ => {
                    return Err(KeyError::UnmatchedToken {
                        word: word.to_string(),
                        remaining: rest,
                    });
                }
            }
        }

        Ok(keys)
    }
}

fn fold_modifiers(
    word: &str,
    keys: Vec<&Key>,
    out: &mut Vec<KeyCombination>,
) -> Result<(), KeyError> {
    let mut pending: Vec<Modifier> = Vec::new();
    for key in keys {
        if let Some(modifier) = key.category.modifier() {
            pending.push(modifier);
            continue;
        }
        let combo = pending
            .drain(..)
            .fold(KeyCombination::new(key.clone()), KeyCombination::with_modifier);
        out.push(combo);
    }

    if pending.is_empty() {
        Ok(())
    } else {
        Err(KeyError::DanglingModifier {
            word: word.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use keyref_core::default_vocabulary;

    use super::*;

    fn tokenizer() -> KeyTokenizer {
        KeyTokenizer::new(&default_vocabulary()).unwrap()
    }

    fn names(combos: &[KeyCombination]) -> Vec<String> {
        combos.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_bracketed_control_key() {
        let combos = tokenizer().tokenize("<C-W>").unwrap();
        assert_eq!(combos.len(), 1);
        assert!(combos[0].with_control);
        assert!(!combos[0].with_alt);
        assert_eq!(combos[0].key, Key::new("W", KeyCategory::Literal));
    }

    #[test]
    fn test_count_and_literals() {
        let combos = tokenizer().tokenize("2dw").unwrap();
        assert_eq!(names(&combos), vec!["2", "D", "W"]);
        assert!(combos.iter().all(|c| !c.has_modifiers()));
    }

    #[test]
    fn test_spelled_out_control_and_placeholder() {
        let combos = tokenizer().tokenize("CTRL-V {char}").unwrap();
        assert_eq!(names(&combos), vec!["Ctrl+V", "char"]);
        assert_eq!(combos[1].key.category, KeyCategory::Identifier);
    }

    #[test]
    fn test_modifiers_clear_after_each_key() {
        let combos = tokenizer().tokenize("CTRL-Wj").unwrap();
        assert_eq!(names(&combos), vec!["Ctrl+W", "J"]);
    }

    #[test]
    fn test_stacked_modifiers_apply_to_one_key() {
        let combos = tokenizer().tokenize("<S-C-Left>").unwrap();
        assert_eq!(names(&combos), vec!["Ctrl+Shift+Left"]);
    }

    #[test]
    fn test_named_keys_inside_brackets() {
        let combos = tokenizer().tokenize("<BS> <LeftMouse> <PageUp>").unwrap();
        assert_eq!(names(&combos), vec!["BS", "LeftMouse", "PageUp"]);
        assert!(combos.iter().all(|c| c.key.category == KeyCategory::Named));
    }

    #[test]
    fn test_lone_angle_bracket_is_literal() {
        let combos = tokenizer().tokenize("<").unwrap();
        assert_eq!(names(&combos), vec!["ANGLE_OPEN"]);

        let combos = tokenizer().tokenize("<<").unwrap();
        assert_eq!(names(&combos), vec!["ANGLE_OPEN", "ANGLE_OPEN"]);
    }

    #[test]
    fn test_regex_class_and_register_notation() {
        let combos = tokenizer().tokenize("\"{a-zA-Z0-9.%#:-\"}").unwrap();
        assert_eq!(names(&combos), vec!["DOUBLE_QUOTE", "re_mark"]);
        assert_eq!(combos[1].key.category, KeyCategory::Regex);
    }

    #[test]
    fn test_multiword_phrase_matches_whole_line() {
        let combos = tokenizer().tokenize("<Space> to '~'").unwrap();
        assert_eq!(names(&combos), vec!["SPACE_TO_TILDE"]);
        assert_eq!(combos[0].key.category, KeyCategory::Multiword);
    }

    #[test]
    fn test_unmatched_token_is_an_error() {
        let err = tokenizer().tokenize("d\u{e9}").unwrap_err();
        assert_eq!(
            err,
            KeyError::UnmatchedToken {
                word: "d\u{e9}".into(),
                remaining: "\u{e9}".into(),
            }
        );
    }

    #[test]
    fn test_empty_brackets_are_unmatched() {
        let err = tokenizer().tokenize("<>").unwrap_err();
        assert!(matches!(err, KeyError::UnmatchedToken { .. }));
    }

    #[test]
    fn test_trailing_modifier_is_an_error() {
        let err = tokenizer().tokenize("CTRL-").unwrap_err();
        assert_eq!(
            err,
            KeyError::DanglingModifier {
                word: "CTRL-".into()
            }
        );
    }

    #[test]
    fn test_tokenized_combinations_are_never_optional() {
        let tokenizer = tokenizer();
        for line in ["[count]x", "<C-W>", "CTRL-V {char}", "a - z"] {
            let combos = tokenizer.tokenize(line).unwrap();
            assert!(!combos.is_empty());
            assert!(combos.iter().all(|c| !c.is_optional), "optional key in {line}");
        }
    }

    #[test]
    fn test_doubled_space_yields_no_keys_for_empty_word() {
        let combos = tokenizer().tokenize("g  g").unwrap();
        assert_eq!(names(&combos), vec!["G", "G"]);
    }

    #[test]
    fn test_duplicate_vocabulary_pattern_fails() {
        let mut vocab = default_vocabulary();
        vocab.push(KeySpec::new("AGAIN", &["{count}"], KeyCategory::Identifier));
        let err = KeyTokenizer::new(&vocab).unwrap_err();
        assert_eq!(err, DuplicateKey("{count}".into()));

        let err = KeyTokenizer::from_config(&vocab).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicatePattern(p) if p == "{count}"));
    }

    #[test]
    fn test_rebuilding_is_deterministic() {
        let vocab = default_vocabulary();
        let first = KeyTokenizer::new(&vocab).unwrap();
        let second = KeyTokenizer::new(&vocab).unwrap();
        for spec in &vocab {
            for pattern in &spec.patterns {
                assert_eq!(first.lookup(pattern), second.lookup(pattern));
                assert_eq!(first.lookup(pattern), Some(&spec.key()));
            }
        }
    }
}

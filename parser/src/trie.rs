//! Prefix tree with longest-prefix lookup.

use std::collections::HashMap;

use thiserror::Error;

/// Returned when a key is inserted twice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("key '{0}' is already bound")]
pub struct DuplicateKey(pub String);

#[derive(Debug, Clone)]
struct TrieNode<V> {
    children: HashMap<char, TrieNode<V>>,
    value: Option<V>,
}

impl<V> TrieNode<V> {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            value: None,
        }
    }
}

/// Maps strings to values.
///
/// A node may carry a value and still have children, since some keys are
/// prefixes of others (`A` and `A-`, `Left` and `LeftMouse`).
#[derive(Debug, Clone)]
pub struct Trie<V> {
    root: TrieNode<V>,
    len: usize,
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trie<V> {
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
            len: 0,
        }
    }

    /// Binds `value` to `key`.
    ///
    /// Fails if `key` already has a value; the existing binding is kept.
    pub fn insert(&mut self, key: &str, value: V) -> Result<(), DuplicateKey> {
        let mut node = &mut self.root;
        for ch in key.chars() {
            node = node.children.entry(ch).or_insert_with(TrieNode::new);
        }
        if node.value.is_some() {
            return Err(DuplicateKey(key.to_string()));
        }
        node.value = Some(value);
        self.len += 1;
        Ok(())
    }

    /// Exact lookup.
    pub fn get(&self, key: &str) -> Option<&V> {
        let mut node = &self.root;
        for ch in key.chars() {
            node = node.children.get(&ch)?;
        }
        node.value.as_ref()
    }

    /// Finds the longest bound key that `needle` starts with.
    ///
    /// Returns the matched length in bytes and the bound value, or
    /// `(0, None)` when no prefix of `needle` is bound.
    pub fn get_longest_match(&self, needle: &str) -> (usize, Option<&V>) {
        let mut node = &self.root;
        let mut best = (0, None);
        for (idx, ch) in needle.char_indices() {
            match node.children.get(&ch) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(value) = node.value.as_ref() {
                best = (idx + ch.len_utf8(), Some(value));
            }
        }
        best
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

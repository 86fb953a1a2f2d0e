//! # Byte Prefix Trie

use crate::{
    alloc::{vec, vec::Vec},
    types::{PMHashMap, hash_map_new},
};

const ROOT: u32 = 0;

/// A prefix trie over byte strings.
///
/// Transitions live in one ``{ (node, byte) -> node }`` map, so a prefix
/// walk costs one hash probe per input byte, independent of the key count.
///
/// ## Style Hints
/// Instance names should prefer `trie`, or `${value}_trie`.
#[derive(Debug, Clone)]
pub struct ByteTrie<V> {
    transitions: PMHashMap<(u32, u8), u32>,
    values: Vec<Option<V>>,
    num_keys: usize,
    max_key_len: usize,
}

impl<V: Copy> Default for ByteTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Copy> ByteTrie<V> {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self {
            transitions: hash_map_new(),
            values: vec![None],
            num_keys: 0,
            max_key_len: 0,
        }
    }

    /// The number of keys in the trie.
    pub fn len(&self) -> usize {
        self.num_keys
    }

    /// Is the trie empty?
    pub fn is_empty(&self) -> bool {
        self.num_keys == 0
    }

    /// The length of the longest key, in bytes.
    pub fn max_key_len(&self) -> usize {
        self.max_key_len
    }

    /// Insert `key`, returning the previous value for it, if any.
    ///
    /// Empty keys are ignored; a prefix walk never reports a zero-length match.
    pub fn insert(
        &mut self,
        key: &[u8],
        value: V,
    ) -> Option<V> {
        if key.is_empty() {
            return None;
        }

        let mut node = ROOT;
        for &b in key {
            node = match self.transitions.get(&(node, b)) {
                Some(&next) => next,
                None => {
                    let next = self.values.len() as u32;
                    self.values.push(None);
                    self.transitions.insert((node, b), next);
                    next
                }
            };
        }

        let previous = self.values[node as usize].replace(value);
        if previous.is_none() {
            self.num_keys += 1;
            self.max_key_len = self.max_key_len.max(key.len());
        }
        previous
    }

    /// Exact lookup of `key`.
    pub fn get(
        &self,
        key: &[u8],
    ) -> Option<V> {
        let mut node = ROOT;
        for &b in key {
            node = *self.transitions.get(&(node, b))?;
        }
        if node == ROOT {
            return None;
        }
        self.values[node as usize]
    }

    /// Visit every key which is a prefix of `text`, shortest first.
    ///
    /// The visitor receives ``(value, key_len)``.
    #[inline]
    pub fn for_each_prefix<F>(
        &self,
        text: &[u8],
        mut visit: F,
    ) where
        F: FnMut(V, usize),
    {
        let mut node = ROOT;
        for (idx, &b) in text.iter().enumerate() {
            match self.transitions.get(&(node, b)) {
                Some(&next) => node = next,
                None => return,
            }
            if let Some(value) = self.values[node as usize] {
                visit(value, idx + 1);
            }
        }
    }

    /// Collect every key which is a prefix of `text`, longest first.
    pub fn common_prefix_search(
        &self,
        text: &[u8],
    ) -> Vec<(V, usize)> {
        let mut found = Vec::new();
        self.for_each_prefix(text, |value, len| found.push((value, len)));
        found.reverse();
        found
    }

    /// The longest key which is a prefix of `text`.
    pub fn longest_prefix(
        &self,
        text: &[u8],
    ) -> Option<(V, usize)> {
        let mut longest = None;
        self.for_each_prefix(text, |value, len| longest = Some((value, len)));
        longest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trie() -> ByteTrie<u32> {
        let mut trie = ByteTrie::new();
        for (idx, key) in ["a", "ab", "abc", "b", "bcd"].iter().enumerate() {
            trie.insert(key.as_bytes(), idx as u32);
        }
        trie
    }

    #[test]
    fn test_insert_and_get() {
        let mut trie = sample_trie();
        assert_eq!(trie.len(), 5);
        assert_eq!(trie.max_key_len(), 3);

        assert_eq!(trie.get(b"ab"), Some(1));
        assert_eq!(trie.get(b"bc"), None);
        assert_eq!(trie.get(b""), None);
        assert_eq!(trie.get(b"zzz"), None);

        assert_eq!(trie.insert(b"ab", 9), Some(1));
        assert_eq!(trie.len(), 5);
        assert_eq!(trie.get(b"ab"), Some(9));

        assert_eq!(trie.insert(b"", 7), None);
        assert_eq!(trie.len(), 5);
    }

    #[test]
    fn test_common_prefix_search() {
        let trie = sample_trie();

        assert_eq!(trie.common_prefix_search(b"abcd"), vec![(2, 3), (1, 2), (0, 1)]);
        assert_eq!(trie.common_prefix_search(b"bc"), vec![(3, 1)]);
        assert!(trie.common_prefix_search(b"xyz").is_empty());
        assert!(trie.common_prefix_search(b"").is_empty());

        assert_eq!(trie.longest_prefix(b"abx"), Some((1, 2)));
        assert_eq!(trie.longest_prefix(b"q"), None);
    }
}

//! # Piece Prefix Index

use crate::{alloc::vec::Vec, support::byte_trie::ByteTrie, types::TokenType};

/// A prefix index from piece text to piece id.
///
/// Built once per [`Vocabulary`](crate::vocab::Vocabulary); immutable after.
/// Lookups cost one hash probe per matched byte, independent of the
/// vocabulary size.
///
/// ## Style Hints
/// Instance names should prefer `index`, or `piece_index`.
#[derive(Debug, Clone)]
pub struct PieceTrie<T: TokenType> {
    trie: ByteTrie<T>,
}

impl<T: TokenType> Default for PieceTrie<T> {
    fn default() -> Self {
        Self {
            trie: ByteTrie::new(),
        }
    }
}

impl<T: TokenType> PieceTrie<T> {
    /// Build an index over ``(piece, id)`` pairs.
    pub fn from_pieces<'a, I>(pieces: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, T)>,
    {
        let mut index = Self::default();
        for (piece, id) in pieces {
            index.trie.insert(piece.as_bytes(), id);
        }
        index
    }

    /// The number of indexed pieces.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// Is the index empty?
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// The byte length of the longest indexed piece.
    pub fn max_piece_len(&self) -> usize {
        self.trie.max_key_len()
    }

    /// Exact lookup.
    pub fn get(
        &self,
        piece: &str,
    ) -> Option<T> {
        self.trie.get(piece.as_bytes())
    }

    /// Visit every piece which is a prefix of ``text[position..]``.
    ///
    /// Matches are visited shortest first as ``(id, byte_len)``; every
    /// reported length ends on a char boundary of `text`, since pieces are
    /// themselves valid UTF-8.
    #[inline]
    pub fn for_each_match<F>(
        &self,
        text: &str,
        position: usize,
        visit: F,
    ) where
        F: FnMut(T, usize),
    {
        if let Some(rest) = text.as_bytes().get(position..) {
            self.trie.for_each_prefix(rest, visit);
        }
    }

    /// Every piece which is a prefix of ``text[position..]``, longest first.
    ///
    /// ## Arguments
    /// * `text` - The normalized text.
    /// * `position` - A byte offset into `text`.
    ///
    /// ## Returns
    /// ``(id, byte_len)`` pairs; empty if `position` is past the end.
    pub fn match_at(
        &self,
        text: &str,
        position: usize,
    ) -> Vec<(T, usize)> {
        match text.as_bytes().get(position..) {
            Some(rest) => self.trie.common_prefix_search(rest),
            None => Vec::new(),
        }
    }
}

//! # Encoded Tokens

use core::ops::Range;

use crate::{alloc::string::String, types::TokenType};

/// A piece id, aligned to the source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token<T: TokenType> {
    /// The piece id.
    pub id: T,

    /// The source (pre-normalization) byte range.
    ///
    /// Empty for control ids, and for all but the last byte-fallback
    /// token of a run.
    pub range: Range<usize>,

    /// The source text covered by `range`.
    pub surface: String,
}

impl<T: TokenType> Token<T> {
    /// Create a token.
    pub fn new<S: Into<String>>(
        id: T,
        range: Range<usize>,
        surface: S,
    ) -> Self {
        Self {
            id,
            range,
            surface: surface.into(),
        }
    }
}

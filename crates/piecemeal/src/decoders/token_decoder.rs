//! # Token Decoder Trait

use crate::{
    alloc::{string::String, vec::Vec},
    errors::PMResult,
    types::TokenType,
};

/// Trait for token decoders.
///
/// Decoding is all-or-nothing: every id is validated before any text is
/// produced.
pub trait TokenDecoder<T: TokenType>: Send + Sync {
    /// Decode piece ids into text.
    ///
    /// ## Arguments
    /// * `ids` - A slice of piece ids to decode.
    ///
    /// ## Returns
    /// The text; or [`PMError::InvalidTokenId`](crate::PMError::InvalidTokenId)
    /// if any id is out of range.
    fn try_decode(
        &self,
        ids: &[T],
    ) -> PMResult<String>;

    /// Decode piece strings into text.
    ///
    /// Strings which are not pieces of the vocabulary decode as text.
    fn try_decode_pieces(
        &self,
        pieces: &[&str],
    ) -> PMResult<String>;

    /// Decode a batch of id sequences.
    ///
    /// ## Arguments
    /// * `batch` - A batch of id slices.
    ///
    /// ## Returns
    /// The decoded texts, or the first error.
    fn try_decode_batch(
        &self,
        batch: &[&[T]],
    ) -> PMResult<Vec<String>> {
        batch.iter().map(|ids| self.try_decode(ids)).collect()
    }
}

//! # Token Encoder Trait

use core::ops::Range;

use crate::{
    alloc::{
        string::{String, ToString},
        sync::Arc,
        vec::Vec,
    },
    encoders::Token,
    errors::PMResult,
    types::TokenType,
    vocab::Vocabulary,
};

/// The expected normalized bytes per emitted piece, for buffer sizing.
pub const EXPECTED_BYTES_PER_PIECE: usize = 3;

/// A visitor over encoded pieces.
///
/// Receives ``(id, piece, source_range)`` where `piece` is the piece text,
/// or the normalized text of an unknown run.
pub type PieceVisitor<'a, T> = dyn FnMut(T, &str, Range<usize>) + 'a;

/// A trait for token encoders.
pub trait TokenEncoder<T: TokenType>: Send + Sync {
    /// Return the attached vocabulary.
    fn vocab(&self) -> &Arc<Vocabulary<T>>;

    /// Encode text, visiting each emitted piece in order.
    ///
    /// ## Arguments
    /// * `text` - The source text.
    /// * `visit` - The piece visitor.
    fn try_encode_visit(
        &self,
        text: &str,
        visit: &mut PieceVisitor<'_, T>,
    ) -> PMResult<()>;

    /// Encode text, appending ids to a target buffer.
    ///
    /// ## Arguments
    /// * `text` - The source text.
    /// * `ids` - The target id buffer to append to.
    fn try_encode_append(
        &self,
        text: &str,
        ids: &mut Vec<T>,
    ) -> PMResult<()> {
        self.try_encode_visit(text, &mut |id, _, _| ids.push(id))
    }

    /// Encode text into piece ids.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    ///
    /// ## Returns
    /// The ids; empty for empty text.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    fn try_encode(
        &self,
        text: &str,
    ) -> PMResult<Vec<T>> {
        let mut ids = Vec::with_capacity(text.len() / EXPECTED_BYTES_PER_PIECE + 2);
        self.try_encode_append(text, &mut ids)?;
        Ok(ids)
    }

    /// Validate bytes as UTF-8, and encode them.
    ///
    /// ## Returns
    /// The ids; or [`PMError::InvalidEncoding`](crate::PMError::InvalidEncoding),
    /// with no partial output.
    fn try_encode_bytes(
        &self,
        bytes: &[u8],
    ) -> PMResult<Vec<T>> {
        self.try_encode(core::str::from_utf8(bytes)?)
    }

    /// Encode text into [`Token`]s aligned to the source text.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    ///
    /// ## Returns
    /// The tokens, with source ranges and surfaces.
    fn try_encode_tokens(
        &self,
        text: &str,
    ) -> PMResult<Vec<Token<T>>> {
        let mut tokens = Vec::with_capacity(text.len() / EXPECTED_BYTES_PER_PIECE + 2);
        self.try_encode_visit(text, &mut |id, _, range: Range<usize>| {
            let surface = text.get(range.clone()).unwrap_or_default();
            tokens.push(Token::new(id, range, surface));
        })?;
        Ok(tokens)
    }

    /// Encode text into piece strings.
    ///
    /// Unknown runs yield their normalized text.
    fn try_tokenize(
        &self,
        text: &str,
    ) -> PMResult<Vec<String>> {
        let mut pieces = Vec::with_capacity(text.len() / EXPECTED_BYTES_PER_PIECE + 2);
        self.try_encode_visit(text, &mut |_, piece, _| pieces.push(piece.to_string()))?;
        Ok(pieces)
    }

    /// Encode a batch of text into piece ids.
    ///
    /// ## Arguments
    /// * `batch` - A slice of strings to encode.
    ///
    /// ## Returns
    /// A `Result` containing the vector of id vectors, or the first error.
    fn try_encode_batch(
        &self,
        batch: &[&str],
    ) -> PMResult<Vec<Vec<T>>> {
        batch.iter().map(|text| self.try_encode(text)).collect()
    }

    /// Encode a batch of text into piece strings.
    fn try_tokenize_batch(
        &self,
        batch: &[&str],
    ) -> PMResult<Vec<Vec<String>>> {
        batch.iter().map(|text| self.try_tokenize(text)).collect()
    }
}

//! # Piece Decoder

use crate::{
    alloc::{string::String, sync::Arc, vec::Vec},
    decoders::TokenDecoder,
    errors::{PMError, PMResult},
    support::strings::{SPACE_SYMBOL, push_unescaped, push_utf8_lossy},
    types::TokenType,
    vocab::{PieceType, Vocabulary},
};

/// The standard [`TokenDecoder`].
///
/// * control pieces decode to nothing;
/// * the unknown piece decodes to the model's unknown surface;
/// * runs of byte pieces decode as (lossy) UTF-8;
/// * ``▁`` decodes to ``' '``; the dummy space is dropped from the first
///   text piece (or the last, with whitespace-as-suffix);
/// * the denormalizer, if any, is applied to the result.
///
/// ## Style Hints
/// Instance names should prefer `decoder`.
#[derive(Debug, Clone)]
pub struct PieceDecoder<T: TokenType> {
    vocab: Arc<Vocabulary<T>>,
}

/// One piece to decode: ``(kind, byte, text)``; `kind` is `None` for text
/// outside the vocabulary.
type DecodePart<'a> = (Option<PieceType>, Option<u8>, &'a str);

impl<T: TokenType> PieceDecoder<T> {
    /// Create a decoder.
    pub fn new(vocab: Arc<Vocabulary<T>>) -> Self {
        Self { vocab }
    }

    /// The attached vocabulary.
    pub fn vocab(&self) -> &Arc<Vocabulary<T>> {
        &self.vocab
    }

    fn part_for_id(
        &self,
        id: T,
    ) -> Option<DecodePart<'_>> {
        let piece = self.vocab.piece(id)?;
        let byte = self
            .vocab
            .byte_pieces()
            .and_then(|bytes| bytes.get_byte(id));
        Some((Some(piece.kind()), byte, piece.text()))
    }

    fn decode_parts(
        &self,
        parts: &[DecodePart<'_>],
    ) -> String {
        let normalizer = self.vocab.normalizer();
        let strip = normalizer.strips_dummy_space();
        let suffix = normalizer.treat_whitespace_as_suffix();

        let last_text = parts
            .iter()
            .rposition(|&(kind, _, _)| kind != Some(PieceType::Control));

        let mut out = String::new();
        let mut bytes: Vec<u8> = Vec::new();
        let mut at_start = true;

        for (idx, &(kind, byte, text)) in parts.iter().enumerate() {
            if kind == Some(PieceType::Control) {
                continue;
            }
            if let Some(byte) = byte {
                bytes.push(byte);
                at_start = false;
                continue;
            }
            if !bytes.is_empty() {
                push_utf8_lossy(&mut out, &bytes);
                bytes.clear();
            }

            if kind == Some(PieceType::Unknown) {
                out.push_str(self.vocab.unk_surface());
                at_start = false;
                continue;
            }

            let mut text = text;
            if strip {
                if suffix {
                    if Some(idx) == last_text {
                        text = text.strip_suffix(SPACE_SYMBOL).unwrap_or(text);
                    }
                } else if at_start {
                    text = text.strip_prefix(SPACE_SYMBOL).unwrap_or(text);
                }
            }
            push_unescaped(&mut out, text);
            at_start = false;
        }
        if !bytes.is_empty() {
            push_utf8_lossy(&mut out, &bytes);
        }

        match self.vocab.denormalizer() {
            Some(rules) => rules.apply(&out),
            None => out,
        }
    }
}

impl<T: TokenType> TokenDecoder<T> for PieceDecoder<T> {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, ids)))]
    fn try_decode(
        &self,
        ids: &[T],
    ) -> PMResult<String> {
        let parts = ids
            .iter()
            .map(|&id| {
                self.part_for_id(id).ok_or_else(|| PMError::InvalidTokenId {
                    id: id.to_usize().unwrap_or(usize::MAX),
                    vocab_size: self.vocab.len(),
                })
            })
            .collect::<PMResult<Vec<_>>>()?;
        Ok(self.decode_parts(&parts))
    }

    fn try_decode_pieces(
        &self,
        pieces: &[&str],
    ) -> PMResult<String> {
        let parts: Vec<DecodePart<'_>> = pieces
            .iter()
            .map(|&piece| match self.vocab.piece_to_id(piece) {
                Some(id) => self.part_for_id(id).unwrap_or((None, None, piece)),
                None => (None, None, piece),
            })
            .collect();
        Ok(self.decode_parts(&parts))
    }
}

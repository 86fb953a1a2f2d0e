//! # Tokenizer

use crate::{
    alloc::{string::String, sync::Arc, vec::Vec},
    decoders::TokenDecoder,
    encoders::{PieceVisitor, TokenEncoder},
    errors::PMResult,
    types::TokenType,
    vocab::Vocabulary,
};

/// Unified Tokenizer.
///
/// Combines:
///  * [`Vocabulary`],
///  * [`TokenEncoder`], and
///  * [`TokenDecoder`] wrappers.
///
/// ## Style Hints
/// Instance names should prefer `tokenizer`.
#[derive(Clone)]
pub struct Tokenizer<T: TokenType> {
    vocab: Arc<Vocabulary<T>>,
    encoder: Arc<dyn TokenEncoder<T>>,
    decoder: Arc<dyn TokenDecoder<T>>,
}

impl<T: TokenType> core::fmt::Debug for Tokenizer<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("model_type", &self.vocab.model_type())
            .field("vocab_size", &self.vocab.len())
            .finish()
    }
}

impl<T: TokenType> Tokenizer<T> {
    /// Create a new tokenizer.
    pub fn new(
        vocab: Arc<Vocabulary<T>>,
        encoder: Arc<dyn TokenEncoder<T>>,
        decoder: Arc<dyn TokenDecoder<T>>,
    ) -> Self {
        Self {
            vocab,
            encoder,
            decoder,
        }
    }

    /// Get the underlying vocabulary.
    pub fn vocab(&self) -> &Arc<Vocabulary<T>> {
        &self.vocab
    }

    /// Get the underlying encoder.
    pub fn encoder(&self) -> &Arc<dyn TokenEncoder<T>> {
        &self.encoder
    }

    /// Get the underlying decoder.
    pub fn decoder(&self) -> &Arc<dyn TokenDecoder<T>> {
        &self.decoder
    }

    /// Normalize text to the form decoding reproduces.
    pub fn normalize_text(
        &self,
        text: &str,
    ) -> String {
        self.vocab.normalizer().normalize_text(text)
    }
}

impl<T: TokenType> TokenEncoder<T> for Tokenizer<T> {
    fn vocab(&self) -> &Arc<Vocabulary<T>> {
        &self.vocab
    }

    fn try_encode_visit(
        &self,
        text: &str,
        visit: &mut PieceVisitor<'_, T>,
    ) -> PMResult<()> {
        self.encoder.try_encode_visit(text, visit)
    }

    fn try_encode(
        &self,
        text: &str,
    ) -> PMResult<Vec<T>> {
        self.encoder.try_encode(text)
    }

    fn try_encode_batch(
        &self,
        batch: &[&str],
    ) -> PMResult<Vec<Vec<T>>> {
        self.encoder.try_encode_batch(batch)
    }

    fn try_tokenize_batch(
        &self,
        batch: &[&str],
    ) -> PMResult<Vec<Vec<String>>> {
        self.encoder.try_tokenize_batch(batch)
    }
}

impl<T: TokenType> TokenDecoder<T> for Tokenizer<T> {
    fn try_decode(
        &self,
        ids: &[T],
    ) -> PMResult<String> {
        self.decoder.try_decode(ids)
    }

    fn try_decode_pieces(
        &self,
        pieces: &[&str],
    ) -> PMResult<String> {
        self.decoder.try_decode_pieces(pieces)
    }

    fn try_decode_batch(
        &self,
        batch: &[&[T]],
    ) -> PMResult<Vec<String>> {
        self.decoder.try_decode_batch(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        TokenizerOptions,
        alloc::vec,
        decoders::testing::common_decoder_tests,
        encoders::testing::{common_encoder_test_vocab, common_encoder_tests},
    };

    #[test]
    fn test_tokenizer() {
        type T = u32;
        let vocab: Arc<Vocabulary<T>> = common_encoder_test_vocab::<T>().into();
        let tokenizer = TokenizerOptions::default().build(vocab.clone());

        common_encoder_tests(vocab.clone(), tokenizer.as_ref());
        common_decoder_tests(vocab.clone(), tokenizer.as_ref());

        let text = "How are you?";
        let ids = tokenizer.try_encode(text).unwrap();
        assert_eq!(tokenizer.try_decode(&ids).unwrap(), tokenizer.normalize_text(text));

        let pieces = tokenizer.try_tokenize(text).unwrap();
        let pieces: Vec<&str> = pieces.iter().map(String::as_str).collect();
        assert_eq!(pieces, vec!["\u{2581}How", "\u{2581}are", "\u{2581}you", "?"]);
        assert_eq!(tokenizer.try_decode_pieces(&pieces).unwrap(), text);
    }
}

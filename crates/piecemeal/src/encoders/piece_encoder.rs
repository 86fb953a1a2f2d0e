//! # Piece Encoder

use crate::{
    alloc::sync::Arc,
    encoders::{PieceVisitor, TokenEncoder},
    errors::{PMError, PMResult},
    segmenters::{SegmenterSelector, Segmenter},
    types::TokenType,
    vocab::Vocabulary,
};

/// The standard [`TokenEncoder`]: normalize, segment, then map segments
/// to piece ids.
///
/// Unknown runs become the unknown id; or, with byte fallback, one
/// ``<0xXX>`` id per normalized byte, where only the last byte token
/// carries the run's source range.
///
/// ## Style Hints
/// Instance names should prefer `encoder`.
#[derive(Clone)]
pub struct PieceEncoder<T: TokenType> {
    vocab: Arc<Vocabulary<T>>,
    segmenter: Arc<dyn Segmenter<T>>,
    add_bos: bool,
    add_eos: bool,
}

impl<T: TokenType> core::fmt::Debug for PieceEncoder<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("PieceEncoder")
            .field("model_type", &self.vocab.model_type())
            .field("add_bos", &self.add_bos)
            .field("add_eos", &self.add_eos)
            .finish()
    }
}

impl<T: TokenType> PieceEncoder<T> {
    /// Create an encoder using the vocabulary's own model type.
    pub fn new(vocab: Arc<Vocabulary<T>>) -> Self {
        let selector = SegmenterSelector::from(vocab.model_type());
        Self::new_with_selector(vocab, selector)
    }

    /// Create an encoder with an explicit [`SegmenterSelector`].
    pub fn new_with_selector(
        vocab: Arc<Vocabulary<T>>,
        selector: SegmenterSelector,
    ) -> Self {
        Self {
            vocab,
            segmenter: selector.build(),
            add_bos: false,
            add_eos: false,
        }
    }

    /// Insert the ``bos`` id before the text's ids.
    ///
    /// Has no effect when the vocabulary has no ``bos`` piece.
    pub fn with_add_bos(
        mut self,
        add_bos: bool,
    ) -> Self {
        self.add_bos = add_bos;
        self
    }

    /// Append the ``eos`` id after the text's ids.
    ///
    /// Has no effect when the vocabulary has no ``eos`` piece.
    pub fn with_add_eos(
        mut self,
        add_eos: bool,
    ) -> Self {
        self.add_eos = add_eos;
        self
    }

    fn visit_control(
        &self,
        id: Option<T>,
        position: usize,
        visit: &mut PieceVisitor<'_, T>,
    ) {
        if let Some(id) = id
            && let Some(piece) = self.vocab.id_to_piece(id)
        {
            visit(id, piece, position..position);
        }
    }
}

impl<T: TokenType> TokenEncoder<T> for PieceEncoder<T> {
    fn vocab(&self) -> &Arc<Vocabulary<T>> {
        &self.vocab
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text, visit)))]
    fn try_encode_visit(
        &self,
        text: &str,
        visit: &mut PieceVisitor<'_, T>,
    ) -> PMResult<()> {
        let vocab = self.vocab.as_ref();
        let normalized = vocab.normalizer().normalize(text);
        let segments = self.segmenter.segment(vocab, &normalized.text)?;

        if self.add_bos {
            self.visit_control(vocab.bos_id(), 0, visit);
        }

        for segment in segments {
            let range = segment.range.clone();
            let source = normalized.source_range(range.start, range.end);
            let surface = &normalized.text[range];

            if let Some(id) = segment.piece {
                let piece = vocab.id_to_piece(id).unwrap_or(surface);
                visit(id, piece, source);
                continue;
            }

            match vocab.byte_pieces() {
                Some(byte_pieces) => {
                    let bytes = surface.as_bytes();
                    for (idx, &byte) in bytes.iter().enumerate() {
                        let id = byte_pieces.get_token(byte);
                        let piece = vocab.id_to_piece(id).unwrap_or_default();
                        if idx + 1 == bytes.len() {
                            visit(id, piece, source.clone());
                        } else {
                            visit(id, piece, source.start..source.start);
                        }
                    }
                }
                None => {
                    let unk = vocab
                        .unk_id()
                        .ok_or_else(|| PMError::malformed("model has no unknown piece"))?;
                    visit(unk, surface, source);
                }
            }
        }

        if self.add_eos {
            self.visit_control(vocab.eos_id(), text.len(), visit);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alloc::{vec, vec::Vec},
        encoders::{
            Token,
            testing::{common_encoder_test_vocab, common_encoder_tests},
        },
        vocab::utility::testing::{build_test_vocab, byte_fallback_model, hello_model},
    };

    fn test_encoder<T: TokenType>() {
        let vocab: Arc<Vocabulary<T>> = common_encoder_test_vocab::<T>().into();
        let encoder = PieceEncoder::new(vocab.clone());
        common_encoder_tests(vocab, &encoder);
    }

    #[test]
    fn test_encoder_u16() {
        test_encoder::<u16>();
    }

    #[test]
    fn test_encoder_u32() {
        test_encoder::<u32>();
    }

    #[test]
    fn test_hello_you() {
        type T = u32;
        let vocab: Arc<Vocabulary<T>> = Arc::new(build_test_vocab(&hello_model()));
        let encoder = PieceEncoder::new(vocab.clone());

        assert_eq!(
            encoder.try_tokenize("Hello you!").unwrap(),
            vec!["\u{2581}Hello", "\u{2581}you", "!"]
        );

        let tokens = encoder.try_encode_tokens("Hello you!").unwrap();
        let surfaces: Vec<&str> = tokens.iter().map(|t| t.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["Hello", " you", "!"]);
        assert_eq!(tokens[1].range, 5..9);
    }

    #[test]
    fn test_unknown_run() {
        type T = u32;
        let vocab: Arc<Vocabulary<T>> = Arc::new(build_test_vocab(&hello_model()));
        let encoder = PieceEncoder::new(vocab.clone());
        let unk = vocab.unk_id().unwrap();

        let text = "you \u{0aa7}\u{0aa8}";
        let tokens = encoder.try_encode_tokens(text).unwrap();
        assert_eq!(
            tokens.last().unwrap(),
            &Token::new(unk, 4..10, "\u{0aa7}\u{0aa8}")
        );
        assert_eq!(
            encoder.try_tokenize(text).unwrap(),
            vec!["\u{2581}you", "\u{2581}", "\u{0aa7}\u{0aa8}"]
        );
    }

    #[test]
    fn test_byte_fallback() {
        type T = u32;
        let vocab: Arc<Vocabulary<T>> = Arc::new(build_test_vocab(&byte_fallback_model()));
        let encoder = PieceEncoder::new(vocab.clone());

        assert_eq!(
            encoder.try_tokenize("\u{0aa7}").unwrap(),
            vec!["\u{2581}", "<0xE0>", "<0xAB>", "<0xA7>"]
        );

        let tokens = encoder.try_encode_tokens("\u{0aa7}").unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1].range, 0..0);
        assert_eq!(tokens[1].surface, "");
        assert_eq!(tokens[3].range, 0..3);
        assert_eq!(tokens[3].surface, "\u{0aa7}");
    }

    #[test]
    fn test_add_bos_eos() {
        type T = u32;
        let vocab: Arc<Vocabulary<T>> = Arc::new(build_test_vocab(&hello_model()));
        let encoder = PieceEncoder::new(vocab.clone())
            .with_add_bos(true)
            .with_add_eos(true);

        let ids = encoder.try_encode("you").unwrap();
        assert_eq!(ids.first().copied(), vocab.bos_id());
        assert_eq!(ids.last().copied(), vocab.eos_id());
        assert_eq!(ids.len(), 3);

        let tokens = encoder.try_encode_tokens("you").unwrap();
        assert_eq!(tokens[2].range, 3..3);
    }

    #[test]
    fn test_invalid_bytes() {
        type T = u32;
        let vocab: Arc<Vocabulary<T>> = Arc::new(build_test_vocab(&hello_model()));
        let encoder = PieceEncoder::new(vocab);

        let err = encoder.try_encode_bytes(b"ab\xffcd").unwrap_err();
        assert!(matches!(err, PMError::InvalidEncoding { valid_up_to: 2 }));
        assert_eq!(encoder.try_encode_bytes(b"").unwrap(), Vec::<T>::new());
    }
}

//! # Vocab Testing Tools
//!
//! Small synthetic models, built in memory.

use crate::{
    alloc::{string::ToString, vec, vec::Vec},
    types::TokenType,
    vocab::{
        ModelType,
        PieceType,
        Vocabulary,
        byte_piece_name,
        io::{ModelProto, NormalizerSpec, PieceProto, TrainerSpec},
    },
};

/// The ASCII chars covered by single-char pieces in the test models.
///
/// ``!`` is not included; each model gives it its own score.
pub const TEST_CHARS: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789.,?'-";

/// Build a model with the given type and pieces.
///
/// ``<unk>``, ``<s>`` and ``</s>`` are prepended as ids 0, 1, 2.
pub fn build_test_model(
    model_type: ModelType,
    pieces: &[(&str, f32, PieceType)],
) -> ModelProto {
    let mut records = vec![
        PieceProto::new("<unk>", 0.0, PieceType::Unknown),
        PieceProto::new("<s>", 0.0, PieceType::Control),
        PieceProto::new("</s>", 0.0, PieceType::Control),
    ];
    records.extend(
        pieces
            .iter()
            .map(|&(piece, score, kind)| PieceProto::new(piece, score, kind)),
    );

    ModelProto {
        pieces: records,
        trainer_spec: TrainerSpec {
            model_type,
            ..Default::default()
        },
        normalizer_spec: NormalizerSpec {
            name: "identity".to_string(),
            ..Default::default()
        },
        denormalizer_spec: None,
    }
}

/// A unigram model over a few English words, plus every [`TEST_CHARS`] char.
pub fn hello_model() -> ModelProto {
    let mut pieces: Vec<(&str, f32, PieceType)> = vec![
        ("\u{2581}Hello", -1.0, PieceType::Normal),
        ("\u{2581}How", -1.2, PieceType::Normal),
        ("\u{2581}are", -0.9, PieceType::Normal),
        ("\u{2581}you", -1.1, PieceType::Normal),
        ("!", -0.3, PieceType::Normal),
        ("\u{2581}", -2.0, PieceType::Normal),
        ("\u{2581}He", -3.0, PieceType::Normal),
        ("llo", -3.5, PieceType::Normal),
        ("\u{2581}wor", -4.0, PieceType::Normal),
        ("ld", -3.0, PieceType::Normal),
        ("\u{2581}world", -2.5, PieceType::Normal),
    ];
    pieces.extend(
        TEST_CHARS
            .char_indices()
            .map(|(idx, c)| (&TEST_CHARS[idx..idx + c.len_utf8()], -8.0, PieceType::Normal)),
    );
    build_test_model(ModelType::Unigram, &pieces)
}

/// [`hello_model`], with all 256 byte pieces and byte fallback enabled.
pub fn byte_fallback_model() -> ModelProto {
    let mut model = hello_model();
    model.trainer_spec.byte_fallback = true;
    let bytes = (0..=255_u8).map(|b| PieceProto::new(byte_piece_name(b), 0.0, PieceType::Byte));
    model.pieces.splice(3..3, bytes);
    model
}

/// A BPE model whose merges build ``▁hello`` and ``▁world``.
///
/// Merge priority is the piece score; higher merges first.
pub fn bpe_model() -> ModelProto {
    let mut pieces: Vec<(&str, f32, PieceType)> = vec![
        ("ll", -1.0, PieceType::Normal),
        ("\u{2581}h", -2.0, PieceType::Normal),
        ("\u{2581}he", -3.0, PieceType::Normal),
        ("llo", -4.0, PieceType::Normal),
        ("\u{2581}hello", -5.0, PieceType::Normal),
        ("or", -6.0, PieceType::Normal),
        ("\u{2581}w", -7.0, PieceType::Normal),
        ("\u{2581}wor", -8.0, PieceType::Normal),
        ("ld", -9.0, PieceType::Normal),
        ("\u{2581}world", -10.0, PieceType::Normal),
        ("aa", -11.0, PieceType::Normal),
        ("\u{2581}", -100.0, PieceType::Normal),
        ("!", -100.0, PieceType::Normal),
    ];
    pieces.extend(
        TEST_CHARS
            .char_indices()
            .map(|(idx, c)| (&TEST_CHARS[idx..idx + c.len_utf8()], -100.0, PieceType::Normal)),
    );
    build_test_model(ModelType::Bpe, &pieces)
}

/// Build a [`Vocabulary`] from a test model.
///
/// ## Panics
/// If the model does not validate.
pub fn build_test_vocab<T: TokenType>(model: &ModelProto) -> Vocabulary<T> {
    Vocabulary::from_proto(model).unwrap()
}

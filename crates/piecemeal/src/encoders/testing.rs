//! # Encoder Test Utilities

use crate::{
    alloc::{string::String, sync::Arc, vec, vec::Vec},
    decoders::{PieceDecoder, TokenDecoder},
    encoders::TokenEncoder,
    support::traits::static_is_send_sync_check,
    types::TokenType,
    vocab::{
        Vocabulary,
        utility::testing::{build_test_vocab, byte_fallback_model},
    },
};

/// Build common test vocabulary for [`TokenEncoder`] tests.
///
/// A unigram model with byte fallback; so every input is coverable.
pub fn common_encoder_test_vocab<T: TokenType>() -> Vocabulary<T> {
    build_test_vocab(&byte_fallback_model())
}

/// Common [`TokenEncoder`] tests.
pub fn common_encoder_tests<T: TokenType, E: TokenEncoder<T>>(
    vocab: Arc<Vocabulary<T>>,
    encoder: &E,
) {
    static_is_send_sync_check(encoder);

    let samples = vec![
        "Hello you!",
        "How are you?",
        "  hello   world  ",
        "caf\u{00e9} \u{0aa7}\u{0aa8}",
    ];

    let decoder = PieceDecoder::new(vocab.clone());

    let batch = encoder.try_encode_batch(&samples).unwrap();
    assert_eq!(batch.len(), samples.len());
    for (sample, ids) in samples.iter().zip(batch.iter()) {
        assert_eq!(&encoder.try_encode(sample).unwrap(), ids);
        assert_eq!(
            decoder.try_decode(ids).unwrap(),
            vocab.normalizer().normalize_text(sample)
        );
    }

    let pieces = encoder.try_tokenize_batch(&samples).unwrap();
    for (ids, pieces) in batch.iter().zip(pieces.iter()) {
        let expected: Vec<String> = ids
            .iter()
            .map(|&id| vocab.id_to_piece(id).unwrap().into())
            .collect();
        assert_eq!(pieces, &expected);
    }

    assert!(encoder.try_encode("").unwrap().is_empty());
    assert!(encoder.try_tokenize("").unwrap().is_empty());
}

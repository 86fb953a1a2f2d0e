//! # Decoder Test Utilities

use crate::{
    alloc::{sync::Arc, vec, vec::Vec},
    decoders::TokenDecoder,
    errors::ErrorKind,
    support::traits::static_is_send_sync_check,
    types::TokenType,
    vocab::Vocabulary,
};

/// Common [`TokenDecoder`] tests.
///
/// `vocab` must contain the pieces of
/// [`hello_model`](crate::vocab::utility::testing::hello_model).
pub fn common_decoder_tests<T: TokenType, D: TokenDecoder<T>>(
    vocab: Arc<Vocabulary<T>>,
    decoder: &D,
) {
    static_is_send_sync_check(decoder);

    let id = |piece: &str| vocab.piece_to_id(piece).unwrap();

    let samples: Vec<(Vec<T>, &str)> = vec![
        (vec![], ""),
        (
            vec![id("\u{2581}Hello"), id("\u{2581}you"), id("!")],
            "Hello you!",
        ),
        (
            vec![id("<s>"), id("\u{2581}How"), id("\u{2581}are"), id("</s>")],
            "How are",
        ),
        (vec![id("\u{2581}He"), id("llo")], "Hello"),
    ];

    let batch: Vec<&[T]> = samples.iter().map(|(ids, _)| ids.as_slice()).collect();
    let decoded = decoder.try_decode_batch(&batch).unwrap();
    for ((ids, expected), text) in samples.iter().zip(decoded.iter()) {
        assert_eq!(text, expected);
        assert_eq!(&decoder.try_decode(ids).unwrap(), expected);
    }

    let out_of_range = T::from_usize(vocab.len()).unwrap();
    let good = vec![id("!")];
    let bad = vec![id("!"), out_of_range];
    let err = decoder
        .try_decode_batch(&[good.as_slice(), bad.as_slice()])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTokenId);
}

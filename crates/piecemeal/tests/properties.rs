#![allow(missing_docs)]

mod common;

use std::collections::BTreeMap;

use common::{hello_model, load, model};
use piecemeal::{
    ErrorKind,
    ModelType,
    PieceType,
    TokenDecoder,
    TokenEncoder,
    TokenizerOptions,
    Vocabulary,
    load_model_bytes,
    segmenters::{SegmentationLattice, Segmenter, UnigramSegmenter},
};
use proptest::prelude::*;

type T = u32;

/// Score of every full segmentation of `text` into vocabulary pieces.
fn all_segmentation_scores(
    pieces: &BTreeMap<String, f32>,
    text: &str,
) -> Vec<f32> {
    fn walk(
        pieces: &BTreeMap<String, f32>,
        rest: &str,
        acc: f32,
        out: &mut Vec<f32>,
    ) {
        if rest.is_empty() {
            out.push(acc);
            return;
        }
        for end in 1..=rest.len() {
            if let Some(&score) = pieces.get(&rest[..end]) {
                walk(pieces, &rest[end..], acc + score, out);
            }
        }
    }

    let mut out = Vec::new();
    walk(pieces, text, 0.0, &mut out);
    out
}

fn abc_vocab(extra: &BTreeMap<String, f32>) -> (Vocabulary<T>, BTreeMap<String, f32>) {
    let mut pieces: BTreeMap<String, f32> = extra.clone();
    for c in ["a", "b", "c"] {
        pieces.insert(c.to_string(), -5.0);
    }
    let records: Vec<(&str, f32, PieceType)> = pieces
        .iter()
        .map(|(piece, &score)| (piece.as_str(), score, PieceType::Normal))
        .collect();
    let proto = model(ModelType::Unigram, &records);
    (Vocabulary::from_proto(&proto).unwrap(), pieces)
}

fn push_varint(
    out: &mut Vec<u8>,
    mut value: u64,
) {
    while value >= 0x80 {
        out.push((value as u8) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// The serialized hello model; and the byte length of its first record.
///
/// Each record is ``0x0a``, a one-byte length, and the payload.
fn hello_bytes() -> (Vec<u8>, usize) {
    let bytes = hello_model(false).to_bytes();
    assert_eq!(bytes[0], 0x0a);
    assert!(bytes[1] < 0x80);
    let record_len = 2 + bytes[1] as usize;
    (bytes, record_len)
}

proptest! {
    #[test]
    fn test_unigram_path_is_optimal(
        extra in prop::collection::btree_map("[abc]{2,4}", (-40i32..0).prop_map(|q| q as f32 / 4.0), 0..20),
        text in "[abc]{1,10}",
    ) {
        let (vocab, pieces) = abc_vocab(&extra);
        let segments = UnigramSegmenter.segment(&vocab, &text).unwrap();

        let mut covered = 0;
        let mut score = 0.0_f32;
        for segment in &segments {
            prop_assert_eq!(segment.range.start, covered);
            covered = segment.range.end;
            let id = segment.piece.unwrap();
            let piece = vocab.piece(id).unwrap();
            prop_assert_eq!(piece.text(), &text[segment.range.clone()]);
            score += piece.score();
        }
        prop_assert_eq!(covered, text.len());

        let best = all_segmentation_scores(&pieces, &text)
            .into_iter()
            .fold(f32::NEG_INFINITY, f32::max);
        prop_assert_eq!(score, best);
    }

    #[test]
    fn test_tie_break_prefers_longer_pieces(
        repeats in 1usize..8,
        ab_first in any::<bool>(),
    ) {
        let mut records = vec![
            ("a", -1.0, PieceType::Normal),
            ("b", -1.0, PieceType::Normal),
        ];
        let ab = ("ab", -2.0, PieceType::Normal);
        if ab_first {
            records.insert(0, ab);
        } else {
            records.push(ab);
        }
        let vocab: Vocabulary<T> =
            Vocabulary::from_proto(&model(ModelType::Unigram, &records)).unwrap();
        let ab_id = vocab.piece_to_id("ab").unwrap();

        let text = "ab".repeat(repeats);
        let segments = UnigramSegmenter.segment(&vocab, &text).unwrap();
        prop_assert_eq!(segments.len(), repeats);
        prop_assert!(segments.iter().all(|s| s.piece == Some(ab_id)));
    }

    #[test]
    fn test_lattice_tie_break_ignores_insertion_order(
        short_first in any::<bool>(),
    ) {
        let mut lattice = SegmentationLattice::<T>::new(2);
        let relax_short = |lattice: &mut SegmentationLattice<T>| {
            lattice.relax(0, 1, -1.0, Some(10));
            lattice.relax(1, 2, -1.0, Some(11));
        };
        if short_first {
            relax_short(&mut lattice);
            lattice.relax(0, 2, -2.0, Some(12));
        } else {
            lattice.relax(0, 2, -2.0, Some(12));
            relax_short(&mut lattice);
        }

        let path = lattice.best_path().unwrap();
        prop_assert_eq!(path.len(), 1);
        prop_assert_eq!(path[0].piece, Some(12));
        prop_assert_eq!(path[0].range.clone(), 0..2);
    }

    #[test]
    fn test_round_trip_ascii(text in "[a-zA-Z0-9 .,!?'-]{0,40}") {
        let vocab = load::<T>(&hello_model(true));
        let tokenizer = TokenizerOptions::default().build(vocab);
        let ids = tokenizer.try_encode(&text).unwrap();
        prop_assert_eq!(tokenizer.try_decode(&ids).unwrap(), tokenizer.normalize_text(&text));
    }

    #[test]
    fn test_round_trip_unicode(text in "[^\\p{C}]{0,24}") {
        let vocab = load::<T>(&hello_model(true));
        let tokenizer = TokenizerOptions::default().build(vocab);
        let ids = tokenizer.try_encode(&text).unwrap();
        prop_assert_eq!(tokenizer.try_decode(&ids).unwrap(), tokenizer.normalize_text(&text));
    }

    #[test]
    fn test_round_trip_literal_marker(text in "[ab \u{2581}]{0,16}") {
        let vocab = load::<T>(&hello_model(true));
        let tokenizer = TokenizerOptions::default().build(vocab);
        let ids = tokenizer.try_encode(&text).unwrap();
        prop_assert_eq!(tokenizer.try_decode(&ids).unwrap(), tokenizer.normalize_text(&text));
    }

    #[test]
    fn test_whitespace_input_encodes_empty(text in "[ ]{0,8}") {
        let vocab = load::<T>(&hello_model(false));
        let tokenizer = TokenizerOptions::default().build(vocab);
        prop_assert!(tokenizer.try_encode(&text).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_first_record(cut in 1usize..64) {
        let (bytes, record_len) = hello_bytes();
        let cut = 1 + cut % (record_len - 1);
        let err = load_model_bytes::<T>(&bytes[..cut]).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::MalformedModel);
    }

    #[test]
    fn test_inflated_first_record(extra in 1u64..100_000) {
        let (bytes, _) = hello_bytes();
        let remaining = (bytes.len() - 2) as u64;

        let mut corrupt = vec![0x0a];
        push_varint(&mut corrupt, remaining + extra);
        corrupt.extend_from_slice(&bytes[2..]);

        let err = load_model_bytes::<T>(&corrupt).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::MalformedModel);
    }

    #[test]
    fn test_random_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        if let Err(err) = load_model_bytes::<T>(&bytes) {
            prop_assert_eq!(err.kind(), ErrorKind::MalformedModel);
        }
    }
}

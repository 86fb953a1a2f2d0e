//! # Unigram Viterbi [`Segmenter`]

use crate::{
    alloc::vec::Vec,
    errors::PMResult,
    segmenters::{Segment, SegmentationLattice, Segmenter},
    types::TokenType,
    vocab::{PieceType, Vocabulary},
};

/// The score gap between the worst normal piece and an unknown char.
pub const UNKNOWN_PENALTY: f32 = 10.0;

/// The score gap between a user-defined piece and its length-scaled bonus.
pub const USER_DEFINED_PENALTY: f32 = 0.1;

/// A [`Segmenter`] selecting the maximum-score segmentation.
///
/// * Normal pieces score their model score;
/// * user-defined pieces score ``len_bytes * max_score - 0.1``, so they
///   win over any split of the same text;
/// * unused pieces never match;
/// * where no single-char piece covers a char, an unknown edge of one
///   char scores ``min_score - 10``.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct UnigramSegmenter;

impl UnigramSegmenter {
    /// Fill a lattice for `text`.
    ///
    /// ## Returns
    /// The lattice, with every reachable edge relaxed.
    pub fn build_lattice<T: TokenType>(
        &self,
        vocab: &Vocabulary<T>,
        text: &str,
    ) -> SegmentationLattice<T> {
        let mut lattice = SegmentationLattice::new(text.len());
        let unknown_score = vocab.min_score() - UNKNOWN_PENALTY;
        let max_score = vocab.max_score();

        for (position, c) in text.char_indices() {
            if !lattice.is_reachable(position) {
                continue;
            }
            let char_len = c.len_utf8();
            let mut has_single_char = false;

            vocab.index().for_each_match(text, position, |id, len| {
                let Some(piece) = vocab.piece(id) else {
                    return;
                };
                let score = match piece.kind() {
                    PieceType::Unused => return,
                    PieceType::UserDefined => len as f32 * max_score - USER_DEFINED_PENALTY,
                    _ => piece.score(),
                };
                lattice.relax(position, position + len, score, Some(id));
                has_single_char |= len == char_len;
            });

            if !has_single_char {
                lattice.relax(position, position + char_len, unknown_score, None);
            }
        }

        lattice
    }
}

impl<T: TokenType> Segmenter<T> for UnigramSegmenter {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, vocab, text, segments)))]
    fn segment_append(
        &self,
        vocab: &Vocabulary<T>,
        text: &str,
        segments: &mut Vec<Segment<T>>,
    ) -> PMResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        segments.extend(self.build_lattice(vocab, text).best_path()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alloc::{format, string::String, vec, vec::Vec},
        vocab::{
            ModelType,
            utility::testing::{build_test_model, build_test_vocab, hello_model},
        },
    };

    fn pieces<T: TokenType>(
        vocab: &Vocabulary<T>,
        text: &str,
    ) -> Vec<String> {
        UnigramSegmenter
            .segment(vocab, text)
            .unwrap()
            .into_iter()
            .map(|s| match s.piece {
                Some(id) => vocab.id_to_piece(id).unwrap().into(),
                None => format!("?{}", &text[s.range]),
            })
            .collect()
    }

    #[test]
    fn test_hello() {
        type T = u32;
        let vocab: Vocabulary<T> = build_test_vocab(&hello_model());

        assert_eq!(
            pieces(&vocab, "\u{2581}Hello\u{2581}you!"),
            vec!["\u{2581}Hello", "\u{2581}you", "!"]
        );
        assert_eq!(
            pieces(&vocab, "\u{2581}world"),
            vec!["\u{2581}world"]
        );
        assert!(pieces(&vocab, "").is_empty());
    }

    #[test]
    fn test_unknown_runs() {
        type T = u16;
        let vocab: Vocabulary<T> = build_test_vocab(&hello_model());

        let segments = UnigramSegmenter
            .segment(&vocab, "\u{2581}you\u{0aa7}\u{0aa8}!")
            .unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1], Segment::new(6..12, None));
        assert_eq!(segments[2].range, 12..13);
    }

    #[test]
    fn test_user_defined_wins() {
        type T = u32;
        let vocab: Vocabulary<T> = build_test_vocab(&build_test_model(
            ModelType::Unigram,
            &[
                ("a", -1.0, PieceType::Normal),
                ("b", -1.0, PieceType::Normal),
                ("ab", -0.5, PieceType::Normal),
                ("<ab>", 0.0, PieceType::UserDefined),
                ("<", -1.0, PieceType::Normal),
                (">", -1.0, PieceType::Normal),
            ],
        ));
        assert_eq!(pieces(&vocab, "<ab>ab"), vec!["<ab>", "ab"]);
    }

    #[test]
    fn test_unused_pieces_skipped() {
        type T = u32;
        let vocab: Vocabulary<T> = build_test_vocab(&build_test_model(
            ModelType::Unigram,
            &[
                ("a", -1.0, PieceType::Normal),
                ("b", -1.0, PieceType::Normal),
                ("ab", 0.0, PieceType::Unused),
            ],
        ));
        assert_eq!(pieces(&vocab, "ab"), vec!["a", "b"]);
    }
}

//! # Priority-merge BPE [`Segmenter`].
//!
//! Uses a binary max-heap over a doubly-linked symbol list for
//! O(n log n) merging.

use alloc::collections::BinaryHeap;
use core::cmp::Ordering;

use crate::{
    alloc::{vec, vec::Vec},
    errors::PMResult,
    segmenters::{Segment, Segmenter, push_segment},
    support::strings::first_char_len,
    types::{PMHashMap, TokenType, hash_map_new},
    vocab::Vocabulary,
};

const NONE: usize = usize::MAX;

#[derive(Debug, Clone, Copy)]
struct Symbol {
    start: usize,
    end: usize,
    prev: usize,
    next: usize,
    frozen: bool,
    removed: bool,
}

/// Heap entry representing a potential merge.
///
/// Ordered by (score, -`left`) so the highest-score, leftmost pair is
/// popped first. `size` is the merged byte length, for stale-entry
/// detection.
#[derive(Debug)]
struct MergeEntry<T> {
    score: f32,
    left: usize,
    right: usize,
    size: usize,
    piece: T,
}

impl<T> PartialEq for MergeEntry<T> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for MergeEntry<T> {}

impl<T> Ord for MergeEntry<T> {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then(other.left.cmp(&self.left))
    }
}

impl<T> PartialOrd for MergeEntry<T> {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A [`Segmenter`] applying BPE merges in piece-score order.
///
/// * Initial symbols are chars; user-defined symbols are frozen whole.
/// * The adjacent pair whose concatenation is the highest-scoring piece
///   merges first; ties go to the leftmost pair.
/// * Final unused pieces are re-split into the symbols they merged from.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BpeSegmenter;

impl BpeSegmenter {
    fn push_pair<T: TokenType>(
        vocab: &Vocabulary<T>,
        text: &str,
        symbols: &[Symbol],
        left: usize,
        right: usize,
        heap: &mut BinaryHeap<MergeEntry<T>>,
    ) {
        let (l, r) = (&symbols[left], &symbols[right]);
        if l.frozen || r.frozen {
            return;
        }
        let Some(piece) = vocab.index().get(&text[l.start..r.end]) else {
            return;
        };
        if let Some(score) = vocab.piece(piece).map(|p| p.score()) {
            heap.push(MergeEntry {
                score,
                left,
                right,
                size: r.end - l.start,
                piece,
            });
        }
    }

    fn initial_symbols<T: TokenType>(
        vocab: &Vocabulary<T>,
        text: &str,
    ) -> Vec<Symbol> {
        let mut symbols = Vec::with_capacity(text.len());
        let mut position = 0;
        while position < text.len() {
            let rest = &text[position..];
            let (len, frozen) = match vocab.user_symbols().prefix_len(rest) {
                Some(len) => (len, true),
                None => (first_char_len(rest), false),
            };
            let idx = symbols.len();
            symbols.push(Symbol {
                start: position,
                end: position + len,
                prev: if idx == 0 { NONE } else { idx - 1 },
                next: idx + 1,
                frozen,
                removed: false,
            });
            position += len;
        }
        if let Some(last) = symbols.last_mut() {
            last.next = NONE;
        }
        symbols
    }
}

impl<T: TokenType> Segmenter<T> for BpeSegmenter {
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

        let mut symbols = Self::initial_symbols(vocab, text);

        // Seed the heap with all initially-mergeable adjacent pairs.
        let mut heap = BinaryHeap::new();
        for i in 1..symbols.len() {
            Self::push_pair(vocab, text, &symbols, i - 1, i, &mut heap);
        }

        // ``(start, end) -> mid`` for merges which produced unused pieces.
        let mut splits: PMHashMap<(usize, usize), usize> = hash_map_new();

        while let Some(entry) = heap.pop() {
            let (li, ri) = (entry.left, entry.right);
            let (l, r) = (symbols[li], symbols[ri]);
            if l.removed || r.removed || l.next != ri || r.end - l.start != entry.size {
                continue;
            }

            if vocab.is_unused(entry.piece) {
                splits.insert((l.start, r.end), r.start);
            }

            // Merge: left absorbs right.
            symbols[li].end = r.end;
            symbols[li].next = r.next;
            symbols[ri].removed = true;
            if r.next != NONE {
                symbols[r.next].prev = li;
            }

            if l.prev != NONE {
                Self::push_pair(vocab, text, &symbols, l.prev, li, &mut heap);
            }
            if r.next != NONE {
                Self::push_pair(vocab, text, &symbols, li, r.next, &mut heap);
            }
        }

        // Walk the list; re-split unused pieces.
        let mut stack = vec![];
        let mut idx = 0;
        while idx != NONE {
            let symbol = &symbols[idx];
            stack.push((symbol.start, symbol.end));
            while let Some((start, end)) = stack.pop() {
                let piece = vocab.index().get(&text[start..end]);
                if let Some(id) = piece
                    && vocab.is_unused(id)
                    && let Some(&mid) = splits.get(&(start, end))
                {
                    stack.push((mid, end));
                    stack.push((start, mid));
                    continue;
                }
                push_segment(segments, Segment::new(start..end, piece));
            }
            idx = symbol.next;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alloc::{string::String, vec},
        vocab::{
            ModelType,
            PieceType,
            utility::testing::{bpe_model, build_test_model, build_test_vocab},
        },
    };

    fn pieces<T: TokenType>(
        vocab: &Vocabulary<T>,
        text: &str,
    ) -> Vec<String> {
        BpeSegmenter
            .segment(vocab, text)
            .unwrap()
            .into_iter()
            .map(|s| match s.piece {
                Some(id) => vocab.id_to_piece(id).unwrap().into(),
                None => String::from("<?>") + &text[s.range],
            })
            .collect()
    }

    #[test]
    fn test_merges() {
        type T = u32;
        let vocab: Vocabulary<T> = build_test_vocab(&bpe_model());

        assert_eq!(
            pieces(&vocab, "\u{2581}hello\u{2581}world"),
            vec!["\u{2581}hello", "\u{2581}world"]
        );
        assert_eq!(
            pieces(&vocab, "\u{2581}hell"),
            vec!["\u{2581}he", "ll"]
        );
        assert!(pieces(&vocab, "").is_empty());
    }

    #[test]
    fn test_ties_merge_leftmost() {
        type T = u32;
        let vocab: Vocabulary<T> = build_test_vocab(&bpe_model());

        assert_eq!(pieces(&vocab, "aaa"), vec!["aa", "a"]);
        assert_eq!(pieces(&vocab, "aaaaa"), vec!["aa", "aa", "a"]);
    }

    #[test]
    fn test_unknown_runs() {
        type T = u32;
        let vocab: Vocabulary<T> = build_test_vocab(&bpe_model());

        let segments = BpeSegmenter.segment(&vocab, "ll\u{00e9}\u{00e8}!").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::new(0..2, vocab.piece_to_id("ll")),
                Segment::new(2..6, None),
                Segment::new(6..7, vocab.piece_to_id("!")),
            ]
        );
    }

    #[test]
    fn test_unused_pieces_resplit() {
        type T = u32;
        let vocab: Vocabulary<T> = build_test_vocab(&build_test_model(
            ModelType::Bpe,
            &[
                ("a", -5.0, PieceType::Normal),
                ("b", -5.0, PieceType::Normal),
                ("c", -5.0, PieceType::Normal),
                ("ab", -1.0, PieceType::Unused),
                ("abc", -2.0, PieceType::Normal),
            ],
        ));

        assert_eq!(pieces(&vocab, "abc"), vec!["abc"]);
        assert_eq!(pieces(&vocab, "ab"), vec!["a", "b"]);
        assert_eq!(pieces(&vocab, "abab"), vec!["a", "b", "a", "b"]);
    }

    #[test]
    fn test_user_symbols_frozen() {
        type T = u32;
        let vocab: Vocabulary<T> = build_test_vocab(&build_test_model(
            ModelType::Bpe,
            &[
                ("a", -5.0, PieceType::Normal),
                ("b", -5.0, PieceType::Normal),
                ("ba", -1.0, PieceType::Normal),
                ("<b>", 0.0, PieceType::UserDefined),
            ],
        ));

        assert_eq!(pieces(&vocab, "a<b>a"), vec!["a", "<b>", "a"]);
        assert_eq!(pieces(&vocab, "ba"), vec!["ba"]);
    }
}

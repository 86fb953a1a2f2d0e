//! # Whole-word [`Segmenter`]

use crate::{
    alloc::vec::Vec,
    errors::PMResult,
    segmenters::{Segment, Segmenter},
    support::strings::SPACE_SYMBOL,
    types::TokenType,
    vocab::Vocabulary,
};

/// Look up `text` as a single non-unused piece.
pub(crate) fn lookup_whole<T: TokenType>(
    vocab: &Vocabulary<T>,
    text: &str,
) -> Option<T> {
    vocab
        .index()
        .get(text)
        .filter(|&id| !vocab.is_unused(id))
}

/// A [`Segmenter`] for word models.
///
/// Text splits into words at ``▁`` markers; each word is one piece,
/// or unknown. With whitespace-as-suffix, words end with their marker.
///
/// Unknown words are not merged; each is its own unknown segment.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct WordSegmenter;

impl<T: TokenType> Segmenter<T> for WordSegmenter {
    fn segment_append(
        &self,
        vocab: &Vocabulary<T>,
        text: &str,
        segments: &mut Vec<Segment<T>>,
    ) -> PMResult<()> {
        let suffix = vocab.normalizer().treat_whitespace_as_suffix();

        let mut start = 0;
        for (position, _) in text.match_indices(SPACE_SYMBOL) {
            let cut = if suffix {
                position + SPACE_SYMBOL.len()
            } else {
                position
            };
            if cut > start {
                segments.push(Segment::new(
                    start..cut,
                    lookup_whole(vocab, &text[start..cut]),
                ));
                start = cut;
            }
        }
        if start < text.len() {
            segments.push(Segment::new(
                start..text.len(),
                lookup_whole(vocab, &text[start..]),
            ));
        }
        Ok(())
    }
}

//! # Single-char [`Segmenter`]

use crate::{
    alloc::vec::Vec,
    errors::PMResult,
    segmenters::{Segment, Segmenter, push_segment, word_segmenter::lookup_whole},
    types::TokenType,
    vocab::Vocabulary,
};

/// A [`Segmenter`] for char models: each char is one piece, or unknown.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CharSegmenter;

impl<T: TokenType> Segmenter<T> for CharSegmenter {
    fn segment_append(
        &self,
        vocab: &Vocabulary<T>,
        text: &str,
        segments: &mut Vec<Segment<T>>,
    ) -> PMResult<()> {
        for (position, c) in text.char_indices() {
            let end = position + c.len_utf8();
            push_segment(
                segments,
                Segment::new(position..end, lookup_whole(vocab, &text[position..end])),
            );
        }
        Ok(())
    }
}

//! # Segmenter Trait

use core::ops::Range;

use crate::{
    alloc::vec::Vec,
    errors::PMResult,
    types::TokenType,
    vocab::Vocabulary,
};

/// One segment of normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<T: TokenType> {
    /// The normalized byte range of the segment.
    pub range: Range<usize>,

    /// The piece id; or `None` for an unknown run.
    pub piece: Option<T>,
}

impl<T: TokenType> Segment<T> {
    /// Create a segment.
    pub fn new(
        range: Range<usize>,
        piece: Option<T>,
    ) -> Self {
        Self { range, piece }
    }

    /// Is this an unknown run?
    pub fn is_unknown(&self) -> bool {
        self.piece.is_none()
    }
}

/// Append a segment, merging adjacent unknown runs.
pub fn push_segment<T: TokenType>(
    segments: &mut Vec<Segment<T>>,
    segment: Segment<T>,
) {
    if segment.is_unknown()
        && let Some(last) = segments.last_mut()
        && last.is_unknown()
        && last.range.end == segment.range.start
    {
        last.range.end = segment.range.end;
        return;
    }
    segments.push(segment);
}

/// Segmentation strategy over normalized text.
///
/// Segmenters hold no per-call state; one instance is shared
/// between threads.
pub trait Segmenter<T: TokenType>: Send + Sync {
    /// Segment normalized text, appending to a target buffer.
    ///
    /// ## Arguments
    /// * `vocab` - The vocabulary to segment with.
    /// * `text` - The normalized text.
    /// * `segments` - The target buffer.
    ///
    /// Segments are contiguous and cover `text`. Sub-word segmenters
    /// merge adjacent unknown segments into one run.
    fn segment_append(
        &self,
        vocab: &Vocabulary<T>,
        text: &str,
        segments: &mut Vec<Segment<T>>,
    ) -> PMResult<()>;

    /// Segment normalized text.
    ///
    /// ## Arguments
    /// * `vocab` - The vocabulary to segment with.
    /// * `text` - The normalized text.
    ///
    /// ## Returns
    /// The segments; empty for empty text.
    fn segment(
        &self,
        vocab: &Vocabulary<T>,
        text: &str,
    ) -> PMResult<Vec<Segment<T>>> {
        let mut segments = Vec::with_capacity(text.len() / 2 + 1);
        self.segment_append(vocab, text, &mut segments)?;
        Ok(segments)
    }
}

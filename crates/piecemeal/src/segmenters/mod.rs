//! # Segmenters
//!
//! A [`Segmenter`] splits normalized text into [`Segment`]s: piece ids
//! over normalized byte ranges, or unknown runs.
//!
//! The algorithm is chosen once per vocabulary, from its model type,
//! through [`SegmenterSelector`]:
//! * [`UnigramSegmenter`] - maximum-score path over a [`SegmentationLattice`];
//! * [`BpeSegmenter`] - priority-ordered pair merges;
//! * [`WordSegmenter`] and [`CharSegmenter`] - direct lookups.

mod bpe_segmenter;
mod char_segmenter;
mod lattice;
mod segmenter;
mod segmenter_selector;
mod unigram_segmenter;
mod word_segmenter;

#[doc(inline)]
pub use bpe_segmenter::*;
#[doc(inline)]
pub use char_segmenter::*;
#[doc(inline)]
pub use lattice::*;
#[doc(inline)]
pub use segmenter::*;
#[doc(inline)]
pub use segmenter_selector::*;
#[doc(inline)]
pub use unigram_segmenter::*;
#[doc(inline)]
pub use word_segmenter::WordSegmenter;

//! # Segmenter Selector

use crate::{
    alloc::sync::Arc,
    segmenters::{BpeSegmenter, CharSegmenter, Segmenter, UnigramSegmenter, WordSegmenter},
    types::TokenType,
    vocab::ModelType,
};

/// Policy enum for selecting a [`Segmenter`].
///
/// A vocabulary's [`ModelType`] resolves to exactly one selector, once,
/// when an encoder is built.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "std",
    derive(
        strum_macros::EnumString,
        strum_macros::EnumIter,
        strum_macros::Display
    )
)]
#[non_exhaustive]
pub enum SegmenterSelector {
    /// Use the [`UnigramSegmenter`].
    #[default]
    Unigram,

    /// Use the [`BpeSegmenter`].
    Bpe,

    /// Use the [`WordSegmenter`].
    Word,

    /// Use the [`CharSegmenter`].
    Char,
}

impl From<ModelType> for SegmenterSelector {
    fn from(model_type: ModelType) -> Self {
        match model_type {
            ModelType::Unigram => Self::Unigram,
            ModelType::Bpe => Self::Bpe,
            ModelType::Word => Self::Word,
            ModelType::Char => Self::Char,
        }
    }
}

impl SegmenterSelector {
    /// Build the selected [`Segmenter`].
    pub fn build<T: TokenType>(&self) -> Arc<dyn Segmenter<T>> {
        use SegmenterSelector::*;
        match self {
            Unigram => Arc::new(UnigramSegmenter),
            Bpe => Arc::new(BpeSegmenter),
            Word => Arc::new(WordSegmenter),
            Char => Arc::new(CharSegmenter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_model_type() {
        assert_eq!(
            SegmenterSelector::from(ModelType::Unigram),
            SegmenterSelector::Unigram
        );
        assert_eq!(SegmenterSelector::from(ModelType::Bpe), SegmenterSelector::Bpe);
        assert_eq!(
            SegmenterSelector::from(ModelType::Word),
            SegmenterSelector::Word
        );
        assert_eq!(
            SegmenterSelector::from(ModelType::Char),
            SegmenterSelector::Char
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_names() {
        use core::str::FromStr;

        use strum::IntoEnumIterator;

        for selector in SegmenterSelector::iter() {
            let name = selector.to_string();
            assert_eq!(SegmenterSelector::from_str(&name).unwrap(), selector);
        }
        assert_eq!(SegmenterSelector::Bpe.to_string(), "Bpe");
    }
}

//! Token Encoder Options
//!
//! Options for building a [`TokenEncoder`].

use crate::{
    alloc::sync::Arc,
    encoders::{PieceEncoder, TokenEncoder},
    segmenters::SegmenterSelector,
    types::TokenType,
    vocab::Vocabulary,
};

/// Options for configuring a [`TokenEncoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenEncoderOptions {
    /// The [`SegmenterSelector`] to use.
    ///
    /// When `None`, the vocabulary's model type decides.
    pub segmenter: Option<SegmenterSelector>,

    /// Insert the model's ``bos`` id before each encoding.
    pub add_bos: bool,

    /// Append the model's ``eos`` id after each encoding.
    pub add_eos: bool,

    /// Should the encoder be threaded?
    pub parallel: bool,
}

impl TokenEncoderOptions {
    /// Gets the effective segmenter selector for a vocabulary.
    ///
    /// Will return any explicit setting,
    /// otherwise the selector for the vocabulary's model type.
    pub fn effective_segmenter<T: TokenType>(
        &self,
        vocab: &Vocabulary<T>,
    ) -> SegmenterSelector {
        self.segmenter
            .unwrap_or_else(|| SegmenterSelector::from(vocab.model_type()))
    }

    /// Get the configured [`SegmenterSelector`].
    pub fn segmenter(&self) -> Option<SegmenterSelector> {
        self.segmenter
    }

    /// Set the configured [`SegmenterSelector`].
    pub fn set_segmenter<S>(
        &mut self,
        segmenter: S,
    ) where
        S: Into<Option<SegmenterSelector>>,
    {
        self.segmenter = segmenter.into();
    }

    /// Set the configured [`SegmenterSelector`] and return the options.
    pub fn with_segmenter<S>(
        mut self,
        segmenter: S,
    ) -> Self
    where
        S: Into<Option<SegmenterSelector>>,
    {
        self.set_segmenter(segmenter);
        self
    }

    /// Is the ``bos`` id inserted?
    pub fn add_bos(&self) -> bool {
        self.add_bos
    }

    /// Set whether the ``bos`` id is inserted.
    pub fn set_add_bos(
        &mut self,
        add_bos: bool,
    ) {
        self.add_bos = add_bos;
    }

    /// Set whether the ``bos`` id is inserted.
    pub fn with_add_bos(
        mut self,
        add_bos: bool,
    ) -> Self {
        self.set_add_bos(add_bos);
        self
    }

    /// Is the ``eos`` id appended?
    pub fn add_eos(&self) -> bool {
        self.add_eos
    }

    /// Set whether the ``eos`` id is appended.
    pub fn set_add_eos(
        &mut self,
        add_eos: bool,
    ) {
        self.add_eos = add_eos;
    }

    /// Set whether the ``eos`` id is appended.
    pub fn with_add_eos(
        mut self,
        add_eos: bool,
    ) -> Self {
        self.set_add_eos(add_eos);
        self
    }

    /// Gets the configured parallelism value.
    ///
    /// Enabling parallelism will request threaded implementations.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Sets the configured parallelism value.
    ///
    /// Enabling parallelism will request threaded implementations.
    pub fn set_parallel(
        &mut self,
        parallel: bool,
    ) {
        self.parallel = parallel;
    }

    /// Sets the configured parallelism value.
    ///
    /// Enabling parallelism will request threaded implementations.
    pub fn with_parallel(
        mut self,
        parallel: bool,
    ) -> Self {
        self.set_parallel(parallel);
        self
    }

    /// Build a [`TokenEncoder`] for the given vocab.
    pub fn build<T: TokenType>(
        &self,
        vocab: Arc<Vocabulary<T>>,
    ) -> Arc<dyn TokenEncoder<T>> {
        let selector = self.effective_segmenter(&vocab);
        log::debug!("building {selector:?} encoder (parallel={})", self.parallel);

        #[allow(unused_mut)]
        let mut enc: Arc<dyn TokenEncoder<T>> = Arc::new(
            PieceEncoder::new_with_selector(vocab, selector)
                .with_add_bos(self.add_bos)
                .with_add_eos(self.add_eos),
        );

        #[cfg(feature = "rayon")]
        if self.parallel() {
            enc = Arc::new(crate::rayon::ParallelRayonEncoder::new(enc));
        }

        enc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alloc::vec,
        vocab::utility::testing::{bpe_model, build_test_vocab, hello_model},
    };

    #[test]
    fn test_effective_segmenter() {
        type T = u32;
        let unigram: Vocabulary<T> = build_test_vocab(&hello_model());
        let bpe: Vocabulary<T> = build_test_vocab(&bpe_model());

        let options = TokenEncoderOptions::default();
        assert_eq!(options.segmenter(), None);
        assert_eq!(options.effective_segmenter(&unigram), SegmenterSelector::Unigram);
        assert_eq!(options.effective_segmenter(&bpe), SegmenterSelector::Bpe);

        let options = options.with_segmenter(SegmenterSelector::Char);
        assert_eq!(options.effective_segmenter(&bpe), SegmenterSelector::Char);

        let mut options = options;
        options.set_segmenter(None);
        assert_eq!(options, TokenEncoderOptions::default());
    }

    #[test]
    fn test_build() {
        type T = u32;
        let vocab: Arc<Vocabulary<T>> = Arc::new(build_test_vocab(&hello_model()));

        for parallel in [false, true] {
            let options = TokenEncoderOptions::default()
                .with_add_bos(true)
                .with_add_eos(true)
                .with_parallel(parallel);
            assert!(options.add_bos() && options.add_eos());

            let encoder = options.build(vocab.clone());
            let ids = encoder.try_encode("Hello").unwrap();
            assert_eq!(
                ids,
                vec![
                    vocab.bos_id().unwrap(),
                    vocab.piece_to_id("\u{2581}Hello").unwrap(),
                    vocab.eos_id().unwrap(),
                ]
            );
        }
    }
}

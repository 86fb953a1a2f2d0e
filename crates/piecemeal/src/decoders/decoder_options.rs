//! Token Decoder Options
//!
//! Options for building a [`TokenDecoder`].

use crate::{
    alloc::sync::Arc,
    decoders::{PieceDecoder, TokenDecoder},
    types::TokenType,
    vocab::Vocabulary,
};

/// Options for configuring a [`TokenDecoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenDecoderOptions {
    /// Should the decoder be threaded?
    ///
    /// Enabling parallelism will request a threaded implementation.
    pub parallel: bool,
}

impl TokenDecoderOptions {
    /// Gets the configured parallelism value.
    ///
    /// Enabling parallelism will request a threaded implementation.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Sets the configured parallelism value.
    pub fn set_parallel(
        &mut self,
        parallel: bool,
    ) {
        self.parallel = parallel;
    }

    /// Sets the configured parallelism value.
    ///
    /// Enabling parallelism will request a threaded implementation.
    pub fn with_parallel(
        mut self,
        parallel: bool,
    ) -> Self {
        self.set_parallel(parallel);
        self
    }

    /// Build a [`TokenDecoder`] for the given vocab.
    pub fn build<T: TokenType>(
        &self,
        vocab: Arc<Vocabulary<T>>,
    ) -> Arc<dyn TokenDecoder<T>> {
        #[allow(unused_mut)]
        let mut dec: Arc<dyn TokenDecoder<T>> = Arc::new(PieceDecoder::new(vocab));

        #[cfg(feature = "rayon")]
        if self.parallel {
            dec = Arc::new(crate::rayon::ParallelRayonDecoder::new(dec));
        }

        dec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::utility::testing::{build_test_vocab, hello_model};

    #[test]
    fn test_options() {
        let options = TokenDecoderOptions::default();
        assert!(!options.parallel());

        let mut options = options.with_parallel(true);
        assert!(options.parallel());
        options.set_parallel(false);
        assert_eq!(options, TokenDecoderOptions::default());
    }

    #[test]
    fn test_build() {
        type T = u32;
        let vocab: Arc<Vocabulary<T>> = Arc::new(build_test_vocab(&hello_model()));
        let id = vocab.piece_to_id("\u{2581}you").unwrap();

        for parallel in [false, true] {
            let decoder = TokenDecoderOptions::default()
                .with_parallel(parallel)
                .build(vocab.clone());
            assert_eq!(decoder.try_decode(&[id]).unwrap(), "you");
        }
    }
}

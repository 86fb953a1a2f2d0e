//! # Parallel Decoder

use crate::{
    alloc::{string::String, sync::Arc, vec::Vec},
    decoders::TokenDecoder,
    errors::PMResult,
    types::TokenType,
};

/// Batch-Level Parallel Decoder Wrapper.
///
/// Enables ``rayon`` decoding of batches.
pub struct ParallelRayonDecoder<T: TokenType> {
    /// Wrapped decoder.
    pub inner: Arc<dyn TokenDecoder<T>>,

    _marker: core::marker::PhantomData<T>,
}

impl<T> ParallelRayonDecoder<T>
where
    T: TokenType,
{
    /// Create a new parallel token decoder.
    ///
    /// ## Arguments
    /// * `inner` - The token decoder to wrap.
    ///
    /// ## Returns
    /// A new `ParallelRayonDecoder` instance.
    pub fn new(inner: Arc<dyn TokenDecoder<T>>) -> Self {
        Self {
            inner,
            _marker: core::marker::PhantomData,
        }
    }
}

impl<T> TokenDecoder<T> for ParallelRayonDecoder<T>
where
    T: TokenType,
{
    fn try_decode(
        &self,
        ids: &[T],
    ) -> PMResult<String> {
        self.inner.try_decode(ids)
    }

    fn try_decode_pieces(
        &self,
        pieces: &[&str],
    ) -> PMResult<String> {
        self.inner.try_decode_pieces(pieces)
    }

    fn try_decode_batch(
        &self,
        batch: &[&[T]],
    ) -> PMResult<Vec<String>> {
        use rayon::prelude::*;

        batch
            .par_iter()
            .map(|ids| self.inner.try_decode(ids))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        decoders::{TokenDecoderOptions, testing::common_decoder_tests},
        vocab::{
            Vocabulary,
            utility::testing::{build_test_vocab, byte_fallback_model},
        },
    };

    #[test]
    fn test_rayon_decoder() {
        type T = u16;

        let vocab: Arc<Vocabulary<T>> = Arc::new(build_test_vocab(&byte_fallback_model()));

        let inner = TokenDecoderOptions::default()
            .with_parallel(false)
            .build(vocab.clone());
        let decoder = ParallelRayonDecoder::new(inner);

        common_decoder_tests(vocab, &decoder);
    }
}

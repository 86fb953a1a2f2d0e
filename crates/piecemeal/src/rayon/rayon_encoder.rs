//! # Parallel Encoder

use crate::{
    alloc::{string::String, sync::Arc, vec::Vec},
    encoders::{PieceVisitor, TokenEncoder},
    errors::PMResult,
    types::TokenType,
    vocab::Vocabulary,
};

/// Batch-Level Parallel Encoder Wrapper.
///
/// Enables ``rayon`` encoding of batches.
pub struct ParallelRayonEncoder<T: TokenType> {
    /// Inner encoder.
    pub inner: Arc<dyn TokenEncoder<T>>,

    _marker: core::marker::PhantomData<T>,
}

impl<T> ParallelRayonEncoder<T>
where
    T: TokenType,
{
    /// Create a new parallel encoder.
    ///
    /// ## Arguments
    /// * `inner` - The token encoder to wrap.
    ///
    /// ## Returns
    /// A new `ParallelRayonEncoder` instance.
    pub fn new(inner: Arc<dyn TokenEncoder<T>>) -> Self {
        Self {
            inner,
            _marker: core::marker::PhantomData,
        }
    }
}

impl<T> TokenEncoder<T> for ParallelRayonEncoder<T>
where
    T: TokenType,
{
    fn vocab(&self) -> &Arc<Vocabulary<T>> {
        self.inner.vocab()
    }

    fn try_encode_visit(
        &self,
        text: &str,
        visit: &mut PieceVisitor<'_, T>,
    ) -> PMResult<()> {
        self.inner.try_encode_visit(text, visit)
    }

    fn try_encode(
        &self,
        text: &str,
    ) -> PMResult<Vec<T>> {
        self.inner.try_encode(text)
    }

    fn try_encode_batch(
        &self,
        batch: &[&str],
    ) -> PMResult<Vec<Vec<T>>> {
        use rayon::prelude::*;

        batch
            .par_iter()
            .map(|text| self.inner.try_encode(text))
            .collect()
    }

    fn try_tokenize_batch(
        &self,
        batch: &[&str],
    ) -> PMResult<Vec<Vec<String>>> {
        use rayon::prelude::*;

        batch
            .par_iter()
            .map(|text| self.inner.try_tokenize(text))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoders::{
        TokenEncoderOptions,
        testing::{common_encoder_test_vocab, common_encoder_tests},
    };

    fn test_encoder<T: TokenType>() {
        let vocab: Arc<Vocabulary<T>> = common_encoder_test_vocab::<T>().into();
        let inner = TokenEncoderOptions::default()
            .with_parallel(false)
            .build(vocab.clone());
        let encoder = ParallelRayonEncoder::new(inner);

        assert!(Arc::ptr_eq(encoder.vocab(), &vocab));

        common_encoder_tests(vocab, &encoder)
    }

    #[test]
    fn test_encoder_u16() {
        test_encoder::<u16>();
    }

    #[test]
    fn test_encoder_u32() {
        test_encoder::<u32>();
    }
}

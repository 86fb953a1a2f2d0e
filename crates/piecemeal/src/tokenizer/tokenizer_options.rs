use crate::{
    alloc::sync::Arc,
    decoders::TokenDecoderOptions,
    encoders::TokenEncoderOptions,
    tokenizer::Tokenizer,
    types::TokenType,
    vocab::Vocabulary,
};

/// Options for configuring a [`Tokenizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenizerOptions {
    /// Encoder options.
    pub encoder: TokenEncoderOptions,

    /// Decoder options.
    pub decoder: TokenDecoderOptions,
}

impl TokenizerOptions {
    /// Gets the configured parallelism value.
    ///
    /// Returns true if either encoder or decoder are configured for parallelism.
    pub fn parallel(&self) -> bool {
        self.encoder.parallel() || self.decoder.parallel()
    }

    /// Sets the configured parallelism value on both encoder and decoder.
    ///
    /// Enabling parallelism will request threaded implementations.
    pub fn set_parallel(
        &mut self,
        parallel: bool,
    ) {
        self.encoder.set_parallel(parallel);
        self.decoder.set_parallel(parallel);
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

    /// Sets the encoder options.
    pub fn with_encoder(
        mut self,
        encoder: TokenEncoderOptions,
    ) -> Self {
        self.encoder = encoder;
        self
    }

    /// Sets the decoder options.
    pub fn with_decoder(
        mut self,
        decoder: TokenDecoderOptions,
    ) -> Self {
        self.decoder = decoder;
        self
    }

    /// Build a [`Tokenizer`] for the given vocab.
    pub fn build<T: TokenType>(
        &self,
        vocab: Arc<Vocabulary<T>>,
    ) -> Arc<Tokenizer<T>> {
        Tokenizer::new(
            vocab.clone(),
            self.encoder.build(vocab.clone()),
            self.decoder.build(vocab),
        )
        .into()
    }
}

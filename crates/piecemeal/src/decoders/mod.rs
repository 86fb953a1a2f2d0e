//! # Token Decoders
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use piecemeal::{TokenDecoder, TokenDecoderOptions, TokenType, Vocabulary};
//!
//! fn example<T: TokenType>(
//!     vocab: Arc<Vocabulary<T>>,
//!     batch: &[&[T]],
//! ) -> Vec<String> {
//!     let decoder = TokenDecoderOptions::default().build(vocab);
//!     decoder.try_decode_batch(batch).unwrap()
//! }
//! ```

mod decoder_options;
mod piece_decoder;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod token_decoder;

#[doc(inline)]
pub use decoder_options::*;
#[doc(inline)]
pub use piece_decoder::*;
#[doc(inline)]
pub use token_decoder::*;

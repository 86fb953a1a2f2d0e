//! # Token Encoders
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use piecemeal::{TokenEncoder, TokenEncoderOptions, TokenType, Vocabulary};
//!
//! fn example<T: TokenType>(
//!     vocab: Arc<Vocabulary<T>>,
//!     batch: &[&str],
//! ) -> Vec<Vec<T>> {
//!     let encoder = TokenEncoderOptions::default().build(vocab);
//!     encoder.try_encode_batch(batch).unwrap()
//! }
//! ```

mod encoder_options;
mod piece_encoder;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod token;
mod token_encoder;

#[doc(inline)]
pub use encoder_options::*;
#[doc(inline)]
pub use piece_encoder::*;
#[doc(inline)]
pub use token::*;
#[doc(inline)]
pub use token_encoder::*;

//! # Rayon Parallelism
//!
//! Batch-level ``rayon`` wrappers for [`TokenEncoder`](crate::TokenEncoder)
//! and [`TokenDecoder`](crate::TokenDecoder). Results are identical to the
//! wrapped (sequential) batch methods.

mod rayon_decoder;
mod rayon_encoder;

#[doc(inline)]
pub use rayon_decoder::*;
#[doc(inline)]
pub use rayon_encoder::*;

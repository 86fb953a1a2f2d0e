//! # Vocabulary IO
//!
//! Models are stored in the protobuf ``ModelProto`` encoding.
//!
//! ## Loading A Model
//!
//! ```rust,no_run
//! use piecemeal::{TokenEncoder, TokenizerOptions, vocab::io::load_model_path};
//!
//! fn example() -> piecemeal::PMResult<Vec<String>> {
//!     type T = u32;
//!     let vocab = load_model_path::<T, _>("tokenizer.model")?;
//!     let tokenizer = TokenizerOptions::default().build(vocab.into());
//!     tokenizer.try_tokenize("Hello world!")
//! }
//! ```

mod model_io;
mod model_proto;
pub mod wire;

#[doc(inline)]
pub use model_io::*;
#[doc(inline)]
pub use model_proto::*;

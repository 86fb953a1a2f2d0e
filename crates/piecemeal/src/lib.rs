//! # `piecemeal` Subword Tokenizer Engine
//!
//! This is a ``SentencePiece``-compatible subword tokenizer engine.
//!
//! Given a trained ``.model`` file, `piecemeal` normalizes text, segments
//! it into vocabulary pieces (unigram Viterbi or BPE merges), and maps the
//! pieces to ids; and decodes ids back into text.
//!
//! See:
//! * [`vocab`] to load models, and query the [`Vocabulary`].
//! * [`normalizers`] for text normalization.
//! * [`segmenters`] for the segmentation algorithms.
//! * [`encoders`] to encode text into piece ids.
//! * [`decoders`] to decode piece ids into text.
//! * [`Tokenizer`] for the combined interface.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``rayon``
//! * ``std``
//!
//! #### feature: ``std`` / ``no_std``
//!
//! The "std" feature enables the use of the `std` library;
//! and the "`no_std`" feature enables deps needed when "std" is not enabled.
//! (Negative feature deps are not stable yet.)
//!
//! Loading models from paths and readers requires "std".
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``; which is a performance
//! win on many/(most?) modern CPUs.
//!
//! This is done by the ``types::PMHash{*}`` type alias machinery.
//! See also the ``hashbrown`` dep used by ``no_std``.
//!
//! #### feature: ``foldhash``
//!
//! As ``ahash``, but with ``foldhash``. If both are enabled, ``ahash`` wins.
//!
//! #### feature: ``rayon``
//!
//! This enables batch parallelism wrappers using the ``rayon`` crate.
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//! This is only useful for timing tracing of the library itself.
//!
//! #### feature: ``testing``
//!
//! This exports the synthetic test models and shared encoder / decoder test suites.
//!
//! ## Loading A Model
//!
//! ```rust,no_run
//! use piecemeal::{TokenDecoder, TokenEncoder, TokenizerOptions, load_model_path};
//!
//! fn example() -> piecemeal::PMResult<()> {
//!     type T = u32;
//!
//!     let vocab = load_model_path::<T, _>("tokenizer.model")?;
//!     let tokenizer = TokenizerOptions::default()
//!         .with_parallel(true)
//!         .build(vocab.into());
//!
//!     let ids = tokenizer.try_encode("Hello world!")?;
//!     let text = tokenizer.try_decode(&ids)?;
//!     assert_eq!(text, "Hello world!");
//!     Ok(())
//! }
//! ```
#![warn(missing_docs, unused)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "rayon")]
pub mod rayon;

pub mod decoders;
pub mod encoders;
pub mod errors;
pub mod normalizers;
pub mod segmenters;
pub mod support;
pub mod tokenizer;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use decoders::{TokenDecoder, TokenDecoderOptions};
#[doc(inline)]
pub use encoders::{Token, TokenEncoder, TokenEncoderOptions};
#[doc(inline)]
pub use errors::{ErrorKind, PMError, PMResult};
#[doc(inline)]
pub use tokenizer::{Tokenizer, TokenizerOptions};
#[doc(inline)]
pub use types::TokenType;
#[doc(inline)]
pub use vocab::io::load_model_bytes;
#[cfg(feature = "std")]
#[doc(inline)]
pub use vocab::io::{load_model_path, read_model};
#[doc(inline)]
pub use vocab::{ModelType, PieceType, Vocabulary};

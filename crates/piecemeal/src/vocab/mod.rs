//! # Vocabulary
//!
//! This module provides the piece vocabulary and its model io.
//!
//! ## Pieces
//!
//! A model is an ordered list of [`Piece`]s; a piece's id is its index.
//! Each piece has a [`PieceType`], which decides how it takes part in
//! segmentation and decoding.
//!
//! ## Vocabulary
//!
//! The primary user-oriented vocabulary is [`Vocabulary`], which contains:
//! * `pieces` - the ``{ T -> Piece }`` table,
//! * `index` - a [`PieceTrie`] prefix index over segmentable pieces,
//! * `byte_pieces` - a [`BytePieceMap`], when byte fallback is enabled,
//! * `user_symbols` - a [`UserSymbolMatcher`] over user-defined pieces,
//! * `normalizer` - the [`crate::normalizers::Normalizer`] for encoding.
pub mod io;

pub mod byte_vocab;
pub mod piece;
pub mod piece_trie;
pub mod user_symbols;
pub mod utility;
pub mod vocab_types;
pub mod vocabulary;

#[doc(inline)]
pub use byte_vocab::{BytePieceMap, byte_piece_name, parse_byte_piece};
#[doc(inline)]
pub use piece::Piece;
#[doc(inline)]
pub use piece_trie::PieceTrie;
#[doc(inline)]
pub use user_symbols::UserSymbolMatcher;
#[doc(inline)]
pub use vocab_types::{ModelType, PieceType};
#[doc(inline)]
pub use vocabulary::Vocabulary;

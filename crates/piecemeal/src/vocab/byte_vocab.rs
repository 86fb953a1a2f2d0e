//! # Byte-Fallback Piece Table

use core::fmt::Debug;

use crate::{
    alloc::{format, string::String},
    errors::{PMError, PMResult},
    types::{PMHashMap, TokenType, hash_map_with_capacity},
};

/// Parse a ``<0xXX>`` byte piece into its byte value.
///
/// Exactly two upper-case hex digits are accepted.
pub fn parse_byte_piece(piece: &str) -> Option<u8> {
    let hex = piece.strip_prefix("<0x")?.strip_suffix('>')?;
    if hex.len() != 2 || !hex.bytes().all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b)) {
        return None;
    }
    u8::from_str_radix(hex, 16).ok()
}

/// Format the ``<0xXX>`` piece for a byte value.
pub fn byte_piece_name(byte: u8) -> String {
    format!("<0x{byte:02X}>")
}

/// ``0..=255`` Byte/Piece Bijection Table.
///
/// Maps each raw byte to its ``<0xXX>`` byte-fallback piece id, and back.
/// The ids are not required to be dense or ordered.
#[derive(Clone, PartialEq)]
pub struct BytePieceMap<T: TokenType> {
    /// Hash map from piece id to byte value.
    token_bytes: PMHashMap<T, u8>,

    /// Table mapping from byte value (position) to piece id.
    byte_tokens: [T; 256],
}

impl<T: TokenType> Debug for BytePieceMap<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("BytePieceMap")
            .field("first", &self.byte_tokens[0])
            .field("last", &self.byte_tokens[255])
            .finish()
    }
}

impl<T: TokenType> BytePieceMap<T> {
    /// Build the table from ``(byte, id)`` pairs.
    ///
    /// ## Arguments
    /// * `pairs` - Every byte piece found in the vocabulary.
    ///
    /// ## Returns
    /// The table, or an error unless every byte appears exactly once.
    pub fn from_pairs<I>(pairs: I) -> PMResult<Self>
    where
        I: IntoIterator<Item = (u8, T)>,
    {
        let mut seen = [false; 256];
        let mut byte_tokens = [T::zero(); 256];
        let mut token_bytes: PMHashMap<T, u8> = hash_map_with_capacity(256);

        for (byte, token) in pairs {
            if seen[byte as usize] {
                return Err(PMError::malformed(format!(
                    "duplicate byte piece {}",
                    byte_piece_name(byte)
                )));
            }
            seen[byte as usize] = true;
            byte_tokens[byte as usize] = token;
            token_bytes.insert(token, byte);
        }

        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(PMError::malformed(format!(
                "byte fallback requires all 256 byte pieces; missing {}",
                byte_piece_name(missing as u8)
            )));
        }

        Ok(Self {
            token_bytes,
            byte_tokens,
        })
    }

    /// Get the piece id for a byte.
    #[inline(always)]
    pub fn get_token(
        &self,
        byte: u8,
    ) -> T {
        self.byte_tokens[byte as usize]
    }

    /// Get the byte for a piece id, if it is a byte piece.
    #[inline(always)]
    pub fn get_byte(
        &self,
        token: T,
    ) -> Option<u8> {
        self.token_bytes.get(&token).copied()
    }
}

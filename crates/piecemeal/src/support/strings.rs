//! # String Utilities

use crate::alloc::string::String;

/// The word-boundary marker, U+2581 (LOWER ONE EIGHTH BLOCK).
pub const SPACE_SYMBOL: &str = "\u{2581}";

/// Append `bytes` to `out`, replacing each invalid byte with U+FFFD.
///
/// Unlike [`String::from_utf8_lossy`], a truncated multibyte sequence
/// yields one replacement per byte, not one per sequence.
pub fn push_utf8_lossy(
    out: &mut String,
    bytes: &[u8],
) {
    let mut rest = bytes;
    while !rest.is_empty() {
        match core::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                return;
            }
            Err(err) => {
                let (valid, tail) = rest.split_at(err.valid_up_to());
                if let Ok(valid) = core::str::from_utf8(valid) {
                    out.push_str(valid);
                }
                out.push(char::REPLACEMENT_CHARACTER);
                rest = &tail[1..];
            }
        }
    }
}

/// Append `piece` to `out`, with every [`SPACE_SYMBOL`] replaced by `' '`.
pub fn push_unescaped(
    out: &mut String,
    piece: &str,
) {
    let mut parts = piece.split(SPACE_SYMBOL);
    if let Some(first) = parts.next() {
        out.push_str(first);
    }
    for part in parts {
        out.push(' ');
        out.push_str(part);
    }
}

/// The byte length of the first char of `text`, or 0 if empty.
#[inline(always)]
pub fn first_char_len(text: &str) -> usize {
    text.chars().next().map_or(0, char::len_utf8)
}

//! # Vocabulary Enums

use crate::{
    alloc::format,
    errors::{PMError, PMResult},
};

/// The type tag of a vocabulary piece.
///
/// The discriminants match the serialized model schema.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "std",
    derive(
        strum_macros::EnumString,
        strum_macros::EnumIter,
        strum_macros::Display
    )
)]
pub enum PieceType {
    /// An ordinary subword piece.
    #[default]
    Normal = 1,

    /// The unknown piece; emitted for uncovered text.
    Unknown = 2,

    /// A control symbol (``<s>``, ``</s>``); never produced from text.
    Control = 3,

    /// A user-defined symbol; always segmented as one piece.
    UserDefined = 4,

    /// A piece reserved by training; never emitted by unigram.
    Unused = 5,

    /// A ``<0xXX>`` byte-fallback piece.
    Byte = 6,
}

impl PieceType {
    /// Decode the serialized enum value.
    pub fn from_proto(value: i32) -> PMResult<Self> {
        Ok(match value {
            1 => Self::Normal,
            2 => Self::Unknown,
            3 => Self::Control,
            4 => Self::UserDefined,
            5 => Self::Unused,
            6 => Self::Byte,
            other => {
                return Err(PMError::malformed(format!("unknown piece type {other}")));
            }
        })
    }

    /// The serialized enum value.
    pub fn to_proto(self) -> i32 {
        self as i32
    }
}

/// The segmentation algorithm family of a model.
///
/// The discriminants match the serialized model schema.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "std",
    derive(
        strum_macros::EnumString,
        strum_macros::EnumIter,
        strum_macros::Display
    )
)]
pub enum ModelType {
    /// Unigram language model; Viterbi search.
    #[default]
    Unigram = 1,

    /// Byte-pair encoding; score-ranked merges.
    Bpe = 2,

    /// Whole whitespace-delimited words.
    Word = 3,

    /// Single characters.
    Char = 4,
}

impl ModelType {
    /// Decode the serialized enum value.
    pub fn from_proto(value: i32) -> PMResult<Self> {
        Ok(match value {
            1 => Self::Unigram,
            2 => Self::Bpe,
            3 => Self::Word,
            4 => Self::Char,
            other => {
                return Err(PMError::malformed(format!("unknown model type {other}")));
            }
        })
    }

    /// The serialized enum value.
    pub fn to_proto(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_type_proto() {
        for value in 1..=6 {
            assert_eq!(PieceType::from_proto(value).unwrap().to_proto(), value);
        }
        assert!(PieceType::from_proto(0).is_err());
        assert!(PieceType::from_proto(7).is_err());
        assert_eq!(PieceType::default(), PieceType::Normal);
    }

    #[test]
    fn test_model_type_proto() {
        assert_eq!(ModelType::from_proto(2).unwrap(), ModelType::Bpe);
        assert!(ModelType::from_proto(-1).is_err());
        assert_eq!(ModelType::default(), ModelType::Unigram);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_strum_names() {
        use core::str::FromStr;

        use strum::IntoEnumIterator;

        assert_eq!(ModelType::iter().count(), 4);
        assert_eq!(ModelType::from_str("Bpe").unwrap(), ModelType::Bpe);
        assert_eq!(PieceType::UserDefined.to_string(), "UserDefined");
    }
}

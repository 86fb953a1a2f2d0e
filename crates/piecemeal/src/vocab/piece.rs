//! # Vocabulary Piece

use crate::{alloc::string::String, types::TokenType, vocab::PieceType};

/// A single vocabulary entry.
///
/// ## Style Hints
/// Instance names should prefer `piece`.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece<T: TokenType> {
    id: T,
    text: String,
    score: f32,
    kind: PieceType,
}

impl<T: TokenType> Piece<T> {
    /// Create a new piece.
    pub fn new<S: Into<String>>(
        id: T,
        text: S,
        score: f32,
        kind: PieceType,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            score,
            kind,
        }
    }

    /// The dense id of this piece.
    pub fn id(&self) -> T {
        self.id
    }

    /// The piece content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The piece score (log-probability, or merge priority for BPE).
    pub fn score(&self) -> f32 {
        self.score
    }

    /// The piece type tag.
    pub fn kind(&self) -> PieceType {
        self.kind
    }

    /// Is this a [`PieceType::Normal`] piece?
    pub fn is_normal(&self) -> bool {
        self.kind == PieceType::Normal
    }

    /// Is this a [`PieceType::Unknown`] piece?
    pub fn is_unknown(&self) -> bool {
        self.kind == PieceType::Unknown
    }

    /// Is this a [`PieceType::Control`] piece?
    pub fn is_control(&self) -> bool {
        self.kind == PieceType::Control
    }

    /// Is this a [`PieceType::UserDefined`] piece?
    pub fn is_user_defined(&self) -> bool {
        self.kind == PieceType::UserDefined
    }

    /// Is this a [`PieceType::Unused`] piece?
    pub fn is_unused(&self) -> bool {
        self.kind == PieceType::Unused
    }

    /// Is this a [`PieceType::Byte`] piece?
    pub fn is_byte(&self) -> bool {
        self.kind == PieceType::Byte
    }
}

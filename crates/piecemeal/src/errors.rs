//! # Error Types

use crate::alloc::string::String;

/// The coarse classification of a [`PMError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The model bytes are corrupt, truncated, or inconsistent.
    MalformedModel,

    /// The input text is not valid UTF-8.
    InvalidEncoding,

    /// A token id is outside of the vocabulary range.
    InvalidTokenId,

    /// The segmentation lattice has no path to the end of the input.
    Unreachable,

    /// An I/O failure while reading a model.
    Io,
}

/// Errors from piecemeal operations.
#[derive(Debug, thiserror::Error)]
pub enum PMError {
    /// Model data does not match the expected schema.
    #[error("malformed model: {0}")]
    MalformedModel(String),

    /// Input bytes are not valid UTF-8.
    #[error("invalid UTF-8 input (valid up to byte {valid_up_to})")]
    InvalidEncoding {
        /// The length of the valid UTF-8 prefix.
        valid_up_to: usize,
    },

    /// Decode of an id outside of ``[0, vocab_size)``.
    #[error("token id {id} out of range for vocab size {vocab_size}")]
    InvalidTokenId {
        /// The offending id.
        id: usize,

        /// The size of the vocabulary.
        vocab_size: usize,
    },

    /// No segmentation path reaches the given normalized byte position.
    #[error("no segmentation path reaches position {position}")]
    Unreachable {
        /// The unreachable normalized byte offset.
        position: usize,
    },

    /// I/O error.
    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PMError {
    /// Build a [`PMError::MalformedModel`] from a message.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::MalformedModel(msg.into())
    }

    /// The [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedModel(_) => ErrorKind::MalformedModel,
            Self::InvalidEncoding { .. } => ErrorKind::InvalidEncoding,
            Self::InvalidTokenId { .. } => ErrorKind::InvalidTokenId,
            Self::Unreachable { .. } => ErrorKind::Unreachable,
            #[cfg(feature = "std")]
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<core::str::Utf8Error> for PMError {
    fn from(err: core::str::Utf8Error) -> Self {
        Self::InvalidEncoding {
            valid_up_to: err.valid_up_to(),
        }
    }
}

/// Result type for piecemeal operations.
pub type PMResult<T> = core::result::Result<T, PMError>;

//! # Support Utilities

pub mod byte_trie;
pub mod strings;
pub mod traits;

//! # Vocab Support Tooling

#[cfg(any(test, feature = "testing"))]
pub mod testing;

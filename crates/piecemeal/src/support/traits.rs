//! # Trait Checks

/// Check, at compile time, that a value is `Send` and `Sync`.
pub fn static_is_send_sync_check<S: Send + Sync + ?Sized>(_: &S) {}

//! # Text Normalization
//!
//! Text is normalized before segmentation, by a [`Normalizer`] built from
//! the model's normalizer spec:
//!
//! * [`NormalizationRules`] - the substring replacement table, decoded from
//!   the model's precompiled character map (see [`darts`]), a rule TSV,
//!   or a Unicode form fallback.
//! * [`Normalizer`] - rules, whitespace folding, dummy prefix, escaping;
//!   producing a [`NormalizedText`] with source offsets.

pub mod darts;
mod normalizer;
mod rule_set;

#[doc(inline)]
pub use normalizer::*;
#[doc(inline)]
pub use rule_set::*;

//! # Normalization Rule Set

use unicode_normalization::{UnicodeNormalization, char::canonical_combining_class};

use crate::{
    alloc::{format, string::String, vec::Vec},
    errors::{PMError, PMResult},
    normalizers::darts::decode_charsmap,
    support::byte_trie::ByteTrie,
    vocab::io::NormalizerSpec,
};

/// Unicode normalization applied when a model names a form but ships no rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "std",
    derive(
        strum_macros::EnumString,
        strum_macros::EnumIter,
        strum_macros::Display
    )
)]
pub enum UnicodeFallback {
    /// ``nfkc``
    #[cfg_attr(feature = "std", strum(serialize = "nfkc"))]
    Nfkc,

    /// ``nmt_nfkc``: NFKC, with control whitespace mapped to space and
    /// other control chars removed.
    #[cfg_attr(feature = "std", strum(serialize = "nmt_nfkc"))]
    NmtNfkc,

    /// ``nfkc_cf``: NFKC, then lower-cased.
    #[cfg_attr(feature = "std", strum(serialize = "nfkc_cf"))]
    NfkcCf,

    /// ``nmt_nfkc_cf``
    #[cfg_attr(feature = "std", strum(serialize = "nmt_nfkc_cf"))]
    NmtNfkcCf,
}

impl UnicodeFallback {
    /// Select the fallback for a normalizer name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "nfkc" => Some(Self::Nfkc),
            "nmt_nfkc" => Some(Self::NmtNfkc),
            "nfkc_cf" => Some(Self::NfkcCf),
            "nmt_nfkc_cf" => Some(Self::NmtNfkcCf),
            _ => None,
        }
    }

    fn is_nmt(self) -> bool {
        matches!(self, Self::NmtNfkc | Self::NmtNfkcCf)
    }

    fn is_case_folded(self) -> bool {
        matches!(self, Self::NfkcCf | Self::NmtNfkcCf)
    }

    /// Normalize the segment at the start of `text`.
    ///
    /// A segment is one char and the combining marks which follow it.
    fn normalize_prefix(
        self,
        text: &str,
        out: &mut String,
    ) -> Option<usize> {
        let mut chars = text.char_indices();
        let (_, first) = chars.next()?;
        let len = chars
            .find(|&(_, c)| canonical_combining_class(c) == 0)
            .map_or(text.len(), |(idx, _)| idx);
        let segment = &text[..len];

        if self.is_nmt() && len == first.len_utf8() && first.is_control() {
            if matches!(first, '\t' | '\n' | '\u{0b}' | '\u{0c}' | '\r' | '\u{85}') {
                out.push(' ');
            }
            return Some(len);
        }

        if self.is_case_folded() {
            out.extend(segment.nfkc().flat_map(char::to_lowercase));
        } else {
            out.extend(segment.nfkc());
        }
        if out.as_str() == segment {
            out.clear();
            return None;
        }
        Some(len)
    }
}

/// An ordered substring replacement table.
///
/// Rules apply greedily left to right, longest source first.
///
/// ## Style Hints
/// Instance names should prefer `rules`.
#[derive(Debug, Clone, Default)]
pub struct NormalizationRules {
    trie: ByteTrie<u32>,
    replacements: Vec<String>,
    fallback: Option<UnicodeFallback>,
}

impl NormalizationRules {
    /// A rule set which changes nothing.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Build a rule set from ``(source, replacement)`` pairs.
    ///
    /// Later duplicates replace earlier ones; empty sources are rejected.
    pub fn from_pairs<I, S, R>(pairs: I) -> PMResult<Self>
    where
        I: IntoIterator<Item = (S, R)>,
        S: AsRef<str>,
        R: Into<String>,
    {
        let mut rules = Self::default();
        for (source, replacement) in pairs {
            let source = source.as_ref();
            if source.is_empty() {
                return Err(PMError::malformed("normalization rule with empty source"));
            }
            let idx = rules.replacements.len() as u32;
            match rules.trie.insert(source.as_bytes(), idx) {
                Some(previous) => {
                    rules.replacements[previous as usize] = replacement.into();
                    rules.trie.insert(source.as_bytes(), previous);
                }
                None => rules.replacements.push(replacement.into()),
            }
        }
        Ok(rules)
    }

    /// Build a Unicode-form rule set, with no table.
    pub fn from_fallback(fallback: UnicodeFallback) -> Self {
        Self {
            fallback: Some(fallback),
            ..Self::default()
        }
    }

    /// Build the rule set a normalizer spec describes.
    ///
    /// Precedence: the precompiled char map; then the rule TSV; then a
    /// Unicode form selected by name; else identity.
    pub fn from_spec(spec: &NormalizerSpec) -> PMResult<Self> {
        if !spec.precompiled_charsmap.is_empty() {
            let rules = Self::from_pairs(decode_charsmap(&spec.precompiled_charsmap)?)?;
            log::debug!(
                "normalizer {:?}: {} precompiled rules",
                spec.name,
                rules.len()
            );
            return Ok(rules);
        }

        if !spec.normalization_rule_tsv.is_empty() {
            let rules = Self::from_pairs(parse_rule_tsv(&spec.normalization_rule_tsv)?)?;
            log::debug!("normalizer {:?}: {} tsv rules", spec.name, rules.len());
            return Ok(rules);
        }

        match UnicodeFallback::from_name(&spec.name) {
            Some(fallback) => {
                log::debug!(
                    "normalizer {:?}: no rule table; using Unicode fallback",
                    spec.name
                );
                Ok(Self::from_fallback(fallback))
            }
            None => {
                if !matches!(spec.name.as_str(), "" | "identity") {
                    log::warn!(
                        "normalizer {:?} has no rules and no known Unicode form; using identity",
                        spec.name
                    );
                }
                Ok(Self::identity())
            }
        }
    }

    /// The number of table rules.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Does this rule set never change text?
    pub fn is_identity(&self) -> bool {
        self.is_empty() && self.fallback.is_none()
    }

    /// The Unicode fallback, if any.
    pub fn fallback(&self) -> Option<UnicodeFallback> {
        self.fallback
    }

    /// Normalize the start of `text`.
    ///
    /// ## Arguments
    /// * `text` - The remaining input; must be non-empty.
    /// * `out` - Receives the replacement; must be empty.
    ///
    /// ## Returns
    /// The number of source bytes consumed, or `None` if no rule applies
    /// (in which case `out` is left empty).
    #[inline]
    pub fn normalize_prefix(
        &self,
        text: &str,
        out: &mut String,
    ) -> Option<usize> {
        if let Some((idx, len)) = self.trie.longest_prefix(text.as_bytes()) {
            out.push_str(&self.replacements[idx as usize]);
            return Some(len);
        }
        self.fallback?.normalize_prefix(text, out)
    }

    /// Apply the rules to the whole of `text`.
    pub fn apply(
        &self,
        text: &str,
    ) -> String {
        if self.is_identity() {
            return String::from(text);
        }

        let mut out = String::with_capacity(text.len());
        let mut scratch = String::new();
        let mut rest = text;
        while let Some(c) = rest.chars().next() {
            scratch.clear();
            match self.normalize_prefix(rest, &mut scratch) {
                Some(consumed) => {
                    out.push_str(&scratch);
                    rest = &rest[consumed..];
                }
                None => {
                    out.push(c);
                    rest = &rest[c.len_utf8()..];
                }
            }
        }
        out
    }
}

/// Parse a rule TSV.
///
/// Each line is ``source<TAB>replacement[<TAB>comment]``, where both
/// columns are space-separated hex code points (optionally ``U+`` prefixed).
/// Blank lines and ``#`` comments are skipped; an empty replacement deletes.
pub fn parse_rule_tsv(tsv: &str) -> PMResult<Vec<(String, String)>> {
    fn parse_codepoints(
        column: &str,
        line_no: usize,
    ) -> PMResult<String> {
        column
            .split_whitespace()
            .map(|hex| {
                let hex = hex.trim_start_matches("U+");
                u32::from_str_radix(hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        PMError::malformed(format!(
                            "rule tsv line {line_no}: bad code point {hex:?}"
                        ))
                    })
            })
            .collect()
    }

    let mut rules = Vec::new();
    for (idx, line) in tsv.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let mut columns = line.split('\t');
        let source = parse_codepoints(columns.next().unwrap_or_default(), line_no)?;
        let replacement = parse_codepoints(columns.next().unwrap_or_default(), line_no)?;
        if source.is_empty() {
            return Err(PMError::malformed(format!(
                "rule tsv line {line_no}: empty source"
            )));
        }
        rules.push((source, replacement));
    }
    Ok(rules)
}

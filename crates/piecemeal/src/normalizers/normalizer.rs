//! # Text Normalizer

use crate::{
    alloc::{string::String, vec::Vec},
    errors::PMResult,
    normalizers::NormalizationRules,
    support::strings::{SPACE_SYMBOL, push_unescaped},
    vocab::{UserSymbolMatcher, io::NormalizerSpec},
};

/// Normalized text, with its alignment to the source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText {
    /// The normalized text.
    pub text: String,

    /// ``offsets[i]`` is the source byte offset of normalized byte ``i``.
    ///
    /// There is one trailing entry, for the end of the text;
    /// so ``offsets.len() == text.len() + 1``.
    pub offsets: Vec<usize>,
}

impl NormalizedText {
    /// The source byte range covered by the normalized range ``start..end``.
    pub fn source_range(
        &self,
        start: usize,
        end: usize,
    ) -> core::ops::Range<usize> {
        self.offsets[start]..self.offsets[end].max(self.offsets[start])
    }
}

/// Rule-based text normalizer.
///
/// Applies, prefix by prefix:
/// 1. user-defined symbols pass through unchanged;
/// 2. otherwise the longest normalization rule (or Unicode form) applies;
/// 3. whitespace folding: leading/trailing spaces dropped, runs collapsed;
/// 4. the dummy prefix space, and ``' ' -> '▁'`` escaping.
///
/// ## Style Hints
/// Instance names should prefer `normalizer`.
#[derive(Debug, Clone)]
pub struct Normalizer {
    rules: NormalizationRules,
    user_symbols: UserSymbolMatcher,
    add_dummy_prefix: bool,
    remove_extra_whitespaces: bool,
    escape_whitespaces: bool,
    treat_whitespace_as_suffix: bool,
}

impl Normalizer {
    /// Build a normalizer.
    ///
    /// ## Arguments
    /// * `spec` - The normalizer spec; its rule table is validated here.
    /// * `user_symbols` - Symbols which bypass normalization.
    /// * `treat_whitespace_as_suffix` - Put the dummy space at the end.
    pub fn from_spec(
        spec: &NormalizerSpec,
        user_symbols: UserSymbolMatcher,
        treat_whitespace_as_suffix: bool,
    ) -> PMResult<Self> {
        Ok(Self {
            rules: NormalizationRules::from_spec(spec)?,
            user_symbols,
            add_dummy_prefix: spec.add_dummy_prefix,
            remove_extra_whitespaces: spec.remove_extra_whitespaces,
            escape_whitespaces: spec.escape_whitespaces,
            treat_whitespace_as_suffix,
        })
    }

    /// The rule set.
    pub fn rules(&self) -> &NormalizationRules {
        &self.rules
    }

    /// Is a virtual space added to the input?
    pub fn add_dummy_prefix(&self) -> bool {
        self.add_dummy_prefix
    }

    /// Are extra whitespaces removed?
    pub fn remove_extra_whitespaces(&self) -> bool {
        self.remove_extra_whitespaces
    }

    /// Are spaces escaped to ``▁``?
    pub fn escape_whitespaces(&self) -> bool {
        self.escape_whitespaces
    }

    /// Is the dummy space a suffix rather than a prefix?
    pub fn treat_whitespace_as_suffix(&self) -> bool {
        self.treat_whitespace_as_suffix
    }

    /// Does decoding strip the dummy space from the edge of the text?
    pub fn strips_dummy_space(&self) -> bool {
        self.add_dummy_prefix || self.remove_extra_whitespaces
    }

    /// Normalize the longest prefix of `text` which some rule covers.
    ///
    /// Returns the number of consumed bytes; `out` receives the output.
    fn normalize_prefix(
        &self,
        text: &str,
        out: &mut String,
    ) -> usize {
        out.clear();
        if let Some(len) = self.user_symbols.prefix_len(text) {
            out.push_str(&text[..len]);
            return len;
        }
        if let Some(len) = self.rules.normalize_prefix(text, out) {
            return len;
        }
        let len = text.chars().next().map_or(0, char::len_utf8);
        out.push_str(&text[..len]);
        len
    }

    fn push_space(
        &self,
        out: &mut NormalizedText,
        consumed: usize,
    ) {
        if self.escape_whitespaces {
            out.text.push_str(SPACE_SYMBOL);
            out.offsets.extend([consumed; SPACE_SYMBOL.len()]);
        } else {
            out.text.push(' ');
            out.offsets.push(consumed);
        }
    }

    /// Normalize `text` for segmentation.
    ///
    /// ## Arguments
    /// * `text` - The source text.
    ///
    /// ## Returns
    /// The normalized text (including the dummy space and ``▁`` escapes),
    /// with per-byte source offsets.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    pub fn normalize(
        &self,
        text: &str,
    ) -> NormalizedText {
        let mut out = NormalizedText {
            text: String::with_capacity(text.len() * 3 / 2 + 4),
            offsets: Vec::with_capacity(text.len() * 3 / 2 + 5),
        };

        let mut input = text;
        let mut consumed = 0;
        let mut piece = String::new();

        if self.remove_extra_whitespaces {
            while !input.is_empty() {
                let len = self.normalize_prefix(input, &mut piece);
                if piece != " " {
                    break;
                }
                input = &input[len..];
                consumed += len;
            }
        }

        if input.is_empty() {
            out.offsets.push(consumed);
            return out;
        }

        if self.add_dummy_prefix && !self.treat_whitespace_as_suffix {
            self.push_space(&mut out, consumed);
        }

        let mut is_prev_space = self.remove_extra_whitespaces;
        while !input.is_empty() {
            let len = self.normalize_prefix(input, &mut piece);

            let mut data = piece.as_str();
            while is_prev_space && data.starts_with(' ') {
                data = &data[1..];
            }

            if !data.is_empty() {
                for c in data.chars() {
                    if self.escape_whitespaces && c == ' ' {
                        out.text.push_str(SPACE_SYMBOL);
                        out.offsets.extend([consumed; SPACE_SYMBOL.len()]);
                    } else {
                        out.text.push(c);
                        out.offsets.extend(core::iter::repeat_n(consumed, c.len_utf8()));
                    }
                }
                is_prev_space = data.ends_with(' ');
            }

            consumed += len;
            input = &input[len..];
            if !self.remove_extra_whitespaces {
                is_prev_space = false;
            }
        }

        if self.remove_extra_whitespaces {
            let space = if self.escape_whitespaces {
                SPACE_SYMBOL
            } else {
                " "
            };
            while out.text.ends_with(space) {
                let len = out.text.len() - space.len();
                consumed = out.offsets[len];
                out.text.truncate(len);
                out.offsets.truncate(len);
            }
        }

        if self.add_dummy_prefix && self.treat_whitespace_as_suffix {
            self.push_space(&mut out, consumed);
        }

        out.offsets.push(consumed);
        out
    }

    /// Validate `bytes` as UTF-8, and [`normalize`](Self::normalize) them.
    pub fn normalize_bytes(
        &self,
        bytes: &[u8],
    ) -> PMResult<NormalizedText> {
        Ok(self.normalize(core::str::from_utf8(bytes)?))
    }

    /// Normalize `text` to its human-readable form.
    ///
    /// This is the text which decoding a full-coverage encoding of `text`
    /// reproduces: the dummy space is dropped and ``▁`` becomes ``' '``.
    ///
    /// It is idempotent, except on text holding a literal ``▁``: that becomes
    /// a space, which a second pass may fold away. ``"▁a"`` gives ``" a"``,
    /// which gives ``"a"``.
    pub fn normalize_text(
        &self,
        text: &str,
    ) -> String {
        let normalized = self.normalize(text).text;
        let mut body = normalized.as_str();
        if self.strips_dummy_space() {
            body = if self.treat_whitespace_as_suffix {
                body.strip_suffix(SPACE_SYMBOL).unwrap_or(body)
            } else {
                body.strip_prefix(SPACE_SYMBOL).unwrap_or(body)
            };
        }

        let mut out = String::with_capacity(body.len());
        push_unescaped(&mut out, body);
        out
    }
}

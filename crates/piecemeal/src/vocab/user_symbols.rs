//! # User-Defined Symbol Matcher

use aho_corasick::{AhoCorasick, Anchored, Input, MatchKind, StartKind};

use crate::{
    alloc::{format, vec::Vec},
    errors::{PMError, PMResult},
};

/// Anchored longest-match over the user-defined symbols of a model.
///
/// User-defined symbols bypass normalization and are never split by a
/// segmenter.
#[derive(Debug, Clone, Default)]
pub struct UserSymbolMatcher {
    automaton: Option<AhoCorasick>,
}

impl UserSymbolMatcher {
    /// Build a matcher; an empty symbol list yields a matcher which never matches.
    pub fn new<I, S>(symbols: I) -> PMResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let symbols: Vec<S> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Ok(Self::default());
        }

        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .start_kind(StartKind::Anchored)
            .build(&symbols)
            .map_err(|e| PMError::malformed(format!("user-defined symbols: {e}")))?;

        Ok(Self {
            automaton: Some(automaton),
        })
    }

    /// Are there no symbols?
    pub fn is_empty(&self) -> bool {
        self.automaton.is_none()
    }

    /// The byte length of the longest symbol which is a prefix of `text`.
    #[inline]
    pub fn prefix_len(
        &self,
        text: &str,
    ) -> Option<usize> {
        let automaton = self.automaton.as_ref()?;
        automaton
            .find(Input::new(text).anchored(Anchored::Yes))
            .map(|m| m.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_len() {
        let matcher = UserSymbolMatcher::new(["<start_of_turn>", "<start>", "@@"]).unwrap();
        assert!(!matcher.is_empty());

        assert_eq!(matcher.prefix_len("<start_of_turn> Hello"), Some(15));
        assert_eq!(matcher.prefix_len("<start> x"), Some(7));
        assert_eq!(matcher.prefix_len("@@@"), Some(2));
        assert_eq!(matcher.prefix_len(" <start>"), None);
        assert_eq!(matcher.prefix_len(""), None);
    }

    #[test]
    fn test_empty_matcher() {
        let matcher = UserSymbolMatcher::new(core::iter::empty::<&str>()).unwrap();
        assert!(matcher.is_empty());
        assert_eq!(matcher.prefix_len("anything"), None);
    }
}

//! Term extraction for free-text college queries.
//!
//! A query like "Show me the best engineering colleges in Delhi" carries two
//! useful words. Everything else is filler that would only shrink the
//! result set once the filter demands every term, so it is dropped here.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Words that never narrow a college search.
///
/// Kept verbatim: changing this list changes which records match.
pub const STOP_WORDS: [&str; 13] = [
    "show", "me", "best", "in", "the", "of", "and", "for", "colleges", "college", "at", "top",
    "list",
];

/// Tokens must be strictly longer than this to survive
pub const MIN_TERM_LEN: usize = 2;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-zA-Z0-9_]+").expect("non-word pattern is valid")
});

/// The normalized search terms of one query.
///
/// Set semantics: order is irrelevant and duplicates collapse. A BTreeSet
/// keeps iteration deterministic, which makes logs and prompts stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerms {
    terms: BTreeSet<String>,
}

impl SearchTerms {
    /// Extract the significant terms of `query`.
    ///
    /// ## Algorithm
    /// 1. Lowercase the query
    /// 2. Split on runs of non-word characters
    /// 3. Drop tokens of length <= 2
    /// 4. Drop stop words
    pub fn extract(query: &str) -> Self {
        let lowered = query.to_lowercase();
        let terms: BTreeSet<String> = NON_WORD
            .split(&lowered)
            .filter(|token| token.len() > MIN_TERM_LEN)
            .filter(|token| !STOP_WORDS.contains(token))
            .map(str::to_string)
            .collect();

        tracing::debug!("Extracted {} search terms from query", terms.len());
        Self { terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    /// Terms in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SearchTerms {
    /// Build a term set directly, bypassing normalization (tests, tooling)
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Convenience wrapper around [`SearchTerms::extract`]
pub fn extract(query: &str) -> SearchTerms {
    SearchTerms::extract(query)
}

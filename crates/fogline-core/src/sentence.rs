//! Sentence splitting with abbreviation and ellipsis awareness.
//!
//! Splitting runs in two passes over the untouched input:
//!
//! 1. Collect candidate boundaries: byte offsets just after `.`, `?`, `!` or a
//!    run of line breaks (plus an optional closing `"`, `'`, `)`, `]` or `}`)
//!    that is followed by whitespace.
//! 2. Drop candidates that close an ellipsis, a dotted abbreviation such as
//!    `U.S.` followed by lower-case text, or a known abbreviation from the
//!    [`AbbreviationSet`].
//!
//! The text is then cut at the surviving offsets. A line break followed by
//! whitespace always counts as a boundary, so hand-wrapped prose splits at
//! every wrap.
//!
//! ```
//! use fogline_core::dictionaries::abbreviations::AbbreviationSet;
//! use fogline_core::sentence::sentences;
//!
//! let set = AbbreviationSet::seeded();
//! let found = sentences("Ask Dr. Smith about Baker St. in London. He is nice.", &set);
//! assert_eq!(found, vec!["Ask Dr. Smith about Baker St. in London.", "He is nice."]);
//! ```

use std::collections::HashSet;
use std::sync::{LazyLock, PoisonError, RwLock};

use regex::Regex;

use crate::dictionaries::abbreviations::AbbreviationSet;

/// Terminal punctuation or line breaks, an optional closer, then whitespace.
/// Group 1 ends where the boundary goes.
static END_OF_SENTENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"((?:[.?!]|[\r\n]+)(?:"|'|\)|\]|\})?)[[:space:]]+"#).expect("valid regex")
});

/// Dotted abbreviations (`e.g.`, `U.S.S.R.`) followed by lower-case or digits.
/// Group 1 ends at the final period.
static DOTTED_ABBREVIATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([[:space:]](?:[[:word:]]\.){2,})[[:space:]]+[a-z0-9]").expect("valid regex")
});

/// Process-wide default set used by [`split_sentences`].
static DEFAULT_ABBREVIATIONS: LazyLock<RwLock<AbbreviationSet>> =
    LazyLock::new(|| RwLock::new(AbbreviationSet::seeded()));

/// Sentence splitter bound to one abbreviation set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceSplitter {
    abbreviations: AbbreviationSet,
}

impl SentenceSplitter {
    /// Create a splitter using `abbreviations`.
    pub const fn new(abbreviations: AbbreviationSet) -> Self {
        Self { abbreviations }
    }

    /// The abbreviation set in use.
    pub const fn abbreviations(&self) -> &AbbreviationSet {
        &self.abbreviations
    }

    /// Mutable access to the abbreviation set.
    pub const fn abbreviations_mut(&mut self) -> &mut AbbreviationSet {
        &mut self.abbreviations
    }

    /// Split `text` into sentences.
    pub fn split(&self, text: &str) -> Vec<String> {
        sentences(text, &self.abbreviations)
    }

    /// Byte offsets at which `text` is cut into sentences.
    pub fn boundaries(&self, text: &str) -> Vec<usize> {
        boundaries(text, &self.abbreviations)
    }
}

/// Split `text` into trimmed, non-empty sentences in document order.
#[tracing::instrument(skip_all, fields(text_len = text.len(), abbreviations = abbreviations.len()))]
pub fn sentences(text: &str, abbreviations: &AbbreviationSet) -> Vec<String> {
    let cuts = boundaries(text, abbreviations);

    let mut result = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for end in cuts.into_iter().chain(std::iter::once(text.len())) {
        let sentence = text[start..end].trim();
        if !sentence.is_empty() {
            result.push(sentence.to_string());
        }
        start = end;
    }
    result
}

/// Byte offsets of confirmed sentence boundaries, ascending.
///
/// Every offset sits on a character boundary directly after the terminal
/// punctuation (and closing quote or bracket, if any).
pub fn boundaries(text: &str, abbreviations: &AbbreviationSet) -> Vec<usize> {
    let candidates: Vec<usize> = END_OF_SENTENCE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.end())
        .collect();
    if candidates.is_empty() {
        return candidates;
    }

    let mut suppressed: HashSet<usize> = DOTTED_ABBREVIATION
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.end())
        .collect();
    if let Some(matcher) = abbreviations.matcher() {
        suppressed.extend(matcher.find_iter(text).map(|m| m.end()));
    }

    candidates
        .into_iter()
        .filter(|&pos| !closes_ellipsis(text, pos) && !suppressed.contains(&pos))
        .collect()
}

/// Two or more periods right before the boundary.
fn closes_ellipsis(text: &str, pos: usize) -> bool {
    text[..pos].ends_with("..")
}

/// Split `text` using a snapshot of the process-wide default abbreviations.
pub fn split_sentences(text: &str) -> Vec<String> {
    sentences(text, &default_abbreviations())
}

/// Snapshot of the process-wide default abbreviation set.
pub fn default_abbreviations() -> AbbreviationSet {
    DEFAULT_ABBREVIATIONS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Append to the process-wide default set and return its entries.
///
/// Affects every later [`split_sentences`] call in this process; callers
/// that need isolation should pass their own [`AbbreviationSet`] to
/// [`sentences`] or call [`reset_abbreviations`] afterwards.
pub fn add_abbreviations<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = DEFAULT_ABBREVIATIONS
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    set.extend(words);
    tracing::debug!(entries = set.len(), "extended default abbreviations");
    set.entries().to_vec()
}

/// Restore the process-wide default set to the built-in seed lists.
pub fn reset_abbreviations() {
    *DEFAULT_ABBREVIATIONS
        .write()
        .unwrap_or_else(PoisonError::into_inner) = AbbreviationSet::seeded();
}

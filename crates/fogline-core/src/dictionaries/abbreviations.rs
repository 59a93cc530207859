//! Abbreviation dictionary for sentence boundary detection.
//!
//! An [`AbbreviationSet`] lists tokens that do not end a sentence when they
//! are followed by a period. The set keeps a compiled, case-insensitive
//! matcher in step with its entries: every mutation rebuilds it.

use regex::Regex;

/// Titles and honorifics.
pub const TITLES: &[&str] = &[
    "jr", "mr", "mrs", "ms", "dr", "prof", "sr", "sen", "rep", "rev", "gov", "atty", "supt", "det",
    "rev", "col", "gen", "lt", "cmdr", "adm", "capt", "sgt", "cpl", "maj",
];

/// Organizations and institutions.
pub const ENTITIES: &[&str] = &[
    "dept", "univ", "uni", "assn", "bros", "inc", "ltd", "co", "corp", "plc",
];

/// Month names.
pub const MONTHS: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec", "sept",
];

/// Day names.
pub const DAYS: &[&str] = &["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// Street types.
pub const STREETS: &[&str] = &["ave", "bld", "blvd", "cl", "ct", "cres", "dr", "rd", "st"];

/// Everything else.
pub const MISC: &[&str] = &["vs", "etc", "no", "esp", "cf"];

/// Seed categories in the order they populate the default set.
const SEED_LISTS: &[&[&str]] = &[TITLES, ENTITIES, MONTHS, DAYS, STREETS, MISC];

/// Ordered, deduplicated set of lower-case abbreviations.
///
/// The derived matcher finds `<space><abbreviation>.` case-insensitively and
/// is `None` for an empty set, so an empty set never suppresses a boundary.
#[derive(Debug, Clone)]
pub struct AbbreviationSet {
    entries: Vec<String>,
    matcher: Option<Regex>,
}

impl AbbreviationSet {
    /// Create an empty set.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            matcher: None,
        }
    }

    /// Create a set seeded from the built-in category lists.
    pub fn seeded() -> Self {
        let mut set = Self::new();
        set.extend(SEED_LISTS.iter().flat_map(|list| list.iter().copied()));
        set
    }

    /// Append abbreviations, skipping ones already present.
    ///
    /// Entries are lower-cased and stripped of surrounding whitespace and
    /// trailing periods; blank entries are ignored.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.entries.len();
        for word in words {
            let normalized = normalize(word.as_ref());
            if !normalized.is_empty() && !self.entries.contains(&normalized) {
                self.entries.push(normalized);
            }
        }
        if self.entries.len() != before {
            self.rebuild_matcher();
        }
    }

    /// Append one abbreviation. Returns `false` if it was already present.
    pub fn insert(&mut self, word: &str) -> bool {
        let before = self.entries.len();
        self.extend([word]);
        self.entries.len() != before
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.matcher = None;
    }

    /// Check membership, ignoring case and a trailing period.
    pub fn contains(&self, word: &str) -> bool {
        let normalized = normalize(word);
        self.entries.iter().any(|e| *e == normalized)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Number of entries.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no entries.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The compiled `<space><abbreviation>.` matcher, if the set is non-empty.
    pub const fn matcher(&self) -> Option<&Regex> {
        self.matcher.as_ref()
    }

    fn rebuild_matcher(&mut self) {
        if self.entries.is_empty() {
            self.matcher = None;
            return;
        }
        let alternatives: Vec<String> = self.entries.iter().map(|e| regex::escape(e)).collect();
        let pattern = format!(r"(?i) (?:{})\.", alternatives.join("|"));
        // Every alternative is escaped, so the pattern is always well-formed.
        self.matcher = Regex::new(&pattern).ok();
        tracing::trace!(entries = self.entries.len(), "rebuilt abbreviation matcher");
    }
}

impl Default for AbbreviationSet {
    fn default() -> Self {
        Self::seeded()
    }
}

impl PartialEq for AbbreviationSet {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for AbbreviationSet {}

impl<S: AsRef<str>> FromIterator<S> for AbbreviationSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

fn normalize(word: &str) -> String {
    word.trim().trim_end_matches('.').to_lowercase()
}

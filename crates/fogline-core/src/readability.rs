//! Readability statistics: Flesch Reading Ease, Flesch-Kincaid Grade Level
//! and the Gunning Fog Index.
//!
//! A [`ReadabilityReport`] is built once from a text. Paragraphs and
//! sentences are split from the original text independently, then a single
//! pass with the word pattern collects word frequencies, syllable totals and
//! complex-word counts. Every score is derived from those aggregates.
//!
//! Formulas (a ratio with a zero denominator is 0.0):
//!
//! - Flesch: `206.835 - 1.015 * words/sentences - 84.6 * syllables/words`
//! - Kincaid: `11.8 * syllables/words + 0.39 * words/sentences - 15.59`
//! - Fog: `0.4 * (words/sentences + percent complex words)`
//!
//! Higher Flesch means easier text. Kincaid and Fog approximate a US school
//! grade.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dictionaries::abbreviations::AbbreviationSet;
use crate::paragraph;
use crate::sentence;
use crate::syllable::{self, SyllableCounter};

/// A letter followed by letters, hyphens or apostrophes.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b([a-z][a-z\-']*)\b").expect("valid regex"));

/// Words in `text`, in order.
///
/// Numbers and punctuation are skipped. Hyphenated words and contractions
/// stay whole.
pub fn words(text: &str) -> Vec<&str> {
    WORD.find_iter(text).map(|m| m.as_str()).collect()
}

/// Analyze `text` with the default abbreviations and syllable estimator.
pub fn analyze(text: &str) -> ReadabilityReport {
    ReadabilityReport::new(text)
}

/// Word counts that remember first-seen order.
///
/// Keys keep the casing they were found in, so "The" and "the" are counted
/// separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequencies {
    counts: HashMap<String, usize>,
    order: Vec<String>,
}

impl WordFrequencies {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `word`.
    pub fn record(&mut self, word: &str) {
        if let Some(count) = self.counts.get_mut(word) {
            *count += 1;
        } else {
            self.counts.insert(word.to_string(), 1);
            self.order.push(word.to_string());
        }
    }

    /// Occurrences of `word`; 0 if it never appeared.
    pub fn occurrences(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Distinct words in first-seen order.
    pub fn unique_words(&self) -> &[String] {
        &self.order
    }

    /// `(word, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.order
            .iter()
            .map(|w| (w.as_str(), self.occurrences(w)))
    }

    /// `(word, count)` pairs, most frequent first. Ties keep first-seen order.
    pub fn most_frequent(&self) -> Vec<(&str, usize)> {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no word has been recorded.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Readability statistics for one text.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadabilityReport {
    text: String,
    paragraphs: Vec<String>,
    sentences: Vec<String>,
    words: Vec<String>,
    frequencies: WordFrequencies,
    syllables: usize,
    complex_words: usize,
}

impl ReadabilityReport {
    /// Analyze `text` with the process-wide abbreviations and syllable
    /// estimator.
    pub fn new(text: &str) -> Self {
        let abbreviations = sentence::default_abbreviations();
        Self::with_options(text, &abbreviations, syllable::estimator())
    }

    /// Analyze `text` with an explicit abbreviation set and syllable counter.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn with_options(
        text: &str,
        abbreviations: &AbbreviationSet,
        counter: &dyn SyllableCounter,
    ) -> Self {
        let mut report = Self {
            text: text.to_string(),
            paragraphs: paragraph::paragraphs(text),
            sentences: sentence::sentences(text, abbreviations),
            words: Vec::new(),
            frequencies: WordFrequencies::new(),
            syllables: 0,
            complex_words: 0,
        };

        for word in words(text) {
            let n = counter.count(word);
            report.syllables += n;
            if n > 2 && !word.contains('-') {
                report.complex_words += 1;
            }
            report.frequencies.record(word);
            report.words.push(word.to_string());
        }

        tracing::debug!(
            paragraphs = report.paragraphs.len(),
            sentences = report.sentences.len(),
            words = report.words.len(),
            syllables = report.syllables,
            "analyzed text"
        );
        report
    }

    /// The analyzed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Paragraphs in document order.
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// Sentences in document order.
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Every word occurrence in document order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Word frequency table.
    pub const fn frequencies(&self) -> &WordFrequencies {
        &self.frequencies
    }

    /// Number of paragraphs.
    pub fn num_paragraphs(&self) -> usize {
        self.paragraphs.len()
    }

    /// Number of sentences.
    pub fn num_sentences(&self) -> usize {
        self.sentences.len()
    }

    /// Number of words.
    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    /// Number of characters in the text, including whitespace.
    pub fn num_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// Total syllables over all words.
    pub const fn num_syllables(&self) -> usize {
        self.syllables
    }

    /// Words with more than two syllables, excluding hyphenated words.
    pub const fn num_complex_words(&self) -> usize {
        self.complex_words
    }

    /// Number of distinct words.
    pub fn num_unique_words(&self) -> usize {
        self.frequencies.len()
    }

    /// Distinct words in first-seen order.
    pub fn unique_words(&self) -> &[String] {
        self.frequencies.unique_words()
    }

    /// Occurrences of `word`, matched with its exact casing.
    pub fn occurrences(&self, word: &str) -> usize {
        self.frequencies.occurrences(word)
    }

    /// Average words per sentence.
    pub fn words_per_sentence(&self) -> f64 {
        ratio(self.num_words(), self.num_sentences())
    }

    /// Average syllables per word.
    pub fn syllables_per_word(&self) -> f64 {
        ratio(self.syllables, self.num_words())
    }

    /// Percentage of words that are complex.
    pub fn percent_complex(&self) -> f64 {
        100.0 * ratio(self.complex_words, self.num_words())
    }

    /// Flesch Reading Ease. Roughly 0 to 100, higher is easier.
    pub fn flesch(&self) -> f64 {
        1.015f64.mul_add(
            -self.words_per_sentence(),
            84.6f64.mul_add(-self.syllables_per_word(), 206.835),
        )
    }

    /// Flesch-Kincaid Grade Level.
    pub fn kincaid(&self) -> f64 {
        0.39f64.mul_add(
            self.words_per_sentence(),
            11.8 * self.syllables_per_word(),
        ) - 15.59
    }

    /// Gunning Fog Index.
    pub fn fog(&self) -> f64 {
        0.4 * (self.words_per_sentence() + self.percent_complex())
    }

    /// Counts and scores as a serializable value.
    pub fn to_summary(&self) -> ReadabilitySummary {
        ReadabilitySummary {
            paragraphs: self.num_paragraphs(),
            sentences: self.num_sentences(),
            words: self.num_words(),
            characters: self.num_chars(),
            syllables: self.syllables,
            unique_words: self.num_unique_words(),
            complex_words: self.complex_words,
            words_per_sentence: self.words_per_sentence(),
            syllables_per_word: self.syllables_per_word(),
            percent_complex: self.percent_complex(),
            flesch: self.flesch(),
            kincaid: self.kincaid(),
            fog: self.fog(),
        }
    }

    /// Human-readable report of counts and scores.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ReadabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of paragraphs           {}", self.num_paragraphs())?;
        writeln!(f, "Number of sentences            {}", self.num_sentences())?;
        writeln!(f, "Number of words                {}", self.num_words())?;
        writeln!(f, "Number of characters           {}", self.num_chars())?;
        writeln!(f)?;
        writeln!(f, "Average words per sentence     {:.2}", self.words_per_sentence())?;
        writeln!(f, "Average syllables per word     {:.2}", self.syllables_per_word())?;
        writeln!(f)?;
        writeln!(f, "Flesch score                   {:.2}", self.flesch())?;
        writeln!(f, "Flesch-Kincaid grade level     {:.2}", self.kincaid())?;
        writeln!(f, "Fog Index                      {:.2}", self.fog())
    }
}

/// Serializable snapshot of a [`ReadabilityReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilitySummary {
    /// Number of paragraphs.
    pub paragraphs: usize,
    /// Number of sentences.
    pub sentences: usize,
    /// Number of words.
    pub words: usize,
    /// Number of characters, including whitespace.
    pub characters: usize,
    /// Total syllables.
    pub syllables: usize,
    /// Number of distinct words.
    pub unique_words: usize,
    /// Words with more than two syllables, excluding hyphenated words.
    pub complex_words: usize,
    /// Average words per sentence.
    pub words_per_sentence: f64,
    /// Average syllables per word.
    pub syllables_per_word: f64,
    /// Percentage of complex words.
    pub percent_complex: f64,
    /// Flesch Reading Ease.
    pub flesch: f64,
    /// Flesch-Kincaid Grade Level.
    pub kincaid: f64,
    /// Gunning Fog Index.
    pub fog: f64,
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

//! Syllable estimation.
//!
//! Two strategies sit behind the [`SyllableCounter`] trait:
//!
//! - [`Heuristic`] guesses from vowel groups and spelling rules;
//! - [`DictionaryCounter`] asks a [`PronunciationDictionary`] first and falls
//!   back to the heuristic for unlisted words.
//!
//! [`syllables`] uses a process-wide estimator chosen once. Call
//! [`install_dictionary`] at startup to use a dictionary; otherwise the first
//! call reads `FOGLINE_PRONUNCIATION_DICT` and, if that is unset or fails to
//! load, settles on the heuristic.

mod guess;

use std::sync::OnceLock;

use camino::{Utf8Path, Utf8PathBuf};

pub use crate::dictionaries::pronunciation::PronunciationDictionary;
use crate::error::DictionaryResult;
pub use guess::guess;

/// Environment variable naming a dictionary file for the lazy estimator.
pub const DICTIONARY_ENV: &str = "FOGLINE_PRONUNCIATION_DICT";

static ESTIMATOR: OnceLock<Box<dyn SyllableCounter>> = OnceLock::new();

/// Anything that can count the syllables in a word.
pub trait SyllableCounter: Send + Sync {
    /// Syllables in `word`. At least 1 for any word containing a letter.
    fn count(&self, word: &str) -> usize;
}

/// Rule-based estimate, no external data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Heuristic;

impl SyllableCounter for Heuristic {
    fn count(&self, word: &str) -> usize {
        guess(word)
    }
}

/// Dictionary lookup with heuristic fallback.
#[derive(Debug, Clone, Default)]
pub struct DictionaryCounter {
    dictionary: PronunciationDictionary,
}

impl DictionaryCounter {
    /// Wrap a loaded dictionary.
    pub const fn new(dictionary: PronunciationDictionary) -> Self {
        Self { dictionary }
    }

    /// Load the dictionary at `path`.
    pub fn load(path: &Utf8Path) -> DictionaryResult<Self> {
        PronunciationDictionary::load(path).map(Self::new)
    }

    /// The wrapped dictionary.
    pub const fn dictionary(&self) -> &PronunciationDictionary {
        &self.dictionary
    }
}

impl SyllableCounter for DictionaryCounter {
    fn count(&self, word: &str) -> usize {
        match self.dictionary.lookup(word) {
            Ok(n) => n,
            Err(err) => {
                tracing::trace!(%err, "falling back to heuristic");
                guess(word)
            }
        }
    }
}

/// Install a dictionary-backed estimator for the rest of the process.
///
/// Returns `Ok(false)` without loading anything if an estimator was already
/// chosen, either by an earlier call or by a call to [`syllables`].
pub fn install_dictionary(path: &Utf8Path) -> DictionaryResult<bool> {
    if ESTIMATOR.get().is_some() {
        tracing::debug!(path = %path, "syllable estimator already chosen");
        return Ok(false);
    }
    let counter = DictionaryCounter::load(path)?;
    Ok(ESTIMATOR.set(Box::new(counter)).is_ok())
}

/// The process-wide estimator, initializing it on first use.
pub fn estimator() -> &'static dyn SyllableCounter {
    ESTIMATOR.get_or_init(estimator_from_env).as_ref()
}

fn estimator_from_env() -> Box<dyn SyllableCounter> {
    let Some(path) = std::env::var(DICTIONARY_ENV)
        .ok()
        .filter(|p| !p.is_empty())
        .map(Utf8PathBuf::from)
    else {
        return Box::new(Heuristic);
    };

    match DictionaryCounter::load(&path) {
        Ok(counter) => Box::new(counter),
        Err(err) => {
            tracing::warn!(%err, "using heuristic syllable counts");
            Box::new(Heuristic)
        }
    }
}

/// Syllables in `word` according to the process-wide estimator.
pub fn syllables(word: &str) -> usize {
    estimator().count(word)
}

//! Error types for fogline-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading a pronunciation dictionary.
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// The dictionary file could not be read.
    #[error("failed to read pronunciation dictionary {path}: {source}")]
    Io {
        /// Path that was being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file was readable but held no usable entries.
    #[error("pronunciation dictionary {path} contains no entries")]
    Empty {
        /// Path that was loaded.
        path: Utf8PathBuf,
    },
}

/// Result type alias using [`DictionaryError`].
pub type DictionaryResult<T> = Result<T, DictionaryError>;

/// A word was not present in the pronunciation dictionary.
///
/// Raised by [`PronunciationDictionary::lookup`](crate::syllable::PronunciationDictionary::lookup)
/// and handled inside the dictionary-backed counter, which falls back to the
/// heuristic guesser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Neither the word nor its apostrophe-free form is listed.
    #[error("word {0} not in dictionary")]
    NotFound(String),
}

/// Errors that can occur during text analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The input exceeds the configured size limit.
    #[error("input too large: {size} bytes (limit: {limit} bytes)")]
    InputTooLarge {
        /// Size of the rejected input in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;

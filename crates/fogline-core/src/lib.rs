//! Readability statistics for English prose.
//!
//! `fogline-core` splits text into paragraphs and sentences, estimates
//! syllables and computes the Flesch Reading Ease, Flesch-Kincaid Grade Level
//! and Gunning Fog Index. The `fogline` CLI and MCP server are thin layers
//! over this crate.
//!
//! # Modules
//!
//! - [`paragraph`] - paragraph splitting
//! - [`sentence`] - sentence splitting with abbreviation handling
//! - [`syllable`] - syllable estimation, heuristic or dictionary-backed
//! - [`readability`] - the aggregate report and its formulas
//! - [`dictionaries`] - abbreviation lists and the pronunciation dictionary
//! - [`config`] - configuration loading
//! - [`error`] - error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use fogline_core::readability;
//!
//! let report = readability::analyze("The cat sat on the mat. It was happy.");
//! assert_eq!(report.num_sentences(), 2);
//! assert_eq!(report.num_words(), 9);
//! println!("{report}");
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod dictionaries;
pub mod error;
pub mod paragraph;
pub mod readability;
pub mod sentence;
pub mod syllable;

pub use config::{Config, ConfigLoader, LogLevel};
pub use dictionaries::abbreviations::AbbreviationSet;
pub use error::{
    AnalysisError, AnalysisResult, ConfigError, ConfigResult, DictionaryError, DictionaryResult,
    LookupError,
};
pub use readability::{ReadabilityReport, ReadabilitySummary, WordFrequencies, analyze};
pub use sentence::SentenceSplitter;
pub use syllable::{SyllableCounter, syllables};

/// Default input size limit: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Reject inputs larger than `max_bytes`. `None` disables the check.
pub const fn check_input_size(size: usize, max_bytes: Option<usize>) -> AnalysisResult<()> {
    match max_bytes {
        Some(limit) if size > limit => Err(AnalysisError::InputTooLarge { size, limit }),
        _ => Ok(()),
    }
}

//! Word lists and lookup tables.
//!
//! - [`abbreviations`]: tokens whose trailing period does not end a sentence.
//! - [`pronunciation`]: phoneme dictionary for exact syllable counts.

pub mod abbreviations;
pub mod pronunciation;

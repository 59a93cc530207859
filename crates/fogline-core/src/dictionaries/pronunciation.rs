//! Pronunciation dictionary for exact syllable counts.
//!
//! Maps upper-case words to hyphen-delimited phoneme sequences in the
//! notation of the CMU Pronouncing Dictionary (`K-AA1-T` for "cat"). A
//! word's syllable count is the number of phonemes that start with a vowel
//! letter.
//!
//! Two on-disk formats are accepted, line by line:
//!
//! - compiled: `WORD<TAB>PH1-PH2-...`, as written by
//!   [`PronunciationDictionary::write_compiled`];
//! - CMU source: `WORD  PH1 PH2 ...`. Alternate pronunciations (`WORD(1)`)
//!   are skipped.
//!
//! Lines that do not start with an upper-case ASCII letter are ignored in
//! both formats, which covers the `;;;` comments of the CMU file.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::LazyLock;

use camino::Utf8Path;
use regex::Regex;

use crate::error::{DictionaryError, DictionaryResult, LookupError};

/// Alternate-pronunciation marker such as `(1)` at the end of a headword.
static ALTERNATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+\)$").expect("valid regex"));

/// Word → phoneme table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PronunciationDictionary {
    entries: HashMap<String, String>,
}

impl PronunciationDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse dictionary text in either supported format.
    pub fn parse(source: &str) -> Self {
        let mut dictionary = Self::new();
        for line in source.lines() {
            if !line.starts_with(|c: char| c.is_ascii_uppercase()) {
                continue;
            }
            let line = line.trim_end();
            if let Some((word, phonemes)) = line.split_once('\t') {
                dictionary.insert(word.trim(), phonemes.trim());
                continue;
            }

            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            if ALTERNATE.is_match(word) {
                continue;
            }
            let phonemes: Vec<&str> = fields.collect();
            dictionary.insert(word, &phonemes.join("-"));
        }
        dictionary
    }

    /// Load and parse a dictionary file.
    ///
    /// A readable file with no entries is an error, so a wrong path to some
    /// unrelated file does not silently disable dictionary lookups.
    #[tracing::instrument(fields(path = %path))]
    pub fn load(path: &Utf8Path) -> DictionaryResult<Self> {
        let source =
            std::fs::read_to_string(path.as_std_path()).map_err(|source| DictionaryError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let dictionary = Self::parse(&source);
        if dictionary.is_empty() {
            return Err(DictionaryError::Empty {
                path: path.to_path_buf(),
            });
        }
        tracing::info!(entries = dictionary.len(), "loaded pronunciation dictionary");
        Ok(dictionary)
    }

    /// Convert the dictionary at `source` into the compiled format at `output`.
    ///
    /// Returns the number of entries written.
    pub fn compile(source: &Utf8Path, output: &Utf8Path) -> DictionaryResult<usize> {
        let dictionary = Self::load(source)?;
        let io_error = |source| DictionaryError::Io {
            path: output.to_path_buf(),
            source,
        };
        let file = std::fs::File::create(output.as_std_path()).map_err(io_error)?;
        let mut writer = io::BufWriter::new(file);
        dictionary.write_compiled(&mut writer).map_err(io_error)?;
        writer.flush().map_err(io_error)?;
        Ok(dictionary.len())
    }

    /// Add or replace an entry. The word is upper-cased; phonemes are
    /// stored as given (hyphen-delimited).
    pub fn insert(&mut self, word: &str, phonemes: &str) {
        if word.is_empty() || phonemes.is_empty() {
            return;
        }
        self.entries
            .insert(word.to_uppercase(), phonemes.to_string());
    }

    /// The phoneme sequence for `word`, matched case-insensitively.
    pub fn pronunciation(&self, word: &str) -> Option<&str> {
        self.entries.get(&word.to_uppercase()).map(String::as_str)
    }

    /// Syllable count for `word`.
    ///
    /// A word with an apostrophe that is not listed is retried once with the
    /// apostrophes removed.
    pub fn lookup(&self, word: &str) -> Result<usize, LookupError> {
        let key = word.to_uppercase();
        let phonemes = self.entries.get(&key).or_else(|| {
            key.contains('\'')
                .then(|| key.replace('\'', ""))
                .and_then(|stripped| self.entries.get(&stripped))
        });

        phonemes
            .map(|p| count_vowel_phonemes(p))
            .ok_or(LookupError::NotFound(key))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write every entry as `WORD<TAB>PHONEMES`, sorted by word.
    pub fn write_compiled<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut words: Vec<&String> = self.entries.keys().collect();
        words.sort();
        for word in words {
            writeln!(out, "{word}\t{}", self.entries[word])?;
        }
        Ok(())
    }
}

/// Phonemes whose notation begins with a vowel letter.
fn count_vowel_phonemes(phonemes: &str) -> usize {
    phonemes
        .split('-')
        .filter(|p| p.starts_with(['A', 'E', 'I', 'O', 'U']))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    const CMU_SAMPLE: &str = ";;; # CMUdict  --  Major Version: 0.07
;;; comment line
CAT  K AE1 T
CHOCOLATE  CH AO1 K L AH0 T
CHOCOLATE(1)  CH AO1 K AH0 L AH0 T
COULDN'T  K UH1 D AH0 N T
DON'T  D OW1 N T
FIRE  F AY1 ER0
'BOUT  B AW1 T
";

    #[test]
    fn parses_cmu_source() {
        let dict = PronunciationDictionary::parse(CMU_SAMPLE);
        assert_eq!(dict.len(), 5);
        assert_eq!(dict.pronunciation("cat"), Some("K-AE1-T"));
        assert_eq!(dict.pronunciation("Chocolate"), Some("CH-AO1-K-L-AH0-T"));
        assert!(dict.pronunciation("'bout").is_none());
    }

    #[test]
    fn parses_compiled_format() {
        let dict = PronunciationDictionary::parse("CAT\tK-AE1-T\nFIRE\tF-AY1-ER0\n");
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.lookup("fire"), Ok(2));
    }

    #[test]
    fn counts_vowel_phonemes() {
        let dict = PronunciationDictionary::parse(CMU_SAMPLE);
        assert_eq!(dict.lookup("cat"), Ok(1));
        assert_eq!(dict.lookup("chocolate"), Ok(2));
        assert_eq!(dict.lookup("FIRE"), Ok(2));
    }

    #[test]
    fn retries_without_apostrophes() {
        let mut dict = PronunciationDictionary::new();
        dict.insert("DONT", "D-OW1-N-T");
        assert_eq!(dict.lookup("don't"), Ok(1));
    }

    #[test]
    fn listed_apostrophe_word_found_directly() {
        let dict = PronunciationDictionary::parse(CMU_SAMPLE);
        assert_eq!(dict.lookup("couldn't"), Ok(2));
    }

    #[test]
    fn miss_is_not_found() {
        let dict = PronunciationDictionary::parse(CMU_SAMPLE);
        assert_eq!(
            dict.lookup("zebra"),
            Err(LookupError::NotFound("ZEBRA".to_string()))
        );
        assert!(matches!(dict.lookup("won't"), Err(LookupError::NotFound(_))));
    }

    #[test]
    fn compiled_output_round_trips() {
        let dict = PronunciationDictionary::parse(CMU_SAMPLE);
        let mut out = Vec::new();
        dict.write_compiled(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("CAT\tK-AE1-T\n"));
        assert_eq!(PronunciationDictionary::parse(&text), dict);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = PronunciationDictionary::load(Utf8Path::new("/nonexistent/dict.txt"))
            .unwrap_err();
        assert!(matches!(err, DictionaryError::Io { .. }));
    }

    #[test]
    fn load_file_without_entries_is_empty_error() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("dict.txt")).unwrap();
        std::fs::write(&path, ";;; nothing here\n").unwrap();
        let err = PronunciationDictionary::load(&path).unwrap_err();
        assert!(matches!(err, DictionaryError::Empty { .. }));
    }

    #[test]
    fn compile_writes_compiled_file() {
        let tmp = TempDir::new().unwrap();
        let source = Utf8PathBuf::try_from(tmp.path().join("cmudict.txt")).unwrap();
        let output = Utf8PathBuf::try_from(tmp.path().join("dict.tsv")).unwrap();
        std::fs::write(&source, CMU_SAMPLE).unwrap();

        let written = PronunciationDictionary::compile(&source, &output).unwrap();
        assert_eq!(written, 5);

        let reloaded = PronunciationDictionary::load(&output).unwrap();
        assert_eq!(reloaded.lookup("chocolate"), Ok(2));
    }
}

//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;
use fogline_core::{AbbreviationSet, Config};

pub mod analyze;
pub mod compile_dict;
pub mod info;
pub mod paragraphs;
pub mod sentences;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod syllables;
pub mod words;

/// Path argument meaning standard input.
pub const STDIN: &str = "-";

/// Read a text argument, `-` meaning standard input, enforcing the size limit.
///
/// Files are checked through their metadata before anything is read. Standard
/// input is read up to one byte past the limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    if path.as_str() == STDIN {
        return read_stdin(max_bytes);
    }

    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
    fogline_core::check_input_size(size, max_bytes).with_context(|| format!("{path}"))?;

    std::fs::read_to_string(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}

fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut content = String::new();
    let mut stdin = std::io::stdin().lock();
    let read = match max_bytes {
        Some(max) => {
            let cap = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
            stdin.take(cap).read_to_string(&mut content)
        }
        None => stdin.read_to_string(&mut content),
    };
    read.context("failed to read standard input")?;

    fogline_core::check_input_size(content.len(), max_bytes).context("standard input")?;
    Ok(content)
}

/// The configured abbreviation set plus `extra` from the command line.
pub fn abbreviation_set(config: &Config, extra: &[String]) -> AbbreviationSet {
    let mut set = config.abbreviation_set();
    set.extend(extra);
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    #[test]
    fn reads_file_within_limit() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("a.txt")).unwrap();
        std::fs::write(&path, "Short text.").unwrap();
        assert_eq!(read_input_file(&path, Some(100)).unwrap(), "Short text.");
        assert_eq!(read_input_file(&path, None).unwrap(), "Short text.");
    }

    #[test]
    fn rejects_file_over_limit() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("big.txt")).unwrap();
        std::fs::write(&path, "x".repeat(64)).unwrap();
        let err = read_input_file(&path, Some(10)).unwrap_err();
        assert!(format!("{err:#}").contains("input too large"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_input_file(Utf8Path::new("/nonexistent/fog.txt"), None).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/fog.txt"));
    }

    #[test]
    fn command_line_abbreviations_extend_config() {
        let config = Config {
            abbreviations: Some(vec!["approx".to_string()]),
            ..Config::default()
        };
        let set = abbreviation_set(&config, &["fig".to_string()]);
        assert!(set.contains("approx"));
        assert!(set.contains("fig"));
        assert!(set.contains("dr"));
    }
}

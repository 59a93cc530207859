//! Words command: word frequencies, most frequent first.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use fogline_core::readability;

use super::read_input_file;

/// Arguments for the `words` subcommand.
#[derive(Args, Debug)]
pub struct WordsArgs {
    /// File to count (`-` for standard input).
    pub file: Utf8PathBuf,

    /// Show only the N most frequent words.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

#[derive(Debug, Serialize)]
struct WordCount<'a> {
    word: &'a str,
    count: usize,
}

/// Print unique words with their counts.
#[instrument(name = "cmd_words", skip_all, fields(file = %args.file))]
pub fn cmd_words(
    args: WordsArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let content = read_input_file(&args.file, max_input_bytes)?;

    let mut frequencies = readability::WordFrequencies::new();
    for word in readability::words(&content) {
        frequencies.record(word);
    }
    debug!(total = frequencies.len(), top = ?args.top, "counted words");

    let mut ranked = frequencies.most_frequent();
    if let Some(n) = args.top {
        ranked.truncate(n);
    }

    if global_json {
        let counts: Vec<WordCount<'_>> = ranked
            .iter()
            .map(|&(word, count)| WordCount { word, count })
            .collect();
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        let width = ranked.iter().map(|(w, _)| w.len()).max().unwrap_or(0);
        for (word, count) in ranked {
            println!("{word:<width$}  {}", count.cyan());
        }
    }
    Ok(())
}

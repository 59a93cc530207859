//! Sentences command: one sentence per line.

use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use fogline_core::{Config, sentence};

use super::{abbreviation_set, read_input_file};

/// Arguments for the `sentences` subcommand.
#[derive(Args, Debug)]
pub struct SentencesArgs {
    /// File to split (`-` for standard input).
    pub file: Utf8PathBuf,

    /// Extra abbreviations (comma-separated), e.g. `approx,fig`.
    #[arg(long, value_delimiter = ',')]
    pub abbrev: Vec<String>,
}

/// Print the sentences of a file.
#[instrument(name = "cmd_sentences", skip_all, fields(file = %args.file))]
pub fn cmd_sentences(
    args: SentencesArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let content = read_input_file(&args.file, max_input_bytes)?;
    let abbreviations = abbreviation_set(config, &args.abbrev);
    let sentences = sentence::sentences(&content, &abbreviations);
    debug!(count = sentences.len(), "split sentences");

    if global_json {
        println!("{}", serde_json::to_string_pretty(&sentences)?);
    } else {
        for s in &sentences {
            // Sentences may span wrapped lines; keep one per output line.
            println!("{}", s.split_whitespace().collect::<Vec<_>>().join(" "));
        }
    }
    Ok(())
}

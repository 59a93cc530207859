//! Paragraphs command.

use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use fogline_core::paragraph;

use super::read_input_file;

/// Arguments for the `paragraphs` subcommand.
#[derive(Args, Debug)]
pub struct ParagraphsArgs {
    /// File to split (`-` for standard input).
    pub file: Utf8PathBuf,
}

/// Print the paragraphs of a file separated by blank lines.
#[instrument(name = "cmd_paragraphs", skip_all, fields(file = %args.file))]
pub fn cmd_paragraphs(
    args: ParagraphsArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let content = read_input_file(&args.file, max_input_bytes)?;
    let paragraphs = paragraph::paragraphs(&content);
    debug!(count = paragraphs.len(), "split paragraphs");

    if global_json {
        println!("{}", serde_json::to_string_pretty(&paragraphs)?);
    } else {
        println!("{}", paragraphs.join("\n\n"));
    }
    Ok(())
}

//! Syllables command.

use clap::Args;
use serde::Serialize;
use tracing::instrument;

use fogline_core::syllable;

/// Arguments for the `syllables` subcommand.
#[derive(Args, Debug)]
pub struct SyllablesArgs {
    /// Words to count.
    #[arg(required = true)]
    pub words: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SyllableCount<'a> {
    word: &'a str,
    syllables: usize,
}

/// Print the syllable count of each word.
#[instrument(name = "cmd_syllables", skip_all, fields(words = args.words.len()))]
pub fn cmd_syllables(args: SyllablesArgs, global_json: bool) -> anyhow::Result<()> {
    let counts: Vec<SyllableCount<'_>> = args
        .words
        .iter()
        .map(|word| SyllableCount {
            word,
            syllables: syllable::syllables(word),
        })
        .collect();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        for c in &counts {
            println!("{}\t{}", c.word, c.syllables);
        }
    }
    Ok(())
}

//! Compile-dict command: CMU source dictionary to the compiled format.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{info, instrument};

use fogline_core::syllable::PronunciationDictionary;

/// Arguments for the `compile-dict` subcommand.
#[derive(Args, Debug)]
pub struct CompileDictArgs {
    /// CMU Pronouncing Dictionary source file (e.g. `cmudict-0.7b`).
    pub source: Utf8PathBuf,

    /// Output file, one `WORD<TAB>PHONEMES` line per entry.
    pub output: Utf8PathBuf,
}

/// Convert a pronunciation dictionary to the compiled format.
#[instrument(name = "cmd_compile_dict", skip_all, fields(source = %args.source, output = %args.output))]
pub fn cmd_compile_dict(args: CompileDictArgs, global_json: bool) -> anyhow::Result<()> {
    let entries = PronunciationDictionary::compile(&args.source, &args.output)
        .with_context(|| format!("failed to compile {}", args.source))?;
    info!(entries, "compiled pronunciation dictionary");

    if global_json {
        let out = serde_json::json!({ "output": args.output, "entries": entries });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{} {entries} entries to {}", "Wrote".green(), args.output);
    }
    Ok(())
}

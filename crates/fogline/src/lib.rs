//! Library side of the `fogline` CLI.
//!
//! Exposes the argument parser and the command implementations so they can
//! be tested and documented outside `main.rs`.
//!
//! - [`Cli`] - root argument parser (clap derive)
//! - [`Commands`] - subcommands
//! - [`commands`] - command implementations
//! - `server` - MCP server (feature `mcp`)

pub mod commands;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Color when writing to a capable terminal.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl ColorChoice {
    /// Set the process-wide owo-colors override. Call once at startup.
    pub fn apply(self) {
        match self {
            Self::Auto => {}
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                     Log filter (e.g. debug, fogline_core=trace)
    FOGLINE_LOG_PATH             Explicit JSONL log file path
    FOGLINE_LOG_DIR              JSONL log directory
    FOGLINE_PRONUNCIATION_DICT   Pronunciation dictionary for syllable counts
    FOGLINE_<SETTING>            Any config setting, e.g. FOGLINE_MAX_GRADE=9
";

/// Command-line interface for fogline.
#[derive(Parser)]
#[command(name = "fogline")]
#[command(about = "Readability statistics for English prose", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (merged after discovered files)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Report readability statistics and scores for a text
    Analyze(commands::analyze::AnalyzeArgs),

    /// Split a text into sentences, one per line
    Sentences(commands::sentences::SentencesArgs),

    /// Split a text into paragraphs
    Paragraphs(commands::paragraphs::ParagraphsArgs),

    /// List unique words with their frequencies
    Words(commands::words::WordsArgs),

    /// Count syllables in words
    Syllables(commands::syllables::SyllablesArgs),

    /// Convert a CMU pronouncing dictionary to fogline's compiled format
    CompileDict(commands::compile_dict::CompileDictArgs),

    /// Show package and configuration information
    Info(commands::info::InfoArgs),

    /// Start MCP (Model Context Protocol) server on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// The clap command, for man pages and shell completions.
pub fn command() -> clap::Command {
    Cli::command()
}

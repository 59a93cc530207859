//! Analyze command: full readability report with optional gates.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use fogline_core::{Config, ReadabilityReport, ReadabilitySummary, syllable};

use super::{abbreviation_set, read_input_file};

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// File to analyze (`-` for standard input).
    pub file: Utf8PathBuf,

    /// Fail when the Flesch-Kincaid grade is above this.
    #[arg(long)]
    pub max_grade: Option<f64>,

    /// Fail when the Flesch Reading Ease is below this.
    #[arg(long)]
    pub min_flesch: Option<f64>,

    /// Extra abbreviations (comma-separated), e.g. `approx,fig`.
    #[arg(long, value_delimiter = ',')]
    pub abbrev: Vec<String>,
}

#[derive(Debug, Serialize)]
struct AnalyzeOutput<'a> {
    file: &'a str,
    #[serde(flatten)]
    summary: ReadabilitySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_grade: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_flesch: Option<f64>,
    failures: Vec<String>,
}

/// Describe every gate the summary fails.
pub fn gate_failures(
    summary: &ReadabilitySummary,
    max_grade: Option<f64>,
    min_flesch: Option<f64>,
) -> Vec<String> {
    let mut failures = Vec::new();
    if let Some(max) = max_grade
        && summary.kincaid > max
    {
        failures.push(format!("grade {:.1} is above {max:.1}", summary.kincaid));
    }
    if let Some(min) = min_flesch
        && summary.flesch < min
    {
        failures.push(format!("reading ease {:.1} is below {min:.1}", summary.flesch));
    }
    failures
}

/// Analyze a file and check it against the readability gates.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(
        max_grade = ?args.max_grade,
        min_flesch = ?args.min_flesch,
        abbrev = args.abbrev.len(),
        "executing analyze command"
    );

    let content = read_input_file(&args.file, max_input_bytes)?;
    let abbreviations = abbreviation_set(config, &args.abbrev);
    let report = ReadabilityReport::with_options(&content, &abbreviations, syllable::estimator());

    let max_grade = args.max_grade.or(config.max_grade);
    let min_flesch = args.min_flesch.or(config.min_flesch);
    let summary = report.to_summary();
    let failures = gate_failures(&summary, max_grade, min_flesch);

    if global_json {
        let output = AnalyzeOutput {
            file: args.file.as_str(),
            summary,
            max_grade,
            min_flesch,
            failures: failures.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", args.file.bold());
        print!("{report}");
        if failures.is_empty() && (max_grade.is_some() || min_flesch.is_some()) {
            println!("\n{} readability gates met", "PASS:".green());
        }
    }

    if !failures.is_empty() {
        bail!("{}: {}. Shorten sentences or use simpler words.", args.file, failures.join("; "));
    }
    Ok(())
}

//! fogline CLI
#![deny(unsafe_code)]

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use fogline::{Cli, Commands, commands};
use fogline_core::config::ConfigLoader;
use fogline_core::syllable;
use tracing::debug;

mod observability;

fn utf8(path: std::path::PathBuf, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path)
        .map_err(|e| anyhow::anyhow!("{what} is not valid UTF-8: {}", e.into_path_buf().display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help guarantees a subcommand from here on.
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(dir) = &cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = utf8(cwd, "current directory")?;
    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(path) = &cli.config {
        loader = loader.with_file(utf8(path.clone(), "config path")?);
    }
    let (config, config_sources) = loader.load().context("failed to load configuration")?;

    let obs_config = observability::ObservabilityConfig::from_env_with_overrides(
        config.log_dir.as_ref().map(|dir| dir.as_std_path().to_path_buf()),
    );
    let env_filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs_config, env_filter)
        .context("failed to initialize logging")?;

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        chdir = ?cli.chdir,
        "CLI initialized"
    );

    if let Some(dict) = &config.pronunciation_dict {
        syllable::install_dictionary(dict)
            .with_context(|| format!("failed to load pronunciation dictionary {dict}"))?;
    }

    let max_input = config.input_limit();

    let result = match command {
        Commands::Analyze(args) => {
            commands::analyze::cmd_analyze(args, cli.json, &config, max_input)
        }
        Commands::Sentences(args) => {
            commands::sentences::cmd_sentences(args, cli.json, &config, max_input)
        }
        Commands::Paragraphs(args) => {
            commands::paragraphs::cmd_paragraphs(args, cli.json, max_input)
        }
        Commands::Words(args) => commands::words::cmd_words(args, cli.json, max_input),
        Commands::Syllables(args) => commands::syllables::cmd_syllables(args, cli.json),
        Commands::CompileDict(args) => commands::compile_dict::cmd_compile_dict(args, cli.json),
        Commands::Info(args) => commands::info::cmd_info(args, cli.json, &config, &config_sources),
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => {
            let rt = tokio::runtime::Runtime::new()
                .context("failed to create async runtime for MCP server")?;
            rt.block_on(commands::serve::cmd_serve(args, &config))
        }
    };
    if let Err(err) = &result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}

#![deny(unsafe_code)]

//! stdinc CLI — checks C++ files for mismatched standard-library includes.

mod output;

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use stdinc_config::AppConfig;
use stdinc_core::Analyzer;
use tokio::task::JoinSet;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use output::{Format, Renderer};

/// stdinc — find missing and unused C++ standard-library includes.
#[derive(Parser)]
#[command(name = "stdinc", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = "stdinc.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check source files for include mismatches.
    Check {
        /// Files to check.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format (overrides output.format).
        #[arg(long, value_enum)]
        format: Option<Format>,

        /// Project include prefix to ignore (overrides project.namespace_prefix).
        #[arg(long)]
        prefix: Option<String>,

        /// Also print files without findings.
        #[arg(long)]
        show_clean: bool,
    },

    /// Show which header provides a symbol.
    Lookup {
        /// Qualified symbol, e.g. `std::map`.
        symbol: String,
    },

    /// List the effective header table.
    Headers,

    /// Validate and display configuration.
    Config {
        /// Show the resolved configuration.
        #[arg(long)]
        show: bool,
    },
}

/// Exit status for errors that stop the run: a bad config file, an empty
/// header table, or failed output.
const EXIT_FATAL: u8 = 3;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let (config, found) = load_config(&cli.config).await?;

    let filter = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if !found {
        info!(path = %cli.config.display(), "Config file not found, using defaults");
    }

    match cli.command {
        Commands::Check {
            files,
            format,
            prefix,
            show_clean,
        } => cmd_check(config, files, format, prefix, show_clean).await,
        Commands::Lookup { symbol } => cmd_lookup(&config, &symbol),
        Commands::Headers => cmd_headers(&config),
        Commands::Config { show } => cmd_config(&cli.config, &config, show),
    }
}

#[derive(Debug, Default)]
struct Summary {
    clean: usize,
    with_findings: usize,
    unreadable: usize,
}

impl Summary {
    fn exit_code(&self) -> ExitCode {
        if self.unreadable > 0 {
            ExitCode::from(2)
        } else if self.with_findings > 0 {
            ExitCode::from(1)
        } else {
            ExitCode::SUCCESS
        }
    }
}

async fn cmd_check(
    mut config: AppConfig,
    files: Vec<PathBuf>,
    format: Option<Format>,
    prefix: Option<String>,
    show_clean: bool,
) -> Result<ExitCode> {
    if prefix.is_some() {
        config.project.namespace_prefix = prefix;
    }
    let format = match format {
        Some(format) => format,
        None => Format::from_config(&config.output.format)?,
    };
    let show_clean = show_clean || config.output.show_clean;

    let analyzer =
        Arc::new(Analyzer::from_config(&config).context("failed to build header registry")?);
    info!(
        files = files.len(),
        symbols = analyzer.registry().len(),
        "Checking standard includes"
    );

    let mut tasks = JoinSet::new();
    for (index, path) in files.into_iter().enumerate() {
        let analyzer = Arc::clone(&analyzer);
        tasks.spawn_blocking(move || {
            let result = analyzer.analyze_path(&path);
            (index, path, result)
        });
    }

    let mut outcomes = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        outcomes.push(joined.context("analysis task failed")?);
    }
    outcomes.sort_by_key(|(index, _, _)| *index);

    let mut summary = Summary::default();
    let mut renderer = Renderer::new(format, show_clean, std::io::stdout().lock());
    for (_, path, result) in outcomes {
        match result {
            Ok(Some(report)) => {
                summary.with_findings += 1;
                renderer.report(&report)?;
            }
            Ok(None) => {
                summary.clean += 1;
                renderer.clean(&path)?;
            }
            Err(err) => {
                summary.unreadable += 1;
                warn!(path = %path.display(), error = %err, "Skipping unreadable file");
                eprintln!("stdinc: {err}");
            }
        }
    }
    renderer.into_inner().flush()?;

    info!(
        clean = summary.clean,
        with_findings = summary.with_findings,
        unreadable = summary.unreadable,
        "Check finished"
    );
    Ok(summary.exit_code())
}

fn cmd_lookup(config: &AppConfig, symbol: &str) -> Result<ExitCode> {
    let analyzer = Analyzer::from_config(config).context("failed to build header registry")?;
    match analyzer.registry().lookup(symbol) {
        Some(header) => {
            println!("{symbol}: <{header}>");
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("{symbol}: not found");
            Ok(ExitCode::from(1))
        }
    }
}

fn cmd_headers(config: &AppConfig) -> Result<ExitCode> {
    let analyzer = Analyzer::from_config(config).context("failed to build header registry")?;
    let registry = analyzer.registry();
    for header in registry.headers() {
        println!("<{header}>  {}", registry.symbols_for(header).join(" "));
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_config(config_path: &Path, config: &AppConfig, show: bool) -> Result<ExitCode> {
    if show {
        let toml_str = toml::to_string_pretty(config).context("failed to serialize config")?;
        println!("{toml_str}");
    } else {
        println!("Configuration at '{}' is valid.", config_path.display());
    }
    Ok(ExitCode::SUCCESS)
}

/// Load the config file, or defaults when it does not exist.
///
/// Returns whether the file was found.
async fn load_config(path: &Path) -> Result<(AppConfig, bool)> {
    if path.exists() {
        let config = AppConfig::load(path)
            .await
            .with_context(|| format!("failed to load {}", path.display()))?;
        Ok((config, true))
    } else {
        Ok((AppConfig::default(), false))
    }
}

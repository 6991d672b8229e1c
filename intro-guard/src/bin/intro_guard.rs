//! intro-guard command line host.
//!
//! Reads an introspection configuration, loads every listed results file and
//! runs the target columns against it. Exit status:
//!
//! - `0`: every file was introspected (failed introspections are only reported
//!   unless `--fail-on-introspection` is given)
//! - `1`: `--fail-on-introspection` was given and some introspection failed
//! - `2`: a fatal configuration, type or sanity error ended the run

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use intro_guard::config::IntrospectionConfig;
use intro_guard::formatters::{HumanFormatter, JsonFormatter, ReportFormatter};
use intro_guard::logging::setup::{init_logging, LoggingConfig};
use intro_guard::sources::{CsvSource, TableSource};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "intro-guard",
    about = "Sanity-check and introspect columns of measurement results files",
    version
)]
struct Cli {
    /// Path to the YAML or JSON introspection configuration
    #[arg(short, long)]
    config: PathBuf,

    /// Report output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Exit with status 1 when any introspection fails
    #[arg(long)]
    fail_on_introspection: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = if cli.verbose {
        LoggingConfig::development()
    } else {
        LoggingConfig::default()
    };
    if let Err(e) = init_logging(logging.with_json_format(cli.json_logs)) {
        eprintln!("failed to initialize logging: {e}");
    }

    let outcome = run(&cli);
    if let Err(e) = &outcome {
        eprintln!("error: {e:#}");
    }
    ExitCode::from(exit_status(&outcome, cli.fail_on_introspection))
}

/// Maps a run outcome to the process exit status.
fn exit_status(outcome: &Result<bool>, fail_on_introspection: bool) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) if fail_on_introspection => 1,
        Ok(false) => 0,
        Err(_) => 2,
    }
}

/// Runs every configured file; returns whether all introspections passed.
fn run(cli: &Cli) -> Result<bool> {
    let config = IntrospectionConfig::from_path(&cli.config)?;
    let formatter: Box<dyn ReportFormatter> = match cli.format {
        OutputFormat::Human => Box::new(HumanFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    };

    let mut all_passed = true;
    for file in &config.files {
        let source = CsvSource::new(file).with_index_column(&config.index_column);
        info!(source = %source.description(), "Starting file introspection");

        let table = source
            .load()
            .with_context(|| format!("loading {}", file.display()))?;
        let report = config
            .suite_for(file)
            .run(&table)
            .with_context(|| format!("introspecting {}", file.display()))?;

        println!("{}", formatter.format(&report)?);
        all_passed &= report.all_passed();
    }
    Ok(all_passed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        let cli = Cli::parse_from([
            "intro-guard",
            "--config",
            "plugin.yaml",
            "--format",
            "json",
            "--fail-on-introspection",
        ]);
        assert_eq!(cli.config, PathBuf::from("plugin.yaml"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.fail_on_introspection);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&Ok(true), false), 0);
        assert_eq!(exit_status(&Ok(true), true), 0);
        assert_eq!(exit_status(&Ok(false), false), 0);
        assert_eq!(exit_status(&Ok(false), true), 1);
        assert_eq!(exit_status(&Err(anyhow::anyhow!("sanity")), false), 2);
        assert_eq!(exit_status(&Err(anyhow::anyhow!("sanity")), true), 2);
    }

    #[test]
    fn test_cli_requires_config() {
        assert!(Cli::try_parse_from(["intro-guard"]).is_err());
    }
}

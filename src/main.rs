use std::path::PathBuf;

use anyhow::{Context, Result};
use certflags::settings::Settings;
use certflags::{BindError, BindOutcome, FlagRegistry, OptionsBinder};
use clap::{Parser, ValueEnum};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::output::{print_options_json, print_options_text};

const EXIT_RUNTIME_ERROR: i32 = 1;
const EXIT_PARSE_ERROR: i32 = 2;
const EXIT_VALIDATION_ERROR: i32 = 3;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to settings file (default: certflags.toml)
    #[arg(long, short, env = "CERTFLAGS_CONFIG")]
    config: Option<PathBuf>,

    /// Output format for the bound options
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Show secrets in output
    #[arg(long)]
    show_secrets: bool,

    /// Certificate workflow arguments, passed after `--`
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("certflags error: {err:#}");
        std::process::exit(exit_code(&err));
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::new(cli.config.clone()).context("Failed to load settings")?;
    settings.validate()?;
    debug!("Settings: {settings:?}");

    let registry = FlagRegistry::standard().context("Failed to build flag registry")?;
    let binder = OptionsBinder::new(registry)
        .with_policy(settings.validation.policy)
        .with_help_layout(settings.help_layout());

    match binder.bind(cli.args.as_slice()) {
        Ok(BindOutcome::HelpRequested(text)) => print!("{text}"),
        Ok(BindOutcome::Options(options)) => match cli.format {
            OutputFormat::Text => print_options_text(&options, binder.registry(), cli.show_secrets),
            OutputFormat::Json => print_options_json(&options, cli.show_secrets)?,
        },
        Err(err) => {
            error!("Argument binding failed: {err}");
            return Err(err.into());
        }
    }
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<BindError>() {
        Some(BindError::Parse(_)) => EXIT_PARSE_ERROR,
        Some(BindError::Validation(_)) => EXIT_VALIDATION_ERROR,
        None => EXIT_RUNTIME_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_collects_trailing_args() {
        let cli = Cli::parse_from([
            "certflags",
            "--format",
            "json",
            "--",
            "--target",
            "manual",
            "--help",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.args, vec!["--target", "manual", "--help"]);
    }

    #[test]
    fn test_exit_code_by_error_kind() {
        let parse = anyhow::Error::from(BindError::Parse(certflags::ParseError::UnknownFlag {
            flag: "bogus".to_string(),
        }));
        assert_eq!(exit_code(&parse), EXIT_PARSE_ERROR);
        assert_eq!(exit_code(&anyhow::anyhow!("io")), EXIT_RUNTIME_ERROR);
    }
}

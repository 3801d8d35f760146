//! SOL006 CLI - translate OSM IM descriptors to ETSI NFV SOL006
//!
//! This is the main entry point for the `sol006` binary, providing commands
//! for translating and validating VNF and network service descriptors.
//!
//! Copyright (c) 2025 SOL006 Translator Team
//! Licensed under the Apache-2.0 license

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use clap::{Parser, ValueEnum};
use cli::{Cli, Commands, OutputFormat};
use colored::control;
use config::Config;
use error::{Error, Result};
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    let cli = Cli::parse();

    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", error::format_error(&e, !cli.no_color));
            process::exit(e.exit_code());
        }
    };

    let use_color = cli.use_color(config.output.color);
    control::set_override(use_color);

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli, config, use_color) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{}", error::format_error(&e, use_color));
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = output_format(&cli, &config)?;
    let mut output = OutputWriter::new(format, use_color, cli.quiet);

    tracing::info!(
        verbosity = cli.verbosity_level(),
        format = ?format,
        "Executing command"
    );

    match cli.command {
        Commands::Translate(args) => handlers::handle_translate(args, &config, &mut output),
        Commands::Validate(args) => handlers::handle_validate(args, &config, &mut output),
        Commands::Config { action } => handlers::handle_config(action, &config, &mut output),
        Commands::Completions { shell } => handlers::handle_completions(shell, &mut output),
    }
}

/// The -o flag wins over the configured default format
fn output_format(cli: &Cli, config: &Config) -> Result<OutputFormat> {
    match cli.output {
        Some(format) => Ok(format),
        None => OutputFormat::from_str(&config.output.format, true).map_err(|_| {
            Error::config(format!(
                "unknown output format '{}', expected one of: human, json, yaml, json-pretty",
                config.output.format
            ))
        }),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let verbosity = cli.verbosity_level();
    let mut logging_config = LoggingConfig::from_verbosity(verbosity);
    logging_config.apply_section(&config.logging, verbosity);
    logging_config.merge_with_env();

    // Quiet mode only logs errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["sol006", "-vv", "validate", "vnfd.yaml"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["sol006", "--quiet", "validate", "vnfd.yaml"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_output_format_resolution() {
        let mut config = Config::default();
        config.output.format = "json-pretty".to_string();

        let cli = Cli::parse_from(["sol006", "validate", "vnfd.yaml"]);
        assert_eq!(output_format(&cli, &config).unwrap(), OutputFormat::JsonPretty);

        let cli = Cli::parse_from(["sol006", "-o", "yaml", "validate", "vnfd.yaml"]);
        assert_eq!(output_format(&cli, &config).unwrap(), OutputFormat::Yaml);

        config.output.format = "xml".to_string();
        let cli = Cli::parse_from(["sol006", "validate", "vnfd.yaml"]);
        assert!(matches!(output_format(&cli, &config), Err(Error::Config(_))));
    }
}

//! CLI structure and argument definitions
//!
//! Copyright (c) 2025 SOL006 Translator Team
//! Licensed under the Apache-2.0 license

use clap::{Args, Parser, Subcommand, ValueEnum};
use sol006_schemas::ValidationMode;
use std::path::PathBuf;

/// Translate OSM IM descriptors to ETSI NFV SOL006
#[derive(Parser, Debug)]
#[command(
    name = "sol006",
    author,
    version,
    about,
    long_about = "Translate OSM Information Model VNF and network service descriptors \
                  into their ETSI NFV SOL006 equivalents, or check them against the IM rules."
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SOL006_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (defaults to the configured format, then human)
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate an IM descriptor file to SOL006
    Translate(TranslateArgs),

    /// Validate an IM descriptor file without translating it
    Validate(ValidateArgs),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the translate command
#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// IM descriptor to translate (.yaml, .yml or .json)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write the SOL006 document to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub save_to: Option<PathBuf>,

    /// Validation mode applied before translating
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// IM descriptor to validate (.yaml, .yml or .json)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Validation mode
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Report every violation with its rule details
    #[arg(short, long)]
    pub detailed: bool,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Format to display configuration in
        #[arg(short, long, value_enum, default_value = "toml")]
        format: ConfigFormat,
    },

    /// Write a default configuration file
    Init {
        /// Write to the user configuration directory instead of the current directory
        #[arg(long, conflicts_with = "path")]
        user: bool,

        /// Explicit destination path
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output; documents are rendered as YAML
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON
    JsonPretty,
}

/// Configuration display format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

/// Validation mode as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Basic,
    Partial,
    Strict,
}

impl From<ModeArg> for ValidationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Basic => ValidationMode::Basic,
            ModeArg::Partial => ValidationMode::Partial,
            ModeArg::Strict => ValidationMode::Strict,
        }
    }
}

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

impl Cli {
    /// Get the effective verbosity level
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Whether colored output should be used, given the configured preference
    pub fn use_color(&self, configured: bool) -> bool {
        use is_terminal::IsTerminal;
        !self.no_color && configured && std::io::stdout().is_terminal()
    }
}

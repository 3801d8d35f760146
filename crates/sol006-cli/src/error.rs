//! Failures of a `sol006` invocation
//!
//! Each variant maps to its own process exit code so scripts can tell a
//! missing file from a rejected descriptor.

use sol006_schemas::ValidationErrors;
use std::io;
use std::path::PathBuf;

/// Result of a command handler
pub type Result<T> = std::result::Result<T, Error>;

/// Anything that ends a command early
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading input or writing output failed
    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),

    /// Translation failure reported by sol006-core
    #[error("{0}")]
    Core(#[from] sol006_core::Error),

    /// The descriptor or config path does not exist
    #[error("no such file: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Input could not be decoded in the format its extension names
    #[error("{} is not valid {}: {}", path.display(), expected, reason)]
    InvalidFormat {
        path: PathBuf,
        expected: String,
        reason: String,
    },

    /// Bad config file contents or settings
    #[error("config: {0}")]
    Config(String),

    /// JSON encoding or decoding failed
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML encoding or decoding failed
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A TOML config file did not parse
    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),

    /// The IM validator rejected the document
    #[error("Validation failed with {} error(s)", .0.len())]
    Validation(ValidationErrors),

    #[error("{message}")]
    Other { message: String },
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Process exit status reported for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(_) => 2,
            Self::FileNotFound { .. } => 3,
            Self::InvalidFormat { .. } => 4,
            Self::Config(_) => 5,
            Self::Validation(_) => 6,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Toml(_) => 14,
            Self::Other { .. } => 99,
        }
    }
}

/// The line printed on stderr before exiting
pub fn format_error(error: &Error, use_color: bool) -> String {
    use colored::Colorize;

    let label = if use_color { "error:".red().bold().to_string() } else { "error:".to_string() };
    format!("{} {}", label, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sol006_schemas::ValidationError;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            Error::Io(io::Error::new(io::ErrorKind::Other, "disk")),
            Error::FileNotFound { path: PathBuf::from("x.yaml") },
            Error::config("bad"),
            Error::Validation(ValidationErrors::new()),
            Error::other("misc"),
        ];
        let mut codes: Vec<i32> = errors.iter().map(Error::exit_code).collect();
        codes.dedup();
        assert_eq!(codes, vec![1, 3, 5, 6, 99]);
    }

    #[test]
    fn test_format_error_plain() {
        let error = Error::Validation(ValidationErrors::from(ValidationError::new("$", "root")));
        assert_eq!(format_error(&error, false), "error: Validation failed with 1 error(s)");
    }

    #[test]
    fn test_core_error_message_is_kept() {
        let core = sol006_core::Error::UnknownDescriptorKind { found: "pnfd-catalog".to_string() };
        let error = Error::from(core);
        assert!(error.to_string().starts_with("Error in translation: cannot determine"));
        assert_eq!(error.exit_code(), 2);
    }
}

//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod config;
mod translate;
mod validate;

pub use completions::handle_completions;
pub use config::handle_config;
pub use translate::handle_translate;
pub use validate::handle_validate;

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

/// Serialization format of a descriptor file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.json` is JSON; everything else is read as YAML, which also accepts JSON text
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }

    fn name(self) -> &'static str {
        match self {
            DocumentFormat::Json => "JSON",
            DocumentFormat::Yaml => "YAML",
        }
    }
}

/// Read an IM descriptor file into a JSON value
pub(crate) fn read_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let format = DocumentFormat::of(path);
    let decoded = match format {
        DocumentFormat::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
    };

    decoded.map_err(|reason| Error::InvalidFormat {
        path: path.to_path_buf(),
        expected: format.name().to_string(),
        reason,
    })
}

/// Path of a descriptor fixture shipped with sol006-core
#[cfg(test)]
pub(crate) fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../sol006-core/tests/fixtures")
        .join(name)
}

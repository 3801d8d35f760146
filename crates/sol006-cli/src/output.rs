//! Rendering of documents and status lines
//!
//! Documents go to stdout in the selected format. Info, success, warning and
//! error lines go to stderr and are printed for the human format only.

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::logging::redaction;
use colored::Colorize;
use serde::Serialize;
use sol006_schemas::{ValidationError, ValidationErrors};
use std::fmt::Write as _;
use std::io::{self, Write};

/// Renders documents and validation reports for an output format
pub trait OutputFormatter {
    /// Render a translated document or report
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Render the full list of validation errors
    fn format_validation_errors(&self, errors: &ValidationErrors) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        let rendered = match self {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::JsonPretty => serde_json::to_string_pretty(value)?,
            // Descriptors are read and written as YAML by operators
            OutputFormat::Yaml | OutputFormat::Human => serde_yaml::to_string(value)?,
        };
        Ok(rendered)
    }

    fn format_validation_errors(&self, errors: &ValidationErrors) -> Result<String> {
        if *self == OutputFormat::Human {
            Ok(human_report(errors))
        } else {
            self.format(errors)
        }
    }
}

/// Sends documents to one writer and status lines to another
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
    status: Box<dyn Write>,
}

impl OutputWriter {
    /// Documents on stdout, status on stderr
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writers(
            format,
            use_color,
            quiet,
            Box::new(io::stdout()),
            Box::new(io::stderr()),
        )
    }

    pub fn with_writers(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
        status: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
            status,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write text to the document stream as is
    pub fn write(&mut self, content: &str) -> Result<()> {
        self.writer.write_all(content.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write text to the document stream followed by a newline
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        self.write(&format!("{}\n", content))
    }

    /// Status lines only exist for the human format
    fn status_line(
        &mut self,
        always: bool,
        plain_tag: &str,
        styled: impl FnOnce(&str) -> String,
        message: &str,
    ) -> Result<()> {
        if self.format != OutputFormat::Human || (self.quiet && !always) {
            return Ok(());
        }
        let line = if self.use_color {
            styled(message)
        } else if plain_tag.is_empty() {
            message.to_string()
        } else {
            format!("{}: {}", plain_tag, message)
        };
        writeln!(self.status, "{}", line)?;
        self.status.flush()?;
        Ok(())
    }

    /// Progress note, hidden by --quiet
    pub fn info(&mut self, message: &str) -> Result<()> {
        tracing::debug!(status = message, "Progress");
        self.status_line(false, "INFO", |m| format!("{} {}", "ℹ".blue(), m), message)
    }

    /// Outcome of a successful command, hidden by --quiet
    pub fn success(&mut self, message: &str) -> Result<()> {
        self.status_line(false, "", |m| m.green().to_string(), message)
    }

    pub fn warning(&mut self, message: &str) -> Result<()> {
        self.status_line(true, "WARNING", |m| m.yellow().to_string(), message)
    }

    pub fn error(&mut self, message: &str) -> Result<()> {
        self.status_line(true, "ERROR", |m| m.red().to_string(), message)
    }

    /// Emit a document in the selected format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        if tracing::enabled!(tracing::Level::TRACE) {
            let mut scrubbed = serde_json::to_value(value)?;
            redaction::redact_json_value(&mut scrubbed);
            tracing::trace!(document = %scrubbed, "Writing document");
        }

        let rendered = self.format.format(value)?;
        match self.format {
            // serde_yaml output already ends with a newline
            OutputFormat::Human | OutputFormat::Yaml => self.write(&rendered),
            OutputFormat::Json | OutputFormat::JsonPretty => self.writeln(&rendered),
        }
    }

    /// Emit every validation error
    pub fn validation_errors(&mut self, errors: &ValidationErrors) -> Result<()> {
        let rendered = self.format.format_validation_errors(errors)?;
        self.writeln(rendered.trim_end())
    }
}

/// Numbered multi-line report of every error
fn human_report(errors: &ValidationErrors) -> String {
    let mut report = format!("{} IM validation error(s)\n", errors.len());
    for (number, error) in (1..).zip(errors.iter()) {
        let _ = write!(report, "\n{}. {}", number, human_entry(error));
    }
    report
}

/// One error: its path, the message, then each violated rule indented
fn human_entry(error: &ValidationError) -> String {
    let mut entry = format!("at {}\n   {}\n", error.path, error.message);
    for violation in &error.schema_violations {
        let _ = writeln!(
            entry,
            "   [{}] expected {}, found {}",
            violation.rule, violation.expected, violation.actual
        );
    }
    entry
}

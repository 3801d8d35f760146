//! Diagnostics for `sol006` runs
//!
//! Log lines go to stderr or a log file, never to stdout, which carries the
//! translated descriptor. Every run gets an id that tags its operation spans,
//! and descriptor content is scrubbed of credentials before it is traced.

use crate::config::LoggingSection;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};
use tracing::{field, Span};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Id of this invocation, set once the subscriber is installed
static REQUEST_ID: OnceLock<String> = OnceLock::new();

/// Resolved logging settings after flags, config file and environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `warn` or `sol006_core=debug`
    pub level: String,
    /// Line layout
    pub format: LogFormat,
    /// Write to stderr when no log file is set
    pub console: bool,
    /// Append log lines to this file instead of stderr
    pub file: Option<PathBuf>,
    /// Tag lines with the emitting thread
    pub thread_ids: bool,
    /// Tag lines with the source file and line
    pub source_location: bool,
    /// Emit a line when an operation span closes
    pub span_events: bool,
}

/// How each log line is laid out
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    /// One short line per event
    Compact,
    /// Default tracing-subscriber layout
    Full,
    /// One JSON object per event, for log shippers
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "full" => Ok(LogFormat::Full),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("'{}' is not a log format (compact, full, json)", other)),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            console: true,
            file: None,
            thread_ids: false,
            source_location: false,
            span_events: false,
        }
    }
}

impl LoggingConfig {
    /// Settings for `-v` repeated `verbosity` times
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let tracing_all = verbosity >= 3;

        Self {
            level: level.to_string(),
            format: if tracing_all { LogFormat::Full } else { LogFormat::Compact },
            source_location: verbosity >= 2,
            thread_ids: tracing_all,
            span_events: tracing_all,
            ..Self::default()
        }
    }

    /// Apply the `[logging]` section of the configuration file
    ///
    /// The configured level only applies when no -v flag was given.
    pub fn apply_section(&mut self, section: &LoggingSection, verbosity: u8) {
        if verbosity == 0 {
            if let Some(level) = &section.level {
                self.level = level.clone();
            }
        }
        if self.format == LogFormat::Compact {
            match section.format.parse() {
                Ok(format) => self.format = format,
                Err(e) => tracing::warn!("{}, using compact", e),
            }
        }
        if section.file.is_some() {
            self.file = section.file.clone();
        }
    }

    /// Let `RUST_LOG` and the `SOL006_LOG_*` variables override what is set
    pub fn merge_with_env(&mut self) {
        if let Ok(directive) = std::env::var("RUST_LOG") {
            self.level = directive;
        }

        if let Ok(format) = std::env::var("SOL006_LOG_FORMAT") {
            match format.parse() {
                Ok(format) => self.format = format,
                Err(e) => tracing::warn!("SOL006_LOG_FORMAT ignored: {}", e),
            }
        }

        if let Some(path) = std::env::var_os("SOL006_LOG_FILE") {
            self.file = Some(path.into());
        }

        if let Ok(console) = std::env::var("SOL006_LOG_CONSOLE") {
            self.console = matches!(console.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    /// Where log lines go: the log file if set, else stderr, else nowhere
    fn make_writer(&self) -> Result<BoxMakeWriter> {
        if let Some(path) = &self.file {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            return Ok(BoxMakeWriter::new(Mutex::new(file)));
        }
        if self.console {
            Ok(BoxMakeWriter::new(std::io::stderr))
        } else {
            Ok(BoxMakeWriter::new(std::io::sink))
        }
    }

    fn use_ansi(&self) -> bool {
        use is_terminal::IsTerminal;
        self.file.is_none() && self.console && std::io::stderr().is_terminal()
    }
}

/// Install the process-wide subscriber and assign the invocation id
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = level_filter(&config.level)?;
    let writer = config.make_writer()?;
    let span_events = if config.span_events {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(true)
        .with_thread_ids(config.thread_ids)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_span_events(span_events);

    // Each format is a distinct subscriber type
    let installed = match config.format {
        LogFormat::Compact => tracing::subscriber::set_global_default(
            builder.with_ansi(config.use_ansi()).compact().finish(),
        ),
        LogFormat::Json => {
            tracing::subscriber::set_global_default(builder.with_ansi(false).json().finish())
        }
        LogFormat::Full => {
            tracing::subscriber::set_global_default(builder.with_ansi(config.use_ansi()).finish())
        }
    };
    installed.map_err(|e| Error::other(format!("a log subscriber is already installed: {}", e)))?;

    let run_id = generate_request_id();
    if REQUEST_ID.set(run_id.clone()).is_err() {
        return Err(Error::other("invocation id assigned twice"));
    }

    tracing::debug!(request_id = %run_id, settings = ?config, "Diagnostics ready");

    Ok(())
}

fn level_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| Error::config(format!("log level '{}' is not a valid filter: {}", directive, e)))
}

/// A fresh `req_<uuid>` id
pub fn generate_request_id() -> String {
    format!("req_{}", Uuid::new_v4().simple())
}

/// Id of this invocation, once logging is up
pub fn current_request_id() -> Option<&'static str> {
    REQUEST_ID.get().map(String::as_str)
}

/// Span for one command step; `duration_ms` is filled in by [`timing::Timer`]
pub fn create_operation_span(operation: &str, subject: Option<&str>) -> Span {
    tracing::info_span!(
        "operation",
        operation,
        request_id = current_request_id().unwrap_or("-"),
        subject = subject.unwrap_or_default(),
        duration_ms = field::Empty,
    )
}

/// Redaction of credentials found in IM descriptors
///
/// Cloud-init scripts and day-1 configuration primitives routinely carry
/// passwords and keys; those must never reach the log output.
pub mod redaction {
    use regex::Regex;
    use serde_json::Value;
    use std::sync::OnceLock;

    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

    fn patterns() -> &'static [Regex] {
        PATTERNS.get_or_init(|| {
            [
                r#"(?i)(password|passwd|pwd)[=:\s]+['"]?([^\s'"]{3,})['"]?"#,
                r#"(?i)(token|bearer)[=:\s]+['"]?([a-zA-Z0-9_.-]{10,})['"]?"#,
                r#"(?i)(ssh-rsa|ssh-ed25519)\s+[A-Za-z0-9+/=]{16,}"#,
            ]
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect()
        })
    }

    /// Mask passwords, tokens and public keys embedded in free text
    pub fn redact_sensitive(input: &str) -> String {
        patterns().iter().fold(input.to_string(), |text, pattern| {
            pattern.replace_all(&text, "$1=***").into_owned()
        })
    }

    /// Mask credentials anywhere in a descriptor tree
    ///
    /// Besides sensitive keys, `{name, value}` parameter entries whose name
    /// is sensitive get their value (and default-value) masked.
    pub fn redact_json_value(value: &mut Value) {
        match value {
            Value::Object(map) => {
                let sensitive_parameter = map
                    .get("name")
                    .and_then(Value::as_str)
                    .map_or(false, is_sensitive_key);
                for (field, entry) in map.iter_mut() {
                    let masked_parameter =
                        sensitive_parameter && (field == "value" || field == "default-value");
                    if masked_parameter || is_sensitive_key(field) {
                        *entry = Value::String("***".to_string());
                    } else {
                        redact_json_value(entry);
                    }
                }
            }
            Value::Array(arr) => arr.iter_mut().for_each(redact_json_value),
            Value::String(s) => *s = redact_sensitive(s),
            _ => {}
        }
    }

    const SENSITIVE_FRAGMENTS: &[&str] = &[
        "password",
        "passwd",
        "secret",
        "token",
        "credential",
        "private-key",
        "ssh-key",
    ];

    fn is_sensitive_key(name: &str) -> bool {
        let name = name.to_lowercase();
        SENSITIVE_FRAGMENTS.iter().any(|fragment| name.contains(fragment))
    }
}

/// Wall-clock timing of command steps
pub mod timing {
    use std::time::Instant;
    use tracing::Span;

    /// Opens an operation span and records its duration on drop
    pub struct Timer {
        start: Instant,
        span: Span,
        operation: String,
    }

    impl Timer {
        pub fn new(operation: &str) -> Self {
            Self::start(operation, None)
        }

        pub fn with_details(operation: &str, subject: &str) -> Self {
            Self::start(operation, Some(subject))
        }

        fn start(operation: &str, subject: Option<&str>) -> Self {
            Self {
                start: Instant::now(),
                span: super::create_operation_span(operation, subject),
                operation: operation.to_owned(),
            }
        }

        /// The span operations under this timer should enter
        pub fn span(&self) -> &Span {
            &self.span
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            let millis = self.start.elapsed().as_millis() as u64;
            self.span.record("duration_ms", millis);
            tracing::debug!(operation = %self.operation, duration_ms = millis, "Step finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cloud_init_password_is_masked() {
        let cloud_init = "#cloud-config\npassword: osm4u\nchpasswd: { expire: False }";
        let scrubbed = redaction::redact_sensitive(cloud_init);
        assert!(scrubbed.contains("password=***"));
        assert!(!scrubbed.contains("osm4u"));
    }

    #[test]
    fn test_parameter_values_are_masked() {
        let mut value = json!({
            "id": "hackfest_vnfd",
            "config-primitive": [{
                "name": "touch",
                "parameter": [
                    {"name": "password", "data-type": "STRING", "default-value": "osm4u"},
                    {"name": "filename", "data-type": "STRING", "default-value": "/home/ubuntu/touched"}
                ]
            }],
            "juju": {"charm": "simple", "secret": "abc"}
        });

        redaction::redact_json_value(&mut value);

        let parameters = &value["config-primitive"][0]["parameter"];
        assert_eq!(parameters[0]["default-value"], "***");
        assert_eq!(parameters[0]["name"], "password");
        assert_eq!(parameters[1]["default-value"], "/home/ubuntu/touched");
        assert_eq!(value["juju"]["secret"], "***");
        assert_eq!(value["id"], "hackfest_vnfd");
    }

    #[test]
    fn test_verbosity_levels() {
        let quiet = LoggingConfig::from_verbosity(0);
        assert_eq!(quiet.level, "warn");
        assert_eq!(quiet.format, LogFormat::Compact);
        assert!(!quiet.source_location);

        let debug = LoggingConfig::from_verbosity(2);
        assert_eq!(debug.level, "debug");
        assert!(debug.source_location && !debug.thread_ids);

        let trace = LoggingConfig::from_verbosity(5);
        assert_eq!(trace.level, "trace");
        assert_eq!(trace.format, LogFormat::Full);
        assert!(trace.thread_ids && trace.span_events);
    }

    #[test]
    fn test_apply_section() {
        let section = LoggingSection {
            level: Some("debug".to_string()),
            format: "json".to_string(),
            file: Some(PathBuf::from("sol006.log")),
        };

        let mut config = LoggingConfig::from_verbosity(0);
        config.apply_section(&section, 0);
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file, Some(PathBuf::from("sol006.log")));

        let mut config = LoggingConfig::from_verbosity(1);
        config.apply_section(&section, 1);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("FULL".parse::<LogFormat>(), Ok(LogFormat::Full));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_request_id_shape() {
        let id = generate_request_id();
        assert!(id.starts_with("req_"));
        assert_eq!(id.len(), 4 + 32);
    }
}

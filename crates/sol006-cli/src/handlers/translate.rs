//! Translate command handler

use super::read_document;
use crate::cli::{OutputFormat, TranslateArgs};
use crate::config::Config;
use crate::error::Result;
use crate::logging::{redaction, timing::Timer};
use crate::output::{OutputFormatter, OutputWriter};
use serde_json::Value;
use sol006_core::Translator;
use sol006_schemas::{ImDescriptorValidator, ValidationMode};
use std::path::Path;

/// Handle the translate command
pub fn handle_translate(args: TranslateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("translate", &args.file.display().to_string());
    let _entered = timer.span().enter();

    output.info(&format!("Translating {}", args.file.display()))?;
    let document = read_document(&args.file)?;

    if tracing::enabled!(tracing::Level::TRACE) {
        let mut redacted = document.clone();
        redaction::redact_json_value(&mut redacted);
        tracing::trace!(document = %redacted, "Decoded IM document");
    }

    let mode = args.mode.map(ValidationMode::from).unwrap_or(config.validation.mode);
    if mode != ValidationMode::Strict {
        output.warning(&format!(
            "{} validation does not check enumerations or cross references",
            mode
        ))?;
    }
    let translator = Translator::new(ImDescriptorValidator::with_mode(mode));
    let translated = translator.translate(&document)?;
    let rendered = translated.to_value()?;

    tracing::info!(
        kind = %translated.kind(),
        id = translated.id(),
        mode = %mode,
        "Translated descriptor"
    );
    output.success(&format!(
        "✓ Translated {} '{}' ({} validation)",
        translated.kind(),
        translated.id(),
        mode
    ))?;

    match args.save_to {
        Some(path) => {
            save_document(&path, &rendered, output.format())?;
            output.success(&format!("Saved SOL006 document to {}", path.display()))
        }
        None => output.data(&rendered),
    }
}

/// Write a translated document, format chosen by the destination extension
fn save_document(path: &Path, document: &Value, fallback: OutputFormat) -> Result<()> {
    let content = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::to_string_pretty(document)? + "\n",
        Some("yaml") | Some("yml") => serde_yaml::to_string(document)?,
        _ => fallback.format(document)?,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    Ok(())
}

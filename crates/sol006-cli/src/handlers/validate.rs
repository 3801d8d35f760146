//! Validate command handler

use super::read_document;
use crate::cli::{OutputFormat, ValidateArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use serde::Serialize;
use sol006_core::descriptor_kind;
use sol006_schemas::{ImDescriptorValidator, ValidationErrors, ValidationMode};

/// Machine-readable outcome of a validate run
#[derive(Debug, Serialize)]
struct ValidationReport<'a> {
    file: String,
    kind: Option<&'static str>,
    mode: ValidationMode,
    valid: bool,
    errors: &'a ValidationErrors,
}

/// Handle the validate command
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("validate", &args.file.display().to_string());
    let _entered = timer.span().enter();

    output.info(&format!("Validating {}", args.file.display()))?;
    let document = read_document(&args.file)?;

    let mode = args.mode.map(ValidationMode::from).unwrap_or(config.validation.mode);
    let kind = descriptor_kind(&document).ok();
    let errors = ImDescriptorValidator::with_mode(mode).collect(&document);
    tracing::info!(mode = %mode, errors = errors.len(), "Validation finished");

    if output.format() != OutputFormat::Human {
        output.data(&ValidationReport {
            file: args.file.display().to_string(),
            kind: kind.map(|k| k.as_str()),
            mode,
            valid: errors.is_empty(),
            errors: &errors,
        })?;
        return errors.into_result().map_err(Error::Validation);
    }

    if errors.is_empty() {
        let kind = kind.map_or("descriptor", |k| k.as_str());
        return output.success(&format!(
            "✓ {} is a valid IM {} ({} validation)",
            args.file.display(),
            kind,
            mode
        ));
    }

    output.error(&format!(
        "✗ {} failed {} validation with {} error(s)",
        args.file.display(),
        mode,
        errors.len()
    ))?;
    if args.detailed {
        output.validation_errors(&errors)?;
    } else {
        for error in errors.iter() {
            output.writeln(&format!("{}: {}", error.path, error.message))?;
        }
    }

    Err(Error::Validation(errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ModeArg;
    use crate::handlers::fixture;
    use crate::output::capture::captured;
    use serde_json::Value;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const BROKEN_VNFD: &str = "\
vnfd-catalog:
  vnfd:
  - id: broken
    connection-point:
    - name: eth0
    mgmt-interface:
      cp: eth1
    vdu:
    - id: vm
      vm-flavor:
        vcpu-count: many
";

    fn broken(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("broken_vnfd.yaml");
        std::fs::write(&path, BROKEN_VNFD).unwrap();
        path
    }

    fn args(file: PathBuf, detailed: bool) -> ValidateArgs {
        ValidateArgs {
            file,
            mode: None,
            detailed,
        }
    }

    #[test]
    fn test_valid_fixtures() {
        for name in ["cirros_vnfd_im.yaml", "magma_knf_im.yaml", "hackfest_charmed_nsd_im.yaml"] {
            let (mut output, out, status) = captured(OutputFormat::Human);
            handle_validate(args(fixture(name), false), &Config::default(), &mut output).unwrap();
            assert!(out.contents().is_empty());
            assert!(status.contents().contains("is a valid IM"), "{}", name);
        }
    }

    #[test]
    fn test_one_line_per_error_by_default() {
        let dir = TempDir::new().unwrap();
        let (mut output, out, status) = captured(OutputFormat::Human);
        let error = handle_validate(args(broken(&dir), false), &Config::default(), &mut output).unwrap_err();

        let errors = match error {
            Error::Validation(errors) => errors,
            other => panic!("unexpected error: {:?}", other),
        };
        assert_eq!(errors.len(), 2);

        let printed = out.contents();
        let lines: Vec<&str> = printed.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("$.vnfd-catalog.vnfd[0].mgmt-interface.cp: "));
        assert!(lines[1].starts_with("$.vnfd-catalog.vnfd[0].vdu[0].vm-flavor.vcpu-count: "));
        assert!(status.contents().contains("failed strict validation with 2 error(s)"));
    }

    #[test]
    fn test_detailed_lists_everything() {
        let dir = TempDir::new().unwrap();
        let (mut output, out, _) = captured(OutputFormat::Human);
        let result = handle_validate(args(broken(&dir), true), &Config::default(), &mut output);

        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(out.contents().starts_with("2 IM validation error(s)"));
        assert!(out.contents().contains("$.vnfd-catalog.vnfd[0].vdu[0].vm-flavor.vcpu-count"));
    }

    #[test]
    fn test_json_report() {
        let dir = TempDir::new().unwrap();
        let (mut output, out, _) = captured(OutputFormat::Json);
        let mut arguments = args(broken(&dir), false);
        arguments.mode = Some(ModeArg::Basic);
        handle_validate(arguments, &Config::default(), &mut output).unwrap();

        let report: Value = serde_json::from_str(&out.contents()).unwrap();
        assert_eq!(report["valid"], true);
        assert_eq!(report["kind"], "vnfd");
        assert_eq!(report["mode"], "basic");
        assert_eq!(report["errors"]["errors"], serde_json::json!([]));
    }
}

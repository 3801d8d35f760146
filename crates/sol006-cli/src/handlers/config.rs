//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigFormat};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use std::path::PathBuf;

/// Handle the config command
pub fn handle_config(action: ConfigAction, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match action {
        ConfigAction::Show { format } => handle_config_show(format, config, output),
        ConfigAction::Init { user, path, force } => handle_config_init(user, path, force, output),
    }
}

/// Handle config show subcommand
fn handle_config_show(format: ConfigFormat, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let content = match format {
        ConfigFormat::Toml => config.to_toml()?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)? + "\n",
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };

    output.write(&content)
}

/// Handle config init subcommand
fn handle_config_init(
    user: bool,
    path: Option<PathBuf>,
    force: bool,
    output: &mut OutputWriter,
) -> Result<()> {
    let destination = match path {
        Some(path) => path,
        None if user => Config::user_config_dir()
            .map(|dir| dir.join("config.toml"))
            .ok_or_else(|| Error::config("Unable to determine user config directory"))?,
        None => PathBuf::from(".sol006.toml"),
    };

    if destination.exists() && !force {
        return Err(Error::config(format!(
            "{} already exists; use --force to overwrite it",
            destination.display()
        )));
    }

    Config::default().save(&destination)?;
    output.success(&format!("✓ Created config at {}", destination.display()))?;
    output.info("Edit it to change the default output format, logging and validation mode.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::output::capture::captured;
    use sol006_schemas::ValidationMode;
    use tempfile::TempDir;

    #[test]
    fn test_show_toml() {
        let mut config = Config::default();
        config.validation.mode = ValidationMode::Partial;
        let (mut output, out, _) = captured(OutputFormat::Human);
        handle_config(ConfigAction::Show { format: ConfigFormat::Toml }, &config, &mut output).unwrap();

        let shown: Config = toml::from_str(&out.contents()).unwrap();
        assert_eq!(shown, config);
        assert!(out.contents().contains("[validation]"));
    }

    #[test]
    fn test_show_json() {
        let (mut output, out, _) = captured(OutputFormat::Human);
        handle_config(ConfigAction::Show { format: ConfigFormat::Json }, &Config::default(), &mut output).unwrap();

        let shown: serde_json::Value = serde_json::from_str(&out.contents()).unwrap();
        assert_eq!(shown["validation"]["mode"], "strict");
        assert_eq!(shown["output"]["format"], "human");
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sol006.yaml");
        let init = |force| ConfigAction::Init { user: false, path: Some(path.clone()), force };

        let (mut output, _, status) = captured(OutputFormat::Human);
        handle_config(init(false), &Config::default(), &mut output).unwrap();
        assert!(status.contents().contains("✓ Created config at"));
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());

        let error = handle_config(init(false), &Config::default(), &mut output).unwrap_err();
        assert!(matches!(error, Error::Config(_)));
        handle_config(init(true), &Config::default(), &mut output).unwrap();
    }
}

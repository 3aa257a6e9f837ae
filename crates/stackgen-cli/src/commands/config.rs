//! `stackgen config`: inspect the effective configuration.

use std::path::Path;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    root: &Path,
    explicit: Option<&Path>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            if output.is_json() {
                output.json(&value)?;
            } else {
                output.print(&display_value(&value))?;
            }
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                let serialised =
                    toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.header("Current Configuration:")?;
                output.print(&serialised)?;
            }
        }

        ConfigCommands::Path => {
            let path = explicit
                .map(Path::to_path_buf)
                .unwrap_or_else(|| AppConfig::project_config_path(root));
            output.print(&path.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<serde_json::Value> {
    config.get(key).ok_or_else(|| CliError::UnknownConfigKey {
        key: key.to_owned(),
    })
}

/// Strings print bare; everything else as compact JSON.
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        let value = get_config_value(&cfg, "registry.path").unwrap();
        assert_eq!(display_value(&value), "registry/services.yaml");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::UnknownConfigKey { .. })
        ));
    }

    #[test]
    fn lists_print_as_json() {
        let cfg = AppConfig::default();
        let value = get_config_value(&cfg, "prerequisites.tools").unwrap();
        assert_eq!(value, json!(["envsubst", "kubectl", "helm"]));
        assert_eq!(display_value(&value), r#"["envsubst","kubectl","helm"]"#);
    }

    #[test]
    fn get_no_color_default() {
        let cfg = AppConfig::default();
        let value = get_config_value(&cfg, "output.no_color").unwrap();
        assert_eq!(display_value(&value), "false");
    }
}

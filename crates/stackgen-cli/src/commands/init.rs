//! `stackgen init`: create a default configuration file.

use std::path::{Path, PathBuf};

use crate::{
    cli::InitArgs,
    commands::generate::ensure_root,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Write `stackgen.toml` with every default spelled out.
pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    ensure_root(&args.root)?;
    output.info("Initialising configuration...")?;

    match write_default_config(&args.root, args.force)? {
        Some(path) => output.success(&format!("Configuration created at {}", path.display()))?,
        None => output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            AppConfig::project_config_path(&args.root).display(),
        ))?,
    }

    Ok(())
}

/// Returns the written path, or `None` if a file exists and `force` is off.
fn write_default_config(root: &Path, force: bool) -> CliResult<Option<PathBuf>> {
    let config_path = AppConfig::project_config_path(root);
    if config_path.exists() && !force {
        return Ok(None);
    }

    let toml = toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;

    std::fs::write(&config_path, toml).map_err(|e| CliError::IoError {
        message: format!("Failed to write config to '{}'", config_path.display()),
        source: e,
    })?;

    Ok(Some(config_path))
}

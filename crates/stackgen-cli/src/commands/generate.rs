//! Implementation of the `stackgen generate` command.
//!
//! Responsibility: turn configuration and flags into `PipelineSettings`,
//! wire the real adapters into the core scaffold service, and display the
//! run report. No business logic lives here.

use std::path::Path;

use tracing::{info, instrument};

use stackgen_adapters::{LocalFilesystem, PathProbe, YamlRegistry};
use stackgen_core::prelude::{PipelineSettings, RunReport, ScaffoldService};

use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(root = %args.target.root.display()))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let root = &args.target.root;
    ensure_root(root)?;

    let settings = config.pipeline_settings(root, args.target.registry.as_deref())?;
    let service = build_service(settings)?;

    if !output.is_json() {
        output.header(&format!("Generating services in {}", root.display()))?;
    }
    let report = service.run()?;
    info!(services = report.services.len(), "Generation finished");

    if output.is_json() {
        output.json(&report)?;
    } else {
        print_report(&report, &output)?;
    }
    Ok(())
}

/// The scaffold service over the local filesystem and the process `PATH`.
pub fn build_service(settings: PipelineSettings) -> CliResult<ScaffoldService> {
    let service = ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(YamlRegistry::new()),
        Box::new(PathProbe::from_env()),
        settings,
    )?;
    Ok(service)
}

pub(crate) fn ensure_root(root: &Path) -> CliResult<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(CliError::RootNotFound {
            path: root.to_path_buf(),
        })
    }
}

fn print_report(report: &RunReport, output: &OutputManager) -> CliResult<()> {
    for name in &report.services {
        output.success(&format!("Scaffolded {name}"))?;
    }
    for path in &report.preserved {
        output.info(&format!("Kept existing {}", path.display()))?;
    }

    output.print("")?;
    output.info(&format!(
        "{} files written, {} kept",
        report.written.len(),
        report.preserved.len()
    ))?;
    if report.schema_copies > 0 {
        output.info(&format!(
            "Synced {} shared schema files",
            report.schema_copies
        ))?;
    }
    output.success(&format!(
        "Generated {} services and {} dashboards",
        report.services.len(),
        report.dashboards
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_root_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = ensure_root(&tmp.path().join("absent")).unwrap_err();
        assert!(matches!(err, CliError::RootNotFound { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn existing_root_is_accepted() {
        let tmp = TempDir::new().unwrap();
        assert!(ensure_root(tmp.path()).is_ok());
    }
}

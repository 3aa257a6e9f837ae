//! `stackgen check`: probe the required tools only.

use serde::Serialize;

use stackgen_adapters::PathProbe;
use stackgen_core::{
    application::ApplicationError,
    prelude::{StackgenError, ToolProbe},
};

use crate::{config::AppConfig, error::CliResult, output::OutputManager};

/// Availability of one required tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolStatus {
    pub tool: String,
    pub available: bool,
}

pub fn execute(config: AppConfig, output: OutputManager) -> CliResult<()> {
    let statuses = probe_all(&PathProbe::from_env(), &config.prerequisites.tools);

    if output.is_json() {
        output.json(&statuses)?;
    } else {
        for status in &statuses {
            if status.available {
                output.success(&status.tool)?;
            } else {
                output.error(&format!("{} not found on PATH", status.tool))?;
            }
        }
    }

    let missing: Vec<String> = statuses
        .into_iter()
        .filter(|s| !s.available)
        .map(|s| s.tool)
        .collect();
    if !missing.is_empty() {
        return Err(
            StackgenError::from(ApplicationError::MissingPrerequisites { tools: missing }).into(),
        );
    }

    output.success("All required tools are installed")?;
    Ok(())
}

fn probe_all(probe: &dyn ToolProbe, tools: &[String]) -> Vec<ToolStatus> {
    tools
        .iter()
        .map(|tool| ToolStatus {
            tool: tool.clone(),
            available: probe.is_available(tool),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackgen_adapters::StaticProbe;

    #[test]
    fn statuses_keep_configured_order() {
        let probe = StaticProbe::with_tools(["helm"]);
        let tools = vec!["kubectl".to_string(), "helm".to_string()];
        assert_eq!(
            probe_all(&probe, &tools),
            vec![
                ToolStatus {
                    tool: "kubectl".into(),
                    available: false
                },
                ToolStatus {
                    tool: "helm".into(),
                    available: true
                },
            ]
        );
    }
}

//! Required external tools.
//!
//! The pipeline itself does not shell out, but the generated artifacts are
//! only useful with these tools installed, so a run refuses to start without
//! them.

use tracing::{debug, instrument, warn};

use crate::{
    application::{ApplicationError, ports::ToolProbe},
    error::StackgenResult,
};

/// Tools probed when configuration does not say otherwise.
pub const DEFAULT_REQUIRED_TOOLS: [&str; 3] = ["envsubst", "kubectl", "helm"];

/// Every tool in `tools` the probe cannot find, in input order.
pub fn missing_tools<S: AsRef<str>>(probe: &dyn ToolProbe, tools: &[S]) -> Vec<String> {
    tools
        .iter()
        .map(|t| t.as_ref())
        .filter(|tool| {
            let found = probe.is_available(tool);
            debug!(tool, found, "Probed tool");
            !found
        })
        .map(str::to_owned)
        .collect()
}

/// Fail with [`ApplicationError::MissingPrerequisites`] naming all absent tools.
#[instrument(skip_all, fields(count = tools.len()))]
pub fn ensure_tools<S: AsRef<str>>(probe: &dyn ToolProbe, tools: &[S]) -> StackgenResult<()> {
    let missing = missing_tools(probe, tools);
    if missing.is_empty() {
        return Ok(());
    }
    for tool in &missing {
        warn!(tool = %tool, "Required tool not found");
    }
    Err(ApplicationError::MissingPrerequisites { tools: missing }.into())
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::application::ports::MockToolProbe;
    use crate::error::StackgenError;

    #[test]
    fn all_present_is_ok() {
        let mut probe = MockToolProbe::new();
        probe.expect_is_available().times(3).return_const(true);
        assert!(ensure_tools(&probe, &DEFAULT_REQUIRED_TOOLS).is_ok());
    }

    #[test]
    fn every_missing_tool_is_reported() {
        let mut probe = MockToolProbe::new();
        probe
            .expect_is_available()
            .with(eq("envsubst"))
            .return_const(true);
        probe
            .expect_is_available()
            .with(eq("kubectl"))
            .return_const(false);
        probe
            .expect_is_available()
            .with(eq("helm"))
            .return_const(false);

        let err = ensure_tools(&probe, &DEFAULT_REQUIRED_TOOLS).unwrap_err();
        assert_eq!(
            err,
            StackgenError::Application(ApplicationError::MissingPrerequisites {
                tools: vec!["kubectl".into(), "helm".into()],
            })
        );
    }

    #[test]
    fn empty_tool_list_never_probes() {
        let mut probe = MockToolProbe::new();
        probe.expect_is_available().never();
        let none: [&str; 0] = [];
        assert!(ensure_tools(&probe, &none).is_ok());
    }
}

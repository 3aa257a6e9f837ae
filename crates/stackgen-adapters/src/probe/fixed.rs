//! Fixed tool set for tests and offline runs.

use std::collections::BTreeSet;

use stackgen_core::application::ports::ToolProbe;

/// Reports exactly the tools it was built with.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    tools: BTreeSet<String>,
}

impl StaticProbe {
    /// A probe that finds nothing.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_tools<I, S>(tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tools: tools.into_iter().map(Into::into).collect(),
        }
    }
}

impl ToolProbe for StaticProbe {
    fn is_available(&self, tool: &str) -> bool {
        self.tools.contains(tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_only_listed_tools() {
        let probe = StaticProbe::with_tools(["helm"]);
        assert!(probe.is_available("helm"));
        assert!(!probe.is_available("kubectl"));
        assert!(!StaticProbe::none().is_available("helm"));
    }
}

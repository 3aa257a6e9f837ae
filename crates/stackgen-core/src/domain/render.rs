//! Textual variable substitution.
//!
//! Templates are plain strings with `{{VARIABLE}}` placeholders. There are no
//! conditionals, loops, or filters; emitters that need a variation pick a
//! different template string instead.

use std::collections::HashMap;

use crate::domain::record::ServiceRecord;

/// Context for template rendering.
///
/// ## Built-in Variables
///
/// | Variable | Example | Source |
/// |----------|---------|--------|
/// | `SERVICE_NAME` | "billing" | `name` |
/// | `SERVICE_PATH` | "services/billing" | `path` |
/// | `LANGUAGE` | "go" | `language` |
/// | `PORT` | "8080" | `port` |
/// | `NAMESPACE` | "core" | `namespace` |
/// | `TEAM` | "payments" | `team` |
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    /// An empty context; every placeholder is left as-is until a variable is added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context holding the built-in variables of one service record.
    pub fn for_record(record: &ServiceRecord) -> Self {
        // Paths are written with forward slashes regardless of platform; they
        // end up in YAML and CI globs.
        let path = record
            .path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        Self::new()
            .with_variable("SERVICE_NAME", &record.name)
            .with_variable("SERVICE_PATH", path)
            .with_variable("LANGUAGE", &record.language)
            .with_variable("PORT", record.port.to_string())
            .with_variable("NAMESPACE", &record.namespace)
            .with_variable("TEAM", &record.team)
    }

    /// Add a variable, consuming self and returning the extended context.
    ///
    /// Later values for the same key replace earlier ones.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{KEY}}` with its value.
    ///
    /// - `{{UNKNOWN}}` remains as literal `{{UNKNOWN}}`
    /// - values are not re-scanned, so a value containing `{{X}}` is inserted verbatim
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let key = &after[..end];
                    match self.variables.get(key.trim()) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push_str("{{");
                            out.push_str(key);
                            out.push_str("}}");
                        }
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_variables_are_substituted() {
        let record = ServiceRecord::new("foo", "services/foo", "go", 8080, "core", "x");
        let ctx = RenderContext::for_record(&record);
        assert_eq!(
            ctx.render("FROM {{LANGUAGE}}:latest\nEXPOSE {{PORT}}"),
            "FROM go:latest\nEXPOSE 8080"
        );
        assert_eq!(ctx.get("SERVICE_PATH"), Some("services/foo"));
    }

    #[test]
    fn unknown_placeholders_are_kept() {
        let ctx = RenderContext::new().with_variable("A", "1");
        assert_eq!(ctx.render("{{A}}-{{B}}"), "1-{{B}}");
    }

    #[test]
    fn whitespace_inside_braces_is_tolerated() {
        let ctx = RenderContext::new().with_variable("A", "1");
        assert_eq!(ctx.render("{{ A }}"), "1");
    }

    #[test]
    fn values_are_not_rescanned() {
        let ctx = RenderContext::new()
            .with_variable("A", "{{B}}")
            .with_variable("B", "nope");
        assert_eq!(ctx.render("{{A}}"), "{{B}}");
    }

    #[test]
    fn unterminated_placeholder_is_copied() {
        let ctx = RenderContext::new().with_variable("A", "1");
        assert_eq!(ctx.render("x {{A"), "x {{A");
    }

    #[test]
    fn github_expressions_survive() {
        // `${{ secrets.X }}` is not one of ours and must pass through.
        let ctx = RenderContext::new().with_variable("A", "1");
        assert_eq!(
            ctx.render("token: ${{ secrets.GITHUB_TOKEN }}"),
            "token: ${{ secrets.GITHUB_TOKEN }}"
        );
    }
}

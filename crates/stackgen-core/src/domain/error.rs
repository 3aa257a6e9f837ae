// ============================================================================
// domain/error.rs - REGISTRY AND RECORD ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they are collected and re-reported by the CLI)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Record validation (400-level equivalent)
    // ========================================================================
    #[error("service #{index}{}: required field '{field}' is missing or empty", describe(.name))]
    MissingField {
        index: usize,
        name: Option<String>,
        field: &'static str,
    },

    #[error("service #{index}{}: port '{value}' is not a valid port number", describe(.name))]
    InvalidPort {
        index: usize,
        name: Option<String>,
        value: String,
    },

    #[error("service '{name}': path '{path}' must be relative and stay inside the repository root")]
    UnsafePath { name: String, path: String },

    #[error("service name '{name}' cannot be used as a file name: {reason}")]
    InvalidName { name: String, reason: String },

    // ========================================================================
    // Configuration-shaped domain input
    // ========================================================================
    #[error("unknown artifact kind '{0}'")]
    UnknownArtifactKind(String),

    #[error("unknown write policy '{0}' (expected 'overwrite' or 'preserve')")]
    UnknownWritePolicy(String),

    #[error("dashboard namespace '{0}' cannot be used as a file name")]
    InvalidNamespace(String),
}

fn describe(name: &Option<String>) -> String {
    name.as_deref()
        .map(|n| format!(" ('{n}')"))
        .unwrap_or_default()
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingField { field, .. } => vec![
                format!("Add a non-empty '{field}' to the service entry"),
                "Every entry needs: name, path, language, port, namespace, team".into(),
            ],
            Self::InvalidPort { .. } => vec![
                "Ports must be integers between 1 and 65535".into(),
                "Example: port: 8080".into(),
            ],
            Self::UnsafePath { path, .. } => vec![
                format!("'{path}' escapes the repository root"),
                "Use a relative path such as services/<name>".into(),
            ],
            Self::InvalidName { .. } => vec![
                "Use alphanumeric characters, hyphens, and underscores".into(),
                "Examples: billing, user-api, ledger_v2".into(),
            ],
            Self::UnknownArtifactKind(_) => vec![
                "Known kinds: readme, dockerfile, helm_chart, argo_application, ci_workflow, dashboard, shared_schema".into(),
            ],
            Self::UnknownWritePolicy(_) => {
                vec!["Set the policy to either \"overwrite\" or \"preserve\"".into()]
            }
            Self::InvalidNamespace(_) => vec![
                "Namespaces in dashboards.namespaces must be plain names without path separators"
                    .into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingField { .. }
            | Self::InvalidPort { .. }
            | Self::UnsafePath { .. }
            | Self::InvalidName { .. } => ErrorCategory::Validation,
            Self::UnknownArtifactKind(_)
            | Self::UnknownWritePolicy(_)
            | Self::InvalidNamespace(_) => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}

//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not in the
//! registry's content. Content errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while running the pipeline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// One or more required executables are not on `PATH`.
    #[error("Missing required tools: {}", .tools.join(", "))]
    MissingPrerequisites { tools: Vec<String> },

    /// The registry file does not exist.
    #[error("Service registry not found at {path}")]
    RegistryNotFound { path: PathBuf },

    /// The registry file exists but is not a valid document.
    #[error("Failed to parse service registry {path}: {reason}")]
    RegistryParse { path: PathBuf, reason: String },

    /// A shared schema file to copy into `api` directories is missing.
    #[error("Shared schema file not found: {path}")]
    SchemaSourceMissing { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingPrerequisites { tools } => {
                let mut out = vec!["Install the missing tools and make sure they are on PATH:".into()];
                out.extend(tools.iter().map(|t| format!("  • {t}")));
                out.push("Or adjust prerequisites.tools in stackgen.toml".into());
                out
            }
            Self::RegistryNotFound { path } => vec![
                format!("Expected a registry at {}", path.display()),
                "Pass --registry <FILE> or set registry.path in stackgen.toml".into(),
            ],
            Self::RegistryParse { .. } => vec![
                "The registry must be YAML with a top-level 'services' list".into(),
                "Each entry needs: name, path, language, port, namespace, team".into(),
            ],
            Self::SchemaSourceMissing { path } => vec![
                format!("Create {} or change schema_sync.files", path.display()),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingPrerequisites { .. } => ErrorCategory::Prerequisite,
            Self::RegistryNotFound { .. } | Self::SchemaSourceMissing { .. } => {
                ErrorCategory::NotFound
            }
            Self::RegistryParse { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
        }
    }
}

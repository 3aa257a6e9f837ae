//! Unified error handling for stackgen-core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for stackgen-core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StackgenError {
    /// The registry or configured domain input is invalid.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Orchestration or I/O failed.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl StackgenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
            },
            Self::Application(e) => e.category(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Prerequisite,
    Internal,
}

/// Convenient result type alias.
pub type StackgenResult<T> = Result<T, StackgenError>;

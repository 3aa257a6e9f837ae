//! Application layer for stackgen.
//!
//! This layer contains:
//! - **Services**: the scaffold pipeline, registry loading, prerequisite checks
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer sequences the pipeline; what each artifact looks like
//! lives in `crate::emitters` and `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    PipelineSettings, RegistryService, RunReport, ScaffoldService, WriteOutcome, ensure_tools,
    missing_tools,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, RegistryParser, ToolProbe};

pub use error::ApplicationError;

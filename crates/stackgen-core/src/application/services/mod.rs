//! Application services - orchestrate use cases.

pub mod prerequisites;
pub mod registry_service;
pub mod scaffold_service;

pub use prerequisites::{ensure_tools, missing_tools};
pub use registry_service::RegistryService;
pub use scaffold_service::{PipelineSettings, RunReport, ScaffoldService, WriteOutcome};

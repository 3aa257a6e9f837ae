//! stackgen core - service scaffolding from a declarative registry.
//!
//! This crate provides the domain and application layers, following
//! hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stackgen-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService, RegistryService)     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, RegistryParser, ToolProbe) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stackgen-adapters (Infrastructure)   │
//! │ (LocalFilesystem, YamlRegistry, ...)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Emitters (`crate::emitters`) render artifacts to memory; only the
//! scaffold service writes, through the `Filesystem` port.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stackgen_core::prelude::*;
//!
//! let service = ScaffoldService::new(
//!     filesystem, // impl Filesystem
//!     parser,     // impl RegistryParser
//!     probe,      // impl ToolProbe
//!     PipelineSettings::with_root("."),
//! )?;
//! let report = service.run()?;
//! println!("{} services scaffolded", report.services.len());
//! ```

pub mod application;
pub mod domain;
pub mod emitters;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        PipelineSettings, RegistryService, RunReport, ScaffoldService,
        ports::{Filesystem, RegistryParser, ToolProbe},
    };
    pub use crate::domain::{
        ArtifactKind, PolicyTable, RenderContext, RenderedFile, ServiceRecord, WritePolicy,
    };
    pub use crate::emitters::{Emitter, EmitterRegistry, EmitterSettings};
    pub use crate::error::{StackgenError, StackgenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Core domain layer for stackgen.
//!
//! Pure data and rules: what a service record is, which artifacts exist,
//! how each is written, and where it lives. No filesystem access happens
//! here; that goes through the ports in [`crate::application::ports`].

pub mod artifact;
pub mod error;
pub mod layout;
pub mod record;
pub mod render;

pub use artifact::{ArtifactKind, PolicyTable, RenderedFile, WritePolicy};
pub use error::{DomainError, ErrorCategory};
pub use record::{PortValue, RawServiceRecord, RegistryDocument, ServiceRecord, validate_registry};
pub use render::RenderContext;

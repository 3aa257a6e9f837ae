//! Application ports (traits) for external dependencies.
//!
//! - `Filesystem`: file operations
//! - `RegistryParser`: registry text → document
//! - `ToolProbe`: external executable discovery

pub mod output;

pub use output::{Filesystem, RegistryParser, ToolProbe};

#[cfg(test)]
pub use output::MockToolProbe;

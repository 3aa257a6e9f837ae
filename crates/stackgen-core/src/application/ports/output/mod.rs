//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stackgen-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::RegistryDocument;
use crate::error::StackgenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stackgen_adapters::filesystem::LocalFilesystem` (production)
/// - `stackgen_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StackgenResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> StackgenResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> StackgenResult<String>;

    /// Copy a file, replacing the destination if present.
    fn copy_file(&self, from: &Path, to: &Path) -> StackgenResult<()>;

    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is an existing regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// All directories named `name` below `root`, sorted.
    ///
    /// Returns an empty list when `root` does not exist.
    fn find_dirs_named(&self, root: &Path, name: &str) -> StackgenResult<Vec<PathBuf>>;
}

/// Port for turning registry text into a document.
///
/// Implemented by:
/// - `stackgen_adapters::registry::YamlRegistry`
pub trait RegistryParser: Send + Sync {
    fn parse(&self, source: &str) -> Result<RegistryDocument, String>;
}

/// Port for discovering external executables.
///
/// Implemented by:
/// - `stackgen_adapters::probe::PathProbe` (searches `PATH`)
/// - `stackgen_adapters::probe::StaticProbe` (fixed set, for tests)
#[cfg_attr(test, mockall::automock)]
pub trait ToolProbe: Send + Sync {
    fn is_available(&self, tool: &str) -> bool;
}

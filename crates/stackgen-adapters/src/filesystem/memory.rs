//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use stackgen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::StackgenResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same storage, so a test can hand one clone to a service
/// and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.inner.read().ok()?.files.get(path).cloned()
    }

    /// Seed a file, creating its parent directories.
    pub fn insert_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        let mut inner = self.write_lock();
        if let Some(parent) = path.parent() {
            insert_dir_chain(&mut inner.directories, parent);
        }
        inner.files.insert(path, content.into());
    }

    /// Whether `path` was created as a directory.
    pub fn is_dir(&self, path: &Path) -> bool {
        self.read_lock().directories.contains(path)
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read_lock().files.keys().cloned().collect()
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn insert_dir_chain(directories: &mut BTreeSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

fn not_found(path: &Path, what: &str) -> ApplicationError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("{what} does not exist"),
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> StackgenResult<()> {
        insert_dir_chain(&mut self.write_lock().directories, path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> StackgenResult<()> {
        let mut inner = self.write_lock();

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(not_found(path, "Parent directory").into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> StackgenResult<String> {
        self.read_file(path)
            .ok_or_else(|| not_found(path, "File").into())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> StackgenResult<()> {
        let content = self.read_to_string(from)?;
        self.write_file(to, &content)
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.read_lock();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.read_lock().files.contains_key(path)
    }

    fn find_dirs_named(&self, root: &Path, name: &str) -> StackgenResult<Vec<PathBuf>> {
        Ok(self
            .read_lock()
            .directories
            .iter()
            .filter(|d| d.starts_with(root) && d.as_path() != root)
            .filter(|d| d.file_name().is_some_and(|n| n == name))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/r/a/b.txt"), "x").is_err());
        fs.create_dir_all(Path::new("/r/a")).unwrap();
        fs.write_file(Path::new("/r/a/b.txt"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("/r/a/b.txt")).as_deref(), Some("x"));
        assert!(fs.is_file(Path::new("/r/a/b.txt")));
        assert!(!fs.is_file(Path::new("/r/a")));
    }

    #[test]
    fn clones_share_storage() {
        let a = MemoryFilesystem::new();
        let b = a.clone();
        a.insert_file("/r/x.txt", "1");
        assert!(b.exists(Path::new("/r/x.txt")));
        assert!(b.is_dir(Path::new("/r")));
    }

    #[test]
    fn find_dirs_named_is_scoped_to_root() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/r/services/a/api")).unwrap();
        fs.create_dir_all(Path::new("/r/other/api")).unwrap();
        let found = fs
            .find_dirs_named(Path::new("/r/services"), "api")
            .unwrap();
        assert_eq!(found, vec![PathBuf::from("/r/services/a/api")]);
    }

    #[test]
    fn copy_missing_source_fails() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/r")).unwrap();
        assert!(
            fs.copy_file(Path::new("/r/none"), Path::new("/r/dst"))
                .is_err()
        );
    }
}

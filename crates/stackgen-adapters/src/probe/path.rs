//! `PATH` lookup.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::trace;

use stackgen_core::application::ports::ToolProbe;

/// Finds executables by scanning the directories of a `PATH`-style list.
///
/// Presence only: nothing is executed and versions are not checked.
#[derive(Debug, Clone)]
pub struct PathProbe {
    dirs: Vec<PathBuf>,
}

impl PathProbe {
    /// Probe using the current process's `PATH`.
    pub fn from_env() -> Self {
        Self::from_path_var(env::var_os("PATH").unwrap_or_default())
    }

    /// Probe using an explicit `PATH`-style value.
    pub fn from_path_var(path: impl Into<OsString>) -> Self {
        let path = path.into();
        Self {
            dirs: env::split_paths(&path)
                .filter(|d| !d.as_os_str().is_empty())
                .collect(),
        }
    }

    /// Full path of `tool`, if found.
    pub fn locate(&self, tool: &str) -> Option<PathBuf> {
        self.dirs.iter().find_map(|dir| {
            candidates(dir, tool)
                .into_iter()
                .find(|candidate| is_executable(candidate))
        })
    }
}

impl Default for PathProbe {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ToolProbe for PathProbe {
    fn is_available(&self, tool: &str) -> bool {
        let found = self.locate(tool);
        trace!(tool, path = ?found, "PATH lookup");
        found.is_some()
    }
}

#[cfg(windows)]
fn candidates(dir: &Path, tool: &str) -> Vec<PathBuf> {
    let exts = env::var("PATHEXT").unwrap_or_else(|_| ".EXE;.CMD;.BAT;.COM".into());
    std::iter::once(dir.join(tool))
        .chain(exts.split(';').filter(|e| !e.is_empty()).map(|ext| dir.join(format!("{tool}{ext}"))))
        .collect()
}

#[cfg(not(windows))]
fn candidates(dir: &Path, tool: &str) -> Vec<PathBuf> {
    vec![dir.join(tool)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

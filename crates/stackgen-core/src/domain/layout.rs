//! Where things live in the generated repository.
//!
//! All paths are relative to the repository root.

use std::path::{Path, PathBuf};

use crate::domain::record::ServiceRecord;

/// Directories created under every service's `path`.
pub const SKELETON_DIRS: [&str; 8] = [
    "cmd",
    "internal/handlers",
    "internal/repository",
    "internal/service",
    "internal/models",
    "api",
    "tests/unit",
    "tests/integration",
];

pub const README_FILE: &str = "README.md";
pub const DOCKERFILE: &str = "Dockerfile";

pub const HELM_CHARTS_DIR: &str = "infrastructure/helm/charts";
pub const ARGO_APPLICATIONS_DIR: &str = "infrastructure/argo/applications";
pub const WORKFLOWS_DIR: &str = ".github/workflows";
pub const DASHBOARDS_DIR: &str = "infrastructure/monitoring/grafana/dashboards";

/// Directory name that receives the shared schema files.
pub const API_DIR_NAME: &str = "api";

/// Namespaces that get a dashboard, independent of the registry.
pub const DEFAULT_DASHBOARD_NAMESPACES: [&str; 4] = ["core", "platform", "data", "edge"];

pub fn skeleton_dirs(record: &ServiceRecord) -> impl Iterator<Item = PathBuf> + '_ {
    SKELETON_DIRS.iter().map(|dir| record.path.join(dir))
}

pub fn readme_path(record: &ServiceRecord) -> PathBuf {
    record.path.join(README_FILE)
}

pub fn dockerfile_path(record: &ServiceRecord) -> PathBuf {
    record.path.join(DOCKERFILE)
}

pub fn helm_chart_dir(record: &ServiceRecord) -> PathBuf {
    Path::new(HELM_CHARTS_DIR).join(&record.name)
}

pub fn argo_application_path(record: &ServiceRecord) -> PathBuf {
    Path::new(ARGO_APPLICATIONS_DIR).join(format!("{}.yaml", record.name))
}

pub fn workflow_path(record: &ServiceRecord) -> PathBuf {
    Path::new(WORKFLOWS_DIR).join(format!("{}.yml", record.name))
}

pub fn dashboard_path(namespace: &str) -> PathBuf {
    Path::new(DASHBOARDS_DIR).join(format!("{namespace}.json"))
}

//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the
//! [`PipelineSettings`] built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (`--registry`, `--no-color`; handled at the call-site)
//! 2. `STACKGEN__<SECTION>__<KEY>` environment variables
//! 3. `--config FILE`, or `<root>/stackgen.toml` when present
//! 4. The user config file (`directories` config dir), when present
//! 5. Built-in defaults (always present)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use stackgen_core::{
    domain::PolicyTable,
    error::StackgenResult,
    prelude::{EmitterSettings, PipelineSettings},
};

/// File name of the project configuration, relative to the root.
pub const PROJECT_CONFIG_FILE: &str = "stackgen.toml";

const ENV_PREFIX: &str = "STACKGEN";

/// Keys whose environment values are comma-separated lists.
const LIST_KEYS: [&str; 3] = [
    "prerequisites.tools",
    "schema_sync.files",
    "dashboards.namespaces",
];

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub registry: RegistryConfig,
    pub prerequisites: PrerequisitesConfig,
    pub emitters: EmitterSettings,
    pub schema_sync: SchemaSyncConfig,
    pub dashboards: DashboardsConfig,
    /// Artifact kind → `overwrite` | `preserve`.
    pub policies: BTreeMap<String, String>,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registry file, relative to the root unless absolute.
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrerequisitesConfig {
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaSyncConfig {
    /// Tree searched for `api` directories.
    pub services_dir: PathBuf,
    /// Files copied into each `api` directory.
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardsConfig {
    pub namespaces: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let policies = PolicyTable::default()
            .iter()
            .map(|(kind, policy)| (kind.to_string(), policy.to_string()))
            .collect();

        Self {
            registry: RegistryConfig::default(),
            prerequisites: PrerequisitesConfig::default(),
            emitters: EmitterSettings::default(),
            schema_sync: SchemaSyncConfig::default(),
            dashboards: DashboardsConfig::default(),
            policies,
            output: OutputConfig::default(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: PipelineSettings::default().registry_path,
        }
    }
}

impl Default for PrerequisitesConfig {
    fn default() -> Self {
        Self {
            tools: PipelineSettings::default().required_tools,
        }
    }
}

impl Default for SchemaSyncConfig {
    fn default() -> Self {
        let pipeline = PipelineSettings::default();
        Self {
            services_dir: pipeline.services_dir,
            files: pipeline.schema_files,
        }
    }
}

impl Default for DashboardsConfig {
    fn default() -> Self {
        Self {
            namespaces: PipelineSettings::default().dashboard_namespaces,
        }
    }
}

impl AppConfig {
    /// Load configuration for the repository at `root`.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist. Without it, `<root>/stackgen.toml` is read if present.
    pub fn load(config_file: Option<&Path>, root: &Path) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        if let Some(user) = Self::user_config_path() {
            builder = builder.add_source(
                File::from(user)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        builder = match config_file {
            Some(path) => builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(true),
            ),
            None => builder.add_source(
                File::from(Self::project_config_path(root))
                    .format(FileFormat::Toml)
                    .required(false),
            ),
        };

        let env = LIST_KEYS.iter().fold(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
            |env, key| env.with_list_parse_key(key),
        );

        let config: Self = builder
            .add_source(env)
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")?;

        Ok(config)
    }

    /// `<root>/stackgen.toml`.
    pub fn project_config_path(root: &Path) -> PathBuf {
        root.join(PROJECT_CONFIG_FILE)
    }

    /// Per-user configuration file, if the platform has a config directory.
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "stackgen", "stackgen")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// The settings one pipeline run uses for `root`.
    ///
    /// Fails on an unknown artifact kind or write policy in `[policies]`.
    pub fn pipeline_settings(
        &self,
        root: &Path,
        registry_override: Option<&Path>,
    ) -> StackgenResult<PipelineSettings> {
        let policies = PolicyTable::default().with_overrides(
            self.policies
                .iter()
                .map(|(kind, policy)| (kind.as_str(), policy.as_str())),
        )?;

        Ok(PipelineSettings {
            root: root.to_path_buf(),
            registry_path: registry_override
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.registry.path.clone()),
            required_tools: self.prerequisites.tools.clone(),
            services_dir: self.schema_sync.services_dir.clone(),
            schema_files: self.schema_sync.files.clone(),
            dashboard_namespaces: self.dashboards.namespaces.clone(),
            emitters: self.emitters.clone(),
            policies,
        })
    }

    /// Look up a dotted key, e.g. `registry.path` or `policies.readme`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let value = serde_json::to_value(self).ok()?;
        key.split('.')
            .try_fold(value, |node, part| match node {
                serde_json::Value::Object(mut map) => map.remove(part),
                _ => None,
            })
    }
}

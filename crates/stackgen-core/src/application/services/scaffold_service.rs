//! Scaffold Service - main application orchestrator.
//!
//! This service runs the whole pipeline:
//! 1. Probe required tools
//! 2. Load the registry
//! 3. Per service: directory skeleton, README, emitters
//! 4. Copy shared schema files into every `api` directory
//! 5. Write one dashboard per configured namespace
//!
//! Every step is fail-fast. Nothing is rolled back; a re-run converges
//! because all writes are idempotent under the [`PolicyTable`].

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, RegistryParser, ToolProbe},
        services::{prerequisites, registry_service::read_registry},
    },
    domain::{
        ArtifactKind, PolicyTable, RenderedFile, ServiceRecord, WritePolicy,
        layout::{self, API_DIR_NAME, DEFAULT_DASHBOARD_NAMESPACES},
    },
    emitters::{DashboardEmitter, EmitterRegistry, EmitterSettings},
    error::StackgenResult,
};

/// Everything a run needs besides its adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Repository root every output path is relative to.
    pub root: PathBuf,
    /// Registry file; relative paths are resolved against `root`.
    pub registry_path: PathBuf,
    /// Executables that must be on `PATH`.
    pub required_tools: Vec<String>,
    /// Tree searched for `api` directories, relative to `root`.
    pub services_dir: PathBuf,
    /// Shared files copied into every `api` directory, relative to `root`.
    pub schema_files: Vec<PathBuf>,
    /// One dashboard is written per entry.
    pub dashboard_namespaces: Vec<String>,
    pub emitters: EmitterSettings,
    pub policies: PolicyTable,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            registry_path: PathBuf::from("registry/services.yaml"),
            required_tools: prerequisites::DEFAULT_REQUIRED_TOOLS
                .iter()
                .map(|t| t.to_string())
                .collect(),
            services_dir: PathBuf::from("services"),
            schema_files: vec![
                PathBuf::from("shared/schemas/common.yaml"),
                PathBuf::from("shared/locales/en.json"),
            ],
            dashboard_namespaces: DEFAULT_DASHBOARD_NAMESPACES
                .iter()
                .map(|ns| ns.to_string())
                .collect(),
            emitters: EmitterSettings::default(),
            policies: PolicyTable::default(),
        }
    }
}

impl PipelineSettings {
    /// Defaults rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Absolute-or-root-relative location of the registry.
    pub fn resolved_registry_path(&self) -> PathBuf {
        self.root.join(&self.registry_path)
    }
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Service names, in registry order.
    pub services: Vec<String>,
    /// Files written this run, relative to the root.
    pub written: Vec<PathBuf>,
    /// Files left untouched because their policy preserves existing content.
    pub preserved: Vec<PathBuf>,
    /// Shared schema files copied (one per file per `api` directory).
    pub schema_copies: usize,
    /// Dashboards written.
    pub dashboards: usize,
}

/// Outcome of writing one rendered file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Preserved,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    parser: Box<dyn RegistryParser>,
    probe: Box<dyn ToolProbe>,
    emitters: EmitterRegistry,
    dashboards: DashboardEmitter,
    settings: PipelineSettings,
}

impl ScaffoldService {
    /// Create a new scaffold service with the built-in emitters.
    ///
    /// Fails if a configured dashboard namespace cannot be used as a file name.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        parser: Box<dyn RegistryParser>,
        probe: Box<dyn ToolProbe>,
        settings: PipelineSettings,
    ) -> StackgenResult<Self> {
        let emitters = EmitterRegistry::builtin(&settings.emitters);
        let dashboards = DashboardEmitter::new(settings.dashboard_namespaces.iter().cloned())?;
        Ok(Self {
            filesystem,
            parser,
            probe,
            emitters,
            dashboards,
            settings,
        })
    }

    /// Replace the per-service emitter set.
    pub fn with_emitters(mut self, emitters: EmitterRegistry) -> Self {
        self.emitters = emitters;
        self
    }

    /// Run the full pipeline.
    #[instrument(skip_all, fields(root = %self.settings.root.display()))]
    pub fn run(&self) -> StackgenResult<RunReport> {
        self.check_prerequisites()?;
        let records = self.load_registry()?;

        let mut report = RunReport::default();
        for record in &records {
            self.scaffold_service(record, &mut report)?;
        }

        self.sync_schemas(&mut report)?;
        self.register_dashboards(&mut report)?;

        info!(
            services = report.services.len(),
            written = report.written.len(),
            preserved = report.preserved.len(),
            "Run completed"
        );
        Ok(report)
    }

    /// Fail unless every required tool is available.
    pub fn check_prerequisites(&self) -> StackgenResult<()> {
        prerequisites::ensure_tools(self.probe.as_ref(), &self.settings.required_tools)
    }

    /// Load and validate the registry.
    pub fn load_registry(&self) -> StackgenResult<Vec<ServiceRecord>> {
        read_registry(
            self.filesystem.as_ref(),
            self.parser.as_ref(),
            &self.settings.resolved_registry_path(),
        )
    }

    /// Skeleton, README, and every emitter's files for one service.
    #[instrument(skip_all, fields(service = %record.name))]
    pub fn scaffold_service(
        &self,
        record: &ServiceRecord,
        report: &mut RunReport,
    ) -> StackgenResult<()> {
        info!(path = %record.path.display(), "Scaffolding service");

        for dir in layout::skeleton_dirs(record) {
            self.filesystem
                .create_dir_all(&self.settings.root.join(dir))?;
        }

        let readme = RenderedFile::new(ArtifactKind::Readme, layout::readme_path(record), "");
        self.record_outcome(&readme.path, self.write(&readme)?, report);

        for file in self.emitters.render_all(record) {
            self.record_outcome(&file.path, self.write(&file)?, report);
        }

        report.services.push(record.name.clone());
        Ok(())
    }

    /// Copy the shared schema files into every `api` directory under the
    /// services tree, whether or not the directory belongs to a registered
    /// service.
    #[instrument(skip_all)]
    pub fn sync_schemas(&self, report: &mut RunReport) -> StackgenResult<()> {
        let root = &self.settings.root;
        let api_dirs = self
            .filesystem
            .find_dirs_named(&root.join(&self.settings.services_dir), API_DIR_NAME)?;

        if api_dirs.is_empty() {
            debug!("No api directories found");
            return Ok(());
        }

        let sources = self
            .settings
            .schema_files
            .iter()
            .map(|rel| {
                let abs = root.join(rel);
                if self.filesystem.is_file(&abs) {
                    Ok(abs)
                } else {
                    Err(ApplicationError::SchemaSourceMissing { path: abs })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let policy = self.settings.policies.policy_for(ArtifactKind::SharedSchema);
        for dir in &api_dirs {
            for source in &sources {
                let Some(file_name) = source.file_name() else {
                    continue;
                };
                let target = dir.join(file_name);
                if policy == WritePolicy::Preserve && self.filesystem.exists(&target) {
                    report.preserved.push(self.relative(&target));
                    continue;
                }
                self.filesystem.copy_file(source, &target)?;
                debug!(target = %target.display(), "Copied shared schema");
                report.schema_copies += 1;
            }
        }

        info!(
            directories = api_dirs.len(),
            copies = report.schema_copies,
            "Shared schemas synced"
        );
        Ok(())
    }

    /// Write one dashboard per configured namespace.
    #[instrument(skip_all)]
    pub fn register_dashboards(&self, report: &mut RunReport) -> StackgenResult<()> {
        for file in self.dashboards.render_all() {
            let outcome = self.write(&file)?;
            if outcome == WriteOutcome::Written {
                report.dashboards += 1;
            }
            self.record_outcome(&file.path, outcome, report);
        }
        Ok(())
    }

    /// Write a rendered file under the root, honouring its kind's policy.
    pub fn write(&self, file: &RenderedFile) -> StackgenResult<WriteOutcome> {
        let target = self.settings.root.join(&file.path);

        if self.settings.policies.policy_for(file.kind) == WritePolicy::Preserve
            && self.filesystem.exists(&target)
        {
            debug!(path = %file.path.display(), kind = %file.kind, "Preserved existing file");
            return Ok(WriteOutcome::Preserved);
        }

        if let Some(parent) = target.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&target, &file.content)?;
        debug!(path = %file.path.display(), kind = %file.kind, "Wrote file");
        Ok(WriteOutcome::Written)
    }

    fn record_outcome(&self, path: &Path, outcome: WriteOutcome, report: &mut RunReport) {
        match outcome {
            WriteOutcome::Written => report.written.push(path.to_path_buf()),
            WriteOutcome::Preserved => report.preserved.push(path.to_path_buf()),
        }
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.settings.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

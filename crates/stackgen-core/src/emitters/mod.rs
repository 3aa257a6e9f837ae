//! Artifact emitters.
//!
//! An [`Emitter`] turns one [`ServiceRecord`] into the files of one artifact
//! kind. Emitters never touch the filesystem: they return [`RenderedFile`]s
//! and the scaffold service decides, per the [`PolicyTable`], whether each
//! one is written.
//!
//! [`PolicyTable`]: crate::domain::PolicyTable

mod argocd;
mod dashboard;
mod dockerfile;
mod helm;
mod workflow;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{ArtifactKind, RenderContext, RenderedFile, ServiceRecord};

pub use argocd::ArgoApplicationEmitter;
pub use dashboard::DashboardEmitter;
pub use dockerfile::DockerfileEmitter;
pub use helm::HelmChartEmitter;
pub use workflow::CiWorkflowEmitter;

/// Renders one artifact kind for a service record.
pub trait Emitter: Send + Sync {
    /// Artifact kind of every file this emitter returns.
    fn kind(&self) -> ArtifactKind;

    /// Render the artifact's files, paths relative to the repository root.
    fn render(&self, record: &ServiceRecord) -> Vec<RenderedFile>;
}

/// Values shared by emitters that are not part of a service record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterSettings {
    /// Git repository ArgoCD syncs from.
    pub repo_url: String,
    /// Container registry prefix; empty means the bare service name.
    pub image_registry: String,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            repo_url: "https://github.com/your-org/platform.git".into(),
            image_registry: String::new(),
        }
    }
}

impl EmitterSettings {
    /// Image repository for a service, e.g. `ghcr.io/acme/billing`.
    pub fn image_repository(&self, record: &ServiceRecord) -> String {
        let registry = self.image_registry.trim_end_matches('/');
        if registry.is_empty() {
            record.name.clone()
        } else {
            format!("{registry}/{}", record.name)
        }
    }

    /// Record variables plus `REPO_URL` and `IMAGE_REPOSITORY`.
    pub fn context_for(&self, record: &ServiceRecord) -> RenderContext {
        RenderContext::for_record(record)
            .with_variable("REPO_URL", &self.repo_url)
            .with_variable("IMAGE_REPOSITORY", self.image_repository(record))
    }
}

/// Ordered set of emitters run for every record.
#[derive(Default)]
pub struct EmitterRegistry {
    emitters: Vec<Box<dyn Emitter>>,
}

impl fmt::Debug for EmitterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.emitters.iter().map(|e| e.kind()))
            .finish()
    }
}

impl EmitterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dockerfile, Helm chart, ArgoCD application, CI workflow.
    pub fn builtin(settings: &EmitterSettings) -> Self {
        Self::new()
            .with(DockerfileEmitter::new(settings.clone()))
            .with(HelmChartEmitter::new(settings.clone()))
            .with(ArgoApplicationEmitter::new(settings.clone()))
            .with(CiWorkflowEmitter::new(settings.clone()))
    }

    pub fn with(mut self, emitter: impl Emitter + 'static) -> Self {
        self.register(Box::new(emitter));
        self
    }

    pub fn register(&mut self, emitter: Box<dyn Emitter>) {
        self.emitters.push(emitter);
    }

    pub fn kinds(&self) -> Vec<ArtifactKind> {
        self.emitters.iter().map(|e| e.kind()).collect()
    }

    /// Render every registered emitter for `record`, in registration order.
    pub fn render_all(&self, record: &ServiceRecord) -> Vec<RenderedFile> {
        self.emitters
            .iter()
            .flat_map(|e| e.render(record))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }
}

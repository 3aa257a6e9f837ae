//! `infrastructure/argo/applications/<name>.yaml`

use crate::domain::{ArtifactKind, RenderedFile, ServiceRecord, layout};
use crate::emitters::{Emitter, EmitterSettings};

const TEMPLATE: &str = r#"apiVersion: argoproj.io/v1alpha1
kind: Application
metadata:
  name: {{SERVICE_NAME}}
  namespace: argocd
  labels:
    team: {{TEAM}}
spec:
  project: default
  source:
    repoURL: {{REPO_URL}}
    targetRevision: HEAD
    path: infrastructure/helm/charts/{{SERVICE_NAME}}
  destination:
    server: https://kubernetes.default.svc
    namespace: {{NAMESPACE}}
  syncPolicy:
    automated:
      prune: true
      selfHeal: true
    syncOptions:
      - CreateNamespace=true
"#;

pub struct ArgoApplicationEmitter {
    settings: EmitterSettings,
}

impl ArgoApplicationEmitter {
    pub fn new(settings: EmitterSettings) -> Self {
        Self { settings }
    }
}

impl Emitter for ArgoApplicationEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ArgoApplication
    }

    fn render(&self, record: &ServiceRecord) -> Vec<RenderedFile> {
        let ctx = self.settings.context_for(record);
        vec![RenderedFile::new(
            self.kind(),
            layout::argo_application_path(record),
            ctx.render(TEMPLATE),
        )]
    }
}

//! `infrastructure/helm/charts/<name>/{Chart.yaml,values.yaml}`

use crate::domain::{ArtifactKind, RenderedFile, ServiceRecord, layout};
use crate::emitters::{Emitter, EmitterSettings};

const CHART: &str = r#"apiVersion: v2
name: {{SERVICE_NAME}}
description: Helm chart for the {{SERVICE_NAME}} service
type: application
version: 0.1.0
appVersion: "latest"
maintainers:
  - name: {{TEAM}}
"#;

const VALUES: &str = r#"replicaCount: 1

image:
  repository: {{IMAGE_REPOSITORY}}
  tag: latest
  pullPolicy: IfNotPresent

service:
  type: ClusterIP
  port: {{PORT}}

namespace: {{NAMESPACE}}

labels:
  app: {{SERVICE_NAME}}
  team: {{TEAM}}

resources:
  requests:
    cpu: 100m
    memory: 128Mi
  limits:
    cpu: 500m
    memory: 512Mi
"#;

pub struct HelmChartEmitter {
    settings: EmitterSettings,
}

impl HelmChartEmitter {
    pub fn new(settings: EmitterSettings) -> Self {
        Self { settings }
    }
}

impl Emitter for HelmChartEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::HelmChart
    }

    fn render(&self, record: &ServiceRecord) -> Vec<RenderedFile> {
        let ctx = self.settings.context_for(record);
        let dir = layout::helm_chart_dir(record);
        vec![
            RenderedFile::new(self.kind(), dir.join("Chart.yaml"), ctx.render(CHART)),
            RenderedFile::new(self.kind(), dir.join("values.yaml"), ctx.render(VALUES)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(settings: EmitterSettings) -> Vec<RenderedFile> {
        let record = ServiceRecord::new("foo", "services/foo", "go", 8080, "core", "x");
        HelmChartEmitter::new(settings).render(&record)
    }

    #[test]
    fn chart_is_named_after_service() {
        let files = render(EmitterSettings::default());
        assert!(files[0].content.contains("name: foo\n"));
        assert!(files[0].path.ends_with("foo/Chart.yaml"));
    }

    #[test]
    fn values_carry_port_and_namespace() {
        let files = render(EmitterSettings::default());
        let values = &files[1].content;
        assert!(values.contains("  port: 8080\n"));
        assert!(values.contains("namespace: core\n"));
        assert!(values.contains("  repository: foo\n"));
    }

    #[test]
    fn image_registry_prefixes_repository() {
        let files = render(EmitterSettings {
            image_registry: "registry.local".into(),
            ..EmitterSettings::default()
        });
        assert!(files[1].content.contains("repository: registry.local/foo"));
    }
}

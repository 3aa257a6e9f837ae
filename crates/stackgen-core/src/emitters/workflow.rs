//! `.github/workflows/<name>.yml`

use crate::domain::{ArtifactKind, RenderedFile, ServiceRecord, layout};
use crate::emitters::{Emitter, EmitterSettings};

// `${{ ... }}` expressions belong to GitHub Actions and pass through rendering.
const TEMPLATE: &str = r#"name: {{SERVICE_NAME}}

on:
  push:
    branches: [main]
    paths:
      - "{{SERVICE_PATH}}/**"
      - ".github/workflows/{{SERVICE_NAME}}.yml"
  pull_request:
    paths:
      - "{{SERVICE_PATH}}/**"

jobs:
  build:
    runs-on: ubuntu-latest
    defaults:
      run:
        working-directory: {{SERVICE_PATH}}
    steps:
      - uses: actions/checkout@v4

      - name: Build image
        run: docker build -t {{IMAGE_REPOSITORY}}:${{ github.sha }} .

      - name: Lint chart
        run: helm lint ${{ github.workspace }}/infrastructure/helm/charts/{{SERVICE_NAME}}
"#;

pub struct CiWorkflowEmitter {
    settings: EmitterSettings,
}

impl CiWorkflowEmitter {
    pub fn new(settings: EmitterSettings) -> Self {
        Self { settings }
    }
}

impl Emitter for CiWorkflowEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::CiWorkflow
    }

    fn render(&self, record: &ServiceRecord) -> Vec<RenderedFile> {
        let ctx = self.settings.context_for(record);
        vec![RenderedFile::new(
            self.kind(),
            layout::workflow_path(record),
            ctx.render(TEMPLATE),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_is_scoped_to_service_path() {
        let record = ServiceRecord::new("foo", "services/foo", "go", 8080, "core", "x");
        let files = CiWorkflowEmitter::new(EmitterSettings::default()).render(&record);
        let content = &files[0].content;

        assert!(content.starts_with("name: foo\n"));
        assert!(content.contains("- \"services/foo/**\""));
        assert!(content.contains("working-directory: services/foo\n"));
        assert!(content.contains("docker build -t foo:${{ github.sha }} ."));
    }
}

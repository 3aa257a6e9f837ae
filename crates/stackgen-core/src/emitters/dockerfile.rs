//! `<path>/Dockerfile`

use crate::domain::{ArtifactKind, RenderedFile, ServiceRecord, layout};
use crate::emitters::{Emitter, EmitterSettings};

const TEMPLATE: &str = r#"FROM {{LANGUAGE}}:latest

LABEL service="{{SERVICE_NAME}}" \
      team="{{TEAM}}"

WORKDIR /app
COPY . .

EXPOSE {{PORT}}
"#;

pub struct DockerfileEmitter {
    settings: EmitterSettings,
}

impl DockerfileEmitter {
    pub fn new(settings: EmitterSettings) -> Self {
        Self { settings }
    }
}

impl Emitter for DockerfileEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Dockerfile
    }

    fn render(&self, record: &ServiceRecord) -> Vec<RenderedFile> {
        let ctx = self.settings.context_for(record);
        vec![RenderedFile::new(
            self.kind(),
            layout::dockerfile_path(record),
            ctx.render(TEMPLATE),
        )]
    }
}

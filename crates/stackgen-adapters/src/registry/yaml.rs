//! YAML service registry.
//!
//! # Format
//!
//! ```yaml
//! services:
//!   - name: billing
//!     path: services/billing
//!     language: go
//!     port: 8080
//!     namespace: core
//!     team: payments
//! ```
//!
//! Unknown keys are ignored. An empty file, or one without `services`,
//! is an empty registry.

use serde::Deserialize;
use serde_yaml::Value;
use tracing::instrument;

use stackgen_core::{
    application::ports::RegistryParser,
    domain::{RawServiceRecord, RegistryDocument},
};

/// Parses registry files with `serde_yaml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlRegistry;

impl YamlRegistry {
    pub fn new() -> Self {
        Self
    }
}

impl RegistryParser for YamlRegistry {
    #[instrument(skip_all, fields(bytes = source.len()))]
    fn parse(&self, source: &str) -> Result<RegistryDocument, String> {
        // A blank or comment-only file is null, as is `services:` with no value.
        #[derive(Deserialize)]
        struct Document {
            #[serde(default)]
            services: Option<Vec<RawServiceRecord>>,
        }

        if source.trim().is_empty() {
            return Ok(RegistryDocument::default());
        }

        let value: Value = serde_yaml::from_str(source).map_err(|e| e.to_string())?;
        if value.is_null() {
            return Ok(RegistryDocument::default());
        }

        let doc: Document = serde_yaml::from_value(value).map_err(|e| e.to_string())?;
        Ok(RegistryDocument {
            services: doc.services.unwrap_or_default(),
        })
    }
}

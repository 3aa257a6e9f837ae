//! Registry loading.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, RegistryParser},
    },
    domain::{ServiceRecord, validate_registry},
    error::StackgenResult,
};

/// Reads and validates a service registry.
pub struct RegistryService {
    filesystem: Box<dyn Filesystem>,
    parser: Box<dyn RegistryParser>,
}

impl RegistryService {
    pub fn new(filesystem: Box<dyn Filesystem>, parser: Box<dyn RegistryParser>) -> Self {
        Self { filesystem, parser }
    }

    /// Load the registry at `path`, in file order.
    pub fn load(&self, path: &Path) -> StackgenResult<Vec<ServiceRecord>> {
        read_registry(self.filesystem.as_ref(), self.parser.as_ref(), path)
    }
}

#[instrument(skip(filesystem, parser), fields(path = %path.display()))]
pub(crate) fn read_registry(
    filesystem: &dyn Filesystem,
    parser: &dyn RegistryParser,
    path: &Path,
) -> StackgenResult<Vec<ServiceRecord>> {
    if !filesystem.is_file(path) {
        return Err(ApplicationError::RegistryNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let text = filesystem.read_to_string(path)?;
    let document = parser
        .parse(&text)
        .map_err(|reason| ApplicationError::RegistryParse {
            path: path.to_path_buf(),
            reason,
        })?;
    debug!(entries = document.services.len(), "Registry parsed");

    let records = validate_registry(document)?;
    info!(services = records.len(), "Registry loaded");
    Ok(records)
}

//! Infrastructure adapter for writing the impdp details sidecar.

use crate::domain::errors::{ExportError, Result};
use crate::domain::models::ImportDetails;
use crate::ports::details_port::DetailsPort;
use log::info;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Concrete implementation of `DetailsPort` for the local filesystem.
///
/// The record goes to a temp file in the target directory and is renamed
/// into place, so a half-written sidecar never becomes visible.
pub struct DetailsFileAdapter;

impl DetailsPort for DetailsFileAdapter {
    fn write_details(&self, details: &ImportDetails, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, details)
            .map_err(|e| ExportError::ArtifactError(e.to_string()))?;
        tmp.write_all(b"\n")?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| ExportError::IoError(e.error))?;

        info!("Wrote import details to {}", path.display());
        Ok(())
    }
}

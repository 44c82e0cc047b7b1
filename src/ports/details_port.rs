//! Port for persisting the impdp details sidecar.

use crate::domain::errors::Result;
use crate::domain::models::ImportDetails;
use std::path::Path;

pub trait DetailsPort: Send + Sync {
    /// Writes `details` to `path`. The file is either fully written or
    /// absent; a half-written sidecar must never become visible.
    fn write_details(&self, details: &ImportDetails, path: &Path) -> Result<()>;
}

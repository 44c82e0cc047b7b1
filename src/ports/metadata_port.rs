//! Port for reading the schema facts an export run needs.
//!
//! Any struct that implements `MetadataPort` can back the workflow: the
//! real Oracle adapter in production, plain stubs in tests.

use crate::domain::errors::Result;
use crate::domain::models::SchemaDetails;

pub trait MetadataPort: Send + Sync {
    /// Lists schemas eligible for export, in alphabetical order.
    ///
    /// An empty list means the database answered but nothing qualified;
    /// connection and query failures are `Err`. Callers rely on the
    /// distinction.
    fn list_schemas(&self) -> Result<Vec<String>>;

    /// Username and default tablespace for one schema.
    fn schema_details(&self, schema: &str) -> Result<SchemaDetails>;

    /// Server-side filesystem path registered for the database's Data
    /// Pump directory alias.
    fn data_pump_dir(&self) -> Result<String>;
}

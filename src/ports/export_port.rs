//! Port for the external dump utility.

use crate::domain::errors::Result;
use crate::domain::models::ExportOutcome;

pub trait ExportPort: Send + Sync {
    /// Runs the export of `schema` into `dump_file`, streaming the
    /// utility's log to the console and a local mirror as it goes.
    ///
    /// `dump_file` is a server-side name relative to the database's Data
    /// Pump directory, not a local path.
    fn run_export(&self, schema: &str, dump_file: &str) -> Result<ExportOutcome>;
}

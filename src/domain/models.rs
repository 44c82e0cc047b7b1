//! Domain models representing a single export run.
//!
//! These models are used across application, ports, and infrastructure
//! layers to maintain a consistent data representation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Connection details for the target database.
#[derive(Clone)]
pub struct ConnectionParams {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub service: String,
}

impl ConnectionParams {
    /// EZConnect descriptor, `host:port/service`.
    pub fn descriptor(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.service)
    }

    /// The `user/password@descriptor` token expdp expects.
    pub fn credential(&self) -> String {
        format!("{}/{}@{}", self.user, self.password, self.descriptor())
    }

    /// Same shape as `credential` with the password masked, safe to echo.
    pub fn redacted(&self) -> String {
        format!("{}/********@{}", self.user, self.descriptor())
    }
}

// Manual Debug so the password never lands in logs or panic messages.
impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("user", &self.user)
            .field("password", &"********")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("service", &self.service)
            .finish()
    }
}

/// Username and default tablespace of the schema being exported.
#[derive(Debug, Clone)]
pub struct SchemaDetails {
    pub username: String,
    pub default_tablespace: String,
}

/// The sidecar record a later impdp run is configured from.
///
/// Serialized to `impdp_details_<schema>_<timestamp>.json` with exactly
/// these four keys; never mutated after the write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDetails {
    /// Schema name as stored in the data dictionary.
    pub schema_name: String,
    /// Default tablespace the import should remap onto.
    pub default_tablespace: String,
    /// Server-side path of the database's Data Pump directory.
    pub data_pump_dir: String,
    /// Dump file name, relative to the Data Pump directory.
    pub dump_file: String,
}

/// Outcome of a successful expdp invocation.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// The dump file name the utility was asked to write.
    pub dump_file: String,
    /// Local mirror of the utility's log.
    pub log_file: PathBuf,
}

/// Everything the success summary echoes back to the operator.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub schema: String,
    pub dump_file: String,
    pub log_file: PathBuf,
    pub details_file: PathBuf,
}

/// Timestamp shared by every artifact name generated in one run,
/// `YYYYMMDD_HHMMSS` in local time.
pub fn run_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Dump file name for a schema and run timestamp.
pub fn dump_filename(schema: &str, timestamp: &str) -> String {
    format!("{}_{}.dmp", schema, timestamp)
}

/// Sidecar file name for a schema and run timestamp.
pub fn details_filename(schema: &str, timestamp: &str) -> String {
    format!("impdp_details_{}_{}.json", schema, timestamp)
}

/// Server-side log name: the dump name with its extension swapped for `.log`.
pub fn server_log_filename(dump_file: &str) -> String {
    Path::new(dump_file)
        .with_extension("log")
        .to_string_lossy()
        .into_owned()
}

//! Infrastructure adapter for reading export metadata from Oracle.

use crate::domain::errors::{ExportError, Result};
use crate::domain::models::{ConnectionParams, SchemaDetails};
use crate::ports::metadata_port::MetadataPort;
use log::debug;
use oracle::Connection;

/// Directory alias the database reserves for Data Pump dump and log files.
pub const DATA_PUMP_DIR_ALIAS: &str = "DATA_PUMP_DIR";

// SQL Constants
const SQL_LIST_SCHEMAS: &str = "SELECT username FROM dba_users WHERE account_status = 'OPEN' AND default_tablespace <> 'SYSTEM' ORDER BY username";
const SQL_SCHEMA_DETAILS: &str =
    "SELECT username, default_tablespace FROM dba_users WHERE username = :1";
const SQL_DIRECTORY_PATH: &str =
    "SELECT directory_path FROM dba_directories WHERE directory_name = :1";

/// Concrete implementation of `MetadataPort` for Oracle databases.
///
/// Each call opens a fresh connection and releases it when the call
/// returns, on every exit path.
pub struct OracleMetadataAdapter {
    params: ConnectionParams,
}

impl OracleMetadataAdapter {
    pub fn new(params: ConnectionParams) -> Self {
        Self { params }
    }

    /// Establishes a fresh connection to the Oracle database.
    fn get_conn(&self) -> Result<Connection> {
        Connection::connect(
            &self.params.user,
            &self.params.password,
            self.params.descriptor(),
        )
        .map_err(ExportError::from)
    }
}

impl MetadataPort for OracleMetadataAdapter {
    fn list_schemas(&self) -> Result<Vec<String>> {
        debug!("Listing exportable schemas");
        let conn = self.get_conn()?;
        let rows = conn
            .query(SQL_LIST_SCHEMAS, &[])
            .map_err(ExportError::from)?;
        let mut schemas = Vec::new();
        for row_result in rows {
            let row = row_result.map_err(ExportError::from)?;
            let name: String = row.get(0).map_err(ExportError::from)?;
            schemas.push(name);
        }
        Ok(schemas)
    }

    fn schema_details(&self, schema: &str) -> Result<SchemaDetails> {
        debug!("Fetching details for schema {}", schema);
        let conn = self.get_conn()?;
        let mut rows = conn
            .query(SQL_SCHEMA_DETAILS, &[&schema])
            .map_err(ExportError::from)?;
        match rows.next() {
            Some(row_result) => {
                let row = row_result.map_err(ExportError::from)?;
                Ok(SchemaDetails {
                    username: row.get(0).map_err(ExportError::from)?,
                    default_tablespace: row.get(1).map_err(ExportError::from)?,
                })
            }
            None => Err(ExportError::SchemaNotFound(schema.to_string())),
        }
    }

    fn data_pump_dir(&self) -> Result<String> {
        let conn = self.get_conn()?;
        let mut rows = conn
            .query(SQL_DIRECTORY_PATH, &[&DATA_PUMP_DIR_ALIAS])
            .map_err(ExportError::from)?;
        match rows.next() {
            Some(row_result) => {
                let row = row_result.map_err(ExportError::from)?;
                row.get(0).map_err(ExportError::from)
            }
            None => Err(ExportError::DirectoryNotFound(
                DATA_PUMP_DIR_ALIAS.to_string(),
            )),
        }
    }
}

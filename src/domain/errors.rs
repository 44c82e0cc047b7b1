//! Core error definitions for the schema export tool.
//!
//! This module provides a centralized `ExportError` enum and a `Result`
//! type used throughout the application. The variants keep the failure
//! classes the workflow reacts to distinguishable: a connection failure is
//! not the same as an empty schema list, and a missing `expdp` binary is
//! not the same as a nonzero exit from it.

use thiserror::Error;

/// Error types encountered during the export workflow.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Oracle error: {0}")]
    OracleError(String),

    #[error("connected, but no schema is eligible for export")]
    NoEligibleSchemas,

    #[error("schema '{0}' not found")]
    SchemaNotFound(String),

    #[error("directory '{0}' is not defined in the database")]
    DirectoryNotFound(String),

    #[error("'expdp' was not found on the PATH; ensure the Oracle Database utilities are installed")]
    UtilityNotFound,

    #[error("expdp exited with code {0}")]
    UtilityFailed(i32),

    #[error("Details file generation failed: {0}")]
    ArtifactError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<oracle::Error> for ExportError {
    fn from(e: oracle::Error) -> Self {
        ExportError::OracleError(e.to_string())
    }
}

/// A specialized Result type for the schema export tool.
pub type Result<T> = std::result::Result<T, ExportError>;

//! The core application logic that sequences the export workflow.
//!
//! Listing, selection, metadata recording, and the expdp run happen in a
//! straight line. Every database step is wrapped in a spinner plus an
//! elapsed-time report; every abort prints its reason to the interactive
//! output and hands the error back to the caller for the failed summary.

use crate::domain::errors::{ExportError, Result};
use crate::domain::models::{
    details_filename, dump_filename, run_timestamp, ExportReport, ImportDetails,
};
use crate::infrastructure::console::menu::select_schema;
use crate::infrastructure::console::spinner::{Spinner, StepTimer};
use crate::ports::details_port::DetailsPort;
use crate::ports::export_port::ExportPort;
use crate::ports::metadata_port::MetadataPort;
use log::info;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Orchestrates the end-to-end export of a single Oracle schema.
pub struct ExportWorkflow {
    metadata: Arc<dyn MetadataPort>,
    exporter: Arc<dyn ExportPort>,
    details: Arc<dyn DetailsPort>,
}

impl ExportWorkflow {
    /// Creates a new workflow over the provided components.
    pub fn new(
        metadata: Arc<dyn MetadataPort>,
        exporter: Arc<dyn ExportPort>,
        details: Arc<dyn DetailsPort>,
    ) -> Self {
        Self {
            metadata,
            exporter,
            details,
        }
    }

    /// Runs the whole workflow, reading menu answers from `input` and
    /// writing prompts and progress to `output`.
    pub fn run<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<ExportReport> {
        let schemas = match self.fetch_schemas() {
            Ok(schemas) => schemas,
            Err(e) => {
                writeln!(output, "Could not fetch schemas. Exiting.")?;
                return Err(e);
            }
        };
        if schemas.is_empty() {
            writeln!(output, "No eligible schemas found. Exiting.")?;
            return Err(ExportError::NoEligibleSchemas);
        }

        let schema = select_schema(&schemas, input, output)?;
        writeln!(output, "\nYou have selected schema: {}", schema)?;

        let (details_file, dump_file) = match self.record_details(&schema, output) {
            Ok(pair) => pair,
            Err(e) => {
                writeln!(output, "Could not create the import details file. Exiting.")?;
                return Err(e);
            }
        };

        let outcome = match self.exporter.run_export(&schema, &dump_file) {
            Ok(outcome) => outcome,
            Err(e) => {
                writeln!(output, "Export failed.")?;
                return Err(e);
            }
        };

        Ok(ExportReport {
            schema,
            dump_file: outcome.dump_file,
            log_file: outcome.log_file,
            details_file,
        })
    }

    /// Lists eligible schemas behind a spinner and an elapsed report.
    fn fetch_schemas(&self) -> Result<Vec<String>> {
        let spinner = Spinner::start("Connecting to database and fetching schemas...");
        let _timer = StepTimer::new("Completed in");
        let result = self.metadata.list_schemas();
        spinner.stop();

        if let Ok(schemas) = &result {
            info!("Found {} eligible schemas", schemas.len());
        }
        result
    }

    /// Looks up schema facts, stamps the run, and writes the sidecar.
    ///
    /// The dump filename and the details filename embed one shared
    /// timestamp; nothing is written when any lookup fails.
    fn record_details<W: Write>(&self, schema: &str, output: &mut W) -> Result<(PathBuf, String)> {
        writeln!(
            output,
            "\nCreating the import details file for schema: {}...",
            schema
        )?;
        let spinner = Spinner::start("Fetching schema details...");
        let _timer = StepTimer::new("Completed in");

        let looked_up = self.build_details(schema);
        spinner.stop();
        let (details, details_path, dump_file) = looked_up?;

        self.details.write_details(&details, &details_path)?;
        writeln!(
            output,
            "Created import details file: {}",
            details_path.display()
        )?;
        Ok((details_path, dump_file))
    }

    fn build_details(&self, schema: &str) -> Result<(ImportDetails, PathBuf, String)> {
        let schema_details = self.metadata.schema_details(schema)?;
        let dir_path = self.metadata.data_pump_dir()?;

        let timestamp = run_timestamp();
        let dump_file = dump_filename(schema, &timestamp);
        let details_path = PathBuf::from(details_filename(schema, &timestamp));

        let details = ImportDetails {
            schema_name: schema_details.username,
            default_tablespace: schema_details.default_tablespace,
            data_pump_dir: dir_path,
            dump_file: dump_file.clone(),
        };
        Ok((details, details_path, dump_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ExportOutcome, SchemaDetails};
    use std::io::Cursor;
    use std::path::Path;
    use std::sync::Mutex;

    struct StubMetadata {
        schemas: Vec<String>,
        details: Option<SchemaDetails>,
        dir: Option<String>,
        fail_listing: bool,
    }

    impl StubMetadata {
        fn healthy() -> Self {
            Self {
                schemas: vec!["HR".to_string(), "SALES".to_string()],
                details: Some(SchemaDetails {
                    username: "SALES".to_string(),
                    default_tablespace: "USERS".to_string(),
                }),
                dir: Some("/u01/app/oracle/dpdump/".to_string()),
                fail_listing: false,
            }
        }
    }

    impl MetadataPort for StubMetadata {
        fn list_schemas(&self) -> Result<Vec<String>> {
            if self.fail_listing {
                return Err(ExportError::OracleError(
                    "ORA-12541: TNS:no listener".to_string(),
                ));
            }
            Ok(self.schemas.clone())
        }

        fn schema_details(&self, schema: &str) -> Result<SchemaDetails> {
            self.details
                .clone()
                .ok_or_else(|| ExportError::SchemaNotFound(schema.to_string()))
        }

        fn data_pump_dir(&self) -> Result<String> {
            self.dir
                .clone()
                .ok_or_else(|| ExportError::DirectoryNotFound("DATA_PUMP_DIR".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingExporter {
        seen: Mutex<Option<(String, String)>>,
        fail: bool,
    }

    impl ExportPort for RecordingExporter {
        fn run_export(&self, schema: &str, dump_file: &str) -> Result<ExportOutcome> {
            *self.seen.lock().unwrap() = Some((schema.to_string(), dump_file.to_string()));
            if self.fail {
                return Err(ExportError::UtilityFailed(5));
            }
            Ok(ExportOutcome {
                dump_file: dump_file.to_string(),
                log_file: Path::new("log").join(format!(
                    "{}.log",
                    dump_file.trim_end_matches(".dmp")
                )),
            })
        }
    }

    #[derive(Default)]
    struct CapturingDetails {
        written: Mutex<Option<(ImportDetails, PathBuf)>>,
    }

    impl DetailsPort for CapturingDetails {
        fn write_details(&self, details: &ImportDetails, path: &Path) -> Result<()> {
            *self.written.lock().unwrap() = Some((details.clone(), path.to_path_buf()));
            Ok(())
        }
    }

    #[test]
    fn happy_path_produces_a_full_report() {
        let exporter = Arc::new(RecordingExporter::default());
        let details = Arc::new(CapturingDetails::default());
        let workflow = ExportWorkflow::new(
            Arc::new(StubMetadata::healthy()),
            exporter.clone(),
            details.clone(),
        );

        let mut input = Cursor::new("2\n");
        let mut output = Vec::new();
        let report = workflow.run(&mut input, &mut output).unwrap();

        assert_eq!(report.schema, "SALES");
        assert!(report.dump_file.starts_with("SALES_"));
        assert!(report.dump_file.ends_with(".dmp"));

        // the exporter saw the same schema and dump file that were recorded
        let seen = exporter.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.0, "SALES");
        assert_eq!(seen.1, report.dump_file);

        let (written, path) = details.written.lock().unwrap().clone().unwrap();
        assert_eq!(written.schema_name, "SALES");
        assert_eq!(written.default_tablespace, "USERS");
        assert_eq!(written.data_pump_dir, "/u01/app/oracle/dpdump/");
        assert_eq!(written.dump_file, report.dump_file);

        // details filename and dump filename share one timestamp
        let timestamp = report
            .dump_file
            .trim_start_matches("SALES_")
            .trim_end_matches(".dmp")
            .to_string();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("impdp_details_SALES_{}.json", timestamp)
        );
    }

    #[test]
    fn listing_failure_aborts_before_the_menu() {
        let mut metadata = StubMetadata::healthy();
        metadata.fail_listing = true;
        let workflow = ExportWorkflow::new(
            Arc::new(metadata),
            Arc::new(RecordingExporter::default()),
            Arc::new(CapturingDetails::default()),
        );

        let mut input = Cursor::new("1\n");
        let mut output = Vec::new();
        let err = workflow.run(&mut input, &mut output).unwrap_err();

        assert!(matches!(err, ExportError::OracleError(_)));
        // the menu never consumed any input
        assert_eq!(input.position(), 0);
        let rendered = String::from_utf8(output).unwrap();
        assert!(rendered.contains("Could not fetch schemas."));
    }

    #[test]
    fn zero_schemas_is_distinct_from_a_connection_failure() {
        let mut metadata = StubMetadata::healthy();
        metadata.schemas = Vec::new();
        let workflow = ExportWorkflow::new(
            Arc::new(metadata),
            Arc::new(RecordingExporter::default()),
            Arc::new(CapturingDetails::default()),
        );

        let mut input = Cursor::new("1\n");
        let mut output = Vec::new();
        let err = workflow.run(&mut input, &mut output).unwrap_err();

        assert!(matches!(err, ExportError::NoEligibleSchemas));
        assert_eq!(input.position(), 0);
        let rendered = String::from_utf8(output).unwrap();
        assert!(rendered.contains("No eligible schemas found."));
    }

    #[test]
    fn missing_directory_aborts_without_writing_or_exporting() {
        let mut metadata = StubMetadata::healthy();
        metadata.dir = None;
        let exporter = Arc::new(RecordingExporter::default());
        let details = Arc::new(CapturingDetails::default());
        let workflow = ExportWorkflow::new(Arc::new(metadata), exporter.clone(), details.clone());

        let mut input = Cursor::new("1\n");
        let mut output = Vec::new();
        let err = workflow.run(&mut input, &mut output).unwrap_err();

        assert!(matches!(err, ExportError::DirectoryNotFound(_)));
        assert!(details.written.lock().unwrap().is_none());
        assert!(exporter.seen.lock().unwrap().is_none());
        let rendered = String::from_utf8(output).unwrap();
        assert!(rendered.contains("Could not create the import details file."));
    }

    #[test]
    fn missing_schema_row_aborts_the_same_way() {
        let mut metadata = StubMetadata::healthy();
        metadata.details = None;
        let details = Arc::new(CapturingDetails::default());
        let workflow = ExportWorkflow::new(
            Arc::new(metadata),
            Arc::new(RecordingExporter::default()),
            details.clone(),
        );

        let mut input = Cursor::new("1\n");
        let mut output = Vec::new();
        let err = workflow.run(&mut input, &mut output).unwrap_err();

        assert!(matches!(err, ExportError::SchemaNotFound(_)));
        assert!(details.written.lock().unwrap().is_none());
    }

    #[test]
    fn export_failure_is_reported_not_swallowed() {
        let exporter = Arc::new(RecordingExporter {
            seen: Mutex::new(None),
            fail: true,
        });
        let workflow = ExportWorkflow::new(
            Arc::new(StubMetadata::healthy()),
            exporter,
            Arc::new(CapturingDetails::default()),
        );

        let mut input = Cursor::new("1\n");
        let mut output = Vec::new();
        let err = workflow.run(&mut input, &mut output).unwrap_err();

        assert!(matches!(err, ExportError::UtilityFailed(5)));
        let rendered = String::from_utf8(output).unwrap();
        assert!(rendered.contains("Export failed."));
    }
}

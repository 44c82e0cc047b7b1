//! # Oracle Schema Export Tool
//!
//! An interactive utility that walks an operator through exporting one
//! Oracle schema with `expdp`: prompt for connection details, list the
//! candidate schemas, record the facts a later `impdp` run needs as a
//! JSON sidecar, then stream the utility's log while it works.
//!
//! The application follows the **Hexagonal Architecture** (Ports and
//! Adapters): the workflow talks to traits, and the Oracle client, the
//! expdp subprocess, and the local filesystem sit behind adapters.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ports;

use crate::application::workflow::ExportWorkflow;
use crate::config::{AppConfig, CliArgs};
use crate::domain::models::ExportReport;
use crate::infrastructure::console::prompt;
use crate::infrastructure::datapump::expdp_runner::ExpdpRunner;
use crate::infrastructure::local_storage::details_adapter::DetailsFileAdapter;
use crate::infrastructure::oracle::metadata_adapter::OracleMetadataAdapter;
use clap::Parser;
use log::error;
use std::io;
use std::process;
use std::sync::Arc;

fn main() {
    // 1. Initialize Logging
    env_logger::init();

    // 2. Parse Arguments
    let args = CliArgs::parse();

    // 3. Load Config
    let mut config = if let Some(config_path) = &args.config {
        match AppConfig::from_file(config_path) {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to load config: {}", e);
                process::exit(1);
            }
        }
    } else {
        AppConfig::default()
    };

    // Merge CLI overrides
    config.merge_cli(&args);

    println!("--- Oracle Database Export Tool ---");

    // 4. Resolve Connection Details
    //
    // Anything the config and CLI left unspecified is prompted for, so a
    // bare invocation stays fully interactive.
    let params = match prompt::resolve_connection(&config.connection) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to read connection details: {}", e);
            process::exit(1);
        }
    };

    // 5. Initialize Hexagonal Components
    let metadata = Arc::new(OracleMetadataAdapter::new(params.clone()));
    let exporter = Arc::new(ExpdpRunner::new(params));
    let details = Arc::new(DetailsFileAdapter);

    // 6. Run Workflow
    let workflow = ExportWorkflow::new(metadata, exporter, details);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    match workflow.run(&mut input, &mut output) {
        Ok(report) => print_summary(&report),
        Err(e) => {
            error!("Workflow aborted: {}", e);
            println!("\nTool execution failed: {}", e);
            process::exit(1);
        }
    }
}

fn print_summary(report: &ExportReport) {
    println!("\n--- Export Summary ---");
    println!("Schema:       {}", report.schema);
    println!("Dump file:    {}", report.dump_file);
    println!("Log file:     {}", report.log_file.display());
    println!("Details file: {}", report.details_file.display());
    println!("\nTool execution finished successfully.");
}

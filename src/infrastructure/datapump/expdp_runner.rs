//! Runs the external `expdp` utility and mirrors its log locally.
//!
//! The utility's stdout and stderr are merged into a single line stream
//! that is printed as it arrives and appended to `log/<dump stem>.log`,
//! so a slow export stays visible in real time.

use crate::domain::errors::{ExportError, Result};
use crate::domain::models::{server_log_filename, ConnectionParams, ExportOutcome};
use crate::infrastructure::console::spinner::StepTimer;
use crate::ports::export_port::ExportPort;
use crossbeam_channel::{unbounded, Sender};
use log::{error, info};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, ErrorKind, Read, Write};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;

/// Name of the Data Pump export binary looked up on the PATH.
pub const EXPDP_BIN: &str = "expdp";

/// Directory the local log mirror is written into.
const LOCAL_LOG_DIR: &str = "log";

/// Concrete implementation of `ExportPort` over the expdp command line.
pub struct ExpdpRunner {
    params: ConnectionParams,
    binary: String,
    log_dir: PathBuf,
}

impl ExpdpRunner {
    pub fn new(params: ConnectionParams) -> Self {
        Self {
            params,
            binary: EXPDP_BIN.to_string(),
            log_dir: PathBuf::from(LOCAL_LOG_DIR),
        }
    }

    /// Substitutes a stand-in for the expdp binary.
    #[cfg(test)]
    fn with_binary(mut self, binary: &str) -> Self {
        self.binary = binary.to_string();
        self
    }

    /// Redirects the local log mirror somewhere else.
    #[cfg(test)]
    fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// Arguments in the exact order expdp expects: credential token first,
    /// then keyword parameters.
    fn build_args(&self, schema: &str, dump_file: &str, server_log: &str) -> Vec<String> {
        vec![
            self.params.credential(),
            format!("schemas={}", schema),
            format!("dumpfile={}", dump_file),
            format!("logfile={}", server_log),
        ]
    }
}

impl ExportPort for ExpdpRunner {
    fn run_export(&self, schema: &str, dump_file: &str) -> Result<ExportOutcome> {
        println!("\nStarting export for schema: {}...", schema);
        // Drop reports the total time on every exit path.
        let _timer = StepTimer::new("Total export process time:");

        let server_log = server_log_filename(dump_file);
        fs::create_dir_all(&self.log_dir)?;
        let local_log = self.log_dir.join(&server_log);

        println!(
            "\nGenerated command:\n{} {} schemas={} dumpfile={} logfile={}\n",
            self.binary,
            self.params.redacted(),
            schema,
            dump_file,
            server_log
        );
        info!("Launching {} for schema {}", self.binary, schema);

        let mut child = Command::new(&self.binary)
            .args(self.build_args(schema, dump_file, &server_log))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ExportError::UtilityNotFound,
                _ => ExportError::IoError(e),
            })?;

        println!("--- expdp log ---");
        let mut log_file = File::create(&local_log)?;
        let status = stream_output(&mut child, &mut io::stdout(), &mut log_file)?;
        println!("--- end of log ---");

        match status.code() {
            Some(0) => {
                info!("Export of {} completed successfully", schema);
                Ok(ExportOutcome {
                    dump_file: dump_file.to_string(),
                    log_file: local_log,
                })
            }
            code => {
                // None means the child was killed by a signal.
                let code = code.unwrap_or(-1);
                error!("expdp exited with code {}", code);
                Err(ExportError::UtilityFailed(code))
            }
        }
    }
}

/// Forwards every line of the child's combined output to `console` and
/// `log`.
///
/// One reader thread per pipe feeds a single channel; this thread drains
/// it and writes each line to both sinks before taking the next, so the
/// two stay line-for-line identical. The console is flushed per line to
/// keep a bursty export visible as it happens. Returns once both pipes
/// are closed and the child has exited.
pub fn stream_output<C: Write, L: Write>(
    child: &mut Child,
    console: &mut C,
    log: &mut L,
) -> Result<ExitStatus> {
    let (tx, rx) = unbounded::<String>();

    let mut readers = Vec::new();
    if let Some(stdout) = child.stdout.take() {
        readers.push(spawn_line_reader(stdout, tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        readers.push(spawn_line_reader(stderr, tx.clone()));
    }
    drop(tx);

    // The iterator ends when both reader threads hang up.
    for line in rx {
        writeln!(console, "{}", line)?;
        console.flush()?;
        writeln!(log, "{}", line)?;
    }

    for handle in readers {
        let _ = handle.join();
    }
    log.flush()?;

    Ok(child.wait()?)
}

fn spawn_line_reader<P: Read + Send + 'static>(
    pipe: P,
    tx: Sender<String>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for line in BufReader::new(pipe).lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    })
}

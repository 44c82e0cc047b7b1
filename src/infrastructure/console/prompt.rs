//! Sequential line prompts for connection details.

use crate::config::ConnectionConfig;
use crate::domain::errors::Result;
use crate::domain::models::ConnectionParams;
use std::io::{self, BufRead, Write};

/// Prints `label` without a newline, flushes, and reads one line.
///
/// Values pass through untrimmed apart from the line ending; an empty
/// answer is returned as-is and surfaces later as a connection error.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> io::Result<String> {
    write!(output, "{}", label)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Re-prompts until the answer parses as a port number.
pub fn prompt_port<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<u16> {
    loop {
        let answer = prompt_line(input, output, "Port (e.g., 1521): ")?;
        match answer.parse::<u16>() {
            Ok(port) => return Ok(port),
            Err(_) => writeln!(output, "Invalid port. Please enter a number.")?,
        }
    }
}

/// Fills in whatever the config and CLI left unspecified by asking the
/// operator.
///
/// Precedence per field: config/CLI value, then `ORACLE_PASSWORD` for the
/// password, then an interactive prompt. The password prompt does not
/// echo.
pub fn resolve_connection(config: &ConnectionConfig) -> Result<ConnectionParams> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let needs_prompt = config.user.is_none()
        || config.host.is_none()
        || config.port.is_none()
        || config.service.is_none();
    if needs_prompt {
        writeln!(
            output,
            "\nPlease enter your Oracle database connection details:"
        )?;
    }

    let user = match &config.user {
        Some(u) => u.clone(),
        None => prompt_line(&mut input, &mut output, "User: ")?,
    };
    let password = match &config.password {
        Some(p) => p.clone(),
        None => match std::env::var("ORACLE_PASSWORD") {
            Ok(p) => p,
            Err(_) => rpassword::prompt_password("Password: ")?,
        },
    };
    let host = match &config.host {
        Some(h) => h.clone(),
        None => prompt_line(&mut input, &mut output, "Host (e.g., localhost): ")?,
    };
    let port = match config.port {
        Some(p) => p,
        None => prompt_port(&mut input, &mut output)?,
    };
    let service = match &config.service {
        Some(s) => s.clone(),
        None => prompt_line(&mut input, &mut output, "Service Name (e.g., orcl): ")?,
    };

    Ok(ConnectionParams {
        user,
        password,
        host,
        port,
        service,
    })
}

//! CLI output handling.
//!
//! The response is written to stdout as a single JSON line; nothing else goes to stdout.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;

use crate::bridge::BridgeResponse;

/// Write `response` as one JSON line.
///
/// The line is fully serialized before anything is written, so a failure
/// never leaves a partial object on `out`.
pub fn write_response<W: Write>(out: &mut W, response: &BridgeResponse) -> Result<()> {
    let mut line = serde_json::to_string(response)?;
    line.push('\n');
    out.write_all(line.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Print the response to stdout and map it to the process exit code.
pub fn emit(response: &BridgeResponse) -> ExitCode {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if let Err(e) = write_response(&mut handle, response) {
        tracing::error!("Failed to write response: {:#}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::from(response.exit_code())
}

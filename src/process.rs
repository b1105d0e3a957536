// Running external programs with their output passed straight through to
// our own stdout/stderr.

use std::process::{Command, ExitStatus, Stdio};

use crate::error::{FetchError, Result};

/// Render a command line for logging.
pub fn describe(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}

/// Spawn `cmd`, forward its stdout and stderr, and block until it exits.
pub fn run_passthrough(cmd: &mut Command) -> Result<ExitStatus> {
    log::debug!("Running: {}", describe(cmd));
    let status = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| FetchError::Spawn {
            program: cmd.get_program().to_string_lossy().into_owned(),
            source,
        })?;
    log::debug!("{} exited with {}", describe(cmd), status);
    Ok(status)
}

//! Child process helpers shared by the tool wrappers.
//!
//! Every external binary is started through this module so that availability
//! checks and spawn failures are mapped to [`ToolError`] in one place.

use std::env;
use std::io;
use std::path::Path;
use std::process::{ExitStatus, Output, Stdio};

use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin, Command};
use tracing::debug;

use super::error::ToolError;

/// Checks whether `program` can be executed.
///
/// A name containing a path separator is checked directly; a bare name is
/// looked up in each `PATH` entry.
#[must_use]
pub fn command_exists(program: &str) -> bool {
    if program.is_empty() {
        return false;
    }

    if program.contains(std::path::MAIN_SEPARATOR) {
        return Path::new(program).is_file();
    }

    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}

/// Builds a command that is killed if its handle is dropped.
fn command(program: &str, args: &[String]) -> Command {
    let mut command = Command::new(program);
    command.args(args).kill_on_drop(true);
    command
}

/// Maps a spawn failure to a typed error.
fn spawn_error(program: &str, error: io::Error) -> ToolError {
    if error.kind() == io::ErrorKind::NotFound {
        ToolError::NotInstalled(program.to_string())
    } else {
        ToolError::Spawn(program.to_string(), error.to_string())
    }
}

/// Starts `program` attached to the current terminal.
///
/// # Errors
///
/// Returns [`ToolError::NotInstalled`] or [`ToolError::Spawn`] if the process
/// cannot be started.
pub fn spawn_interactive(program: &str, args: &[String]) -> Result<Child, ToolError> {
    debug!("起動: {} {:?}", program, args);
    command(program, args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| spawn_error(program, e))
}

/// Runs `program`, optionally feeding `input` on stdin, and captures stdout.
///
/// Stderr stays attached to the terminal so interactive tools can draw.
///
/// # Errors
///
/// Returns an error if the process cannot be started, written to, or awaited.
pub async fn run_output(
    program: &str,
    args: &[String],
    input: Option<&str>,
) -> Result<Output, ToolError> {
    debug!("起動: {} {:?}", program, args);
    let mut child = command(program, args)
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| spawn_error(program, e))?;

    // Feed stdin while stdout is drained so a tool that echoes as it reads
    // cannot fill the pipe and stall.
    let stdin = child.stdin.take();
    let (written, output) = tokio::join!(feed_stdin(stdin, input), child.wait_with_output());

    match written {
        Ok(()) => {}
        // The tool may exit before consuming everything.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(e) => return Err(ToolError::Io(program.to_string(), e.to_string())),
    }

    output.map_err(|e| ToolError::Io(program.to_string(), e.to_string()))
}

/// Writes `input` to the child's stdin and closes it.
async fn feed_stdin(stdin: Option<ChildStdin>, input: Option<&str>) -> io::Result<()> {
    if let (Some(mut stdin), Some(input)) = (stdin, input) {
        stdin.write_all(input.as_bytes()).await?;
        stdin.shutdown().await?;
    }
    Ok(())
}

/// Describes an exit status for error messages.
pub(crate) fn describe_status(status: &ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("終了コード {}", code),
        None => "シグナルで終了しました".to_string(),
    }
}

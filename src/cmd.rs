use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crate::error::{ProvisionError, ProvisionResult};

/// Run a command and capture its output. Fails if the command
/// returns a non-zero exit code.
pub fn run(program: &str, args: &[&str]) -> ProvisionResult<String> {
    let output = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| spawn_error(program, e))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        eprintln!("stderr: {stderr}");
        Err(ProvisionError::CommandFailed {
            command: format_command(program, args),
            status: output.status,
        })
    }
}

/// Run a command with stdin/stdout/stderr inherited, so package
/// managers and build tools stream their own output.
pub fn run_interactive(program: &str, args: &[&str]) -> ProvisionResult<()> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| spawn_error(program, e))?;

    check_status(status, program, args)
}

/// Run a command with inherited stdio from a working directory.
pub fn run_interactive_in(program: &str, args: &[&str], dir: &Path) -> ProvisionResult<()> {
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| spawn_error(program, e))?;

    check_status(status, program, args)
}

/// Run a shell pipeline (via `sh -c`).
pub fn run_pipeline(shell_cmd: &str) -> ProvisionResult<()> {
    run_interactive("sh", &["-c", shell_cmd])
}

/// Check if a command exists on PATH.
#[must_use]
pub fn command_exists(program: &str) -> bool {
    Command::new("which")
        .arg(program)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

fn check_status(status: ExitStatus, program: &str, args: &[&str]) -> ProvisionResult<()> {
    if status.success() {
        Ok(())
    } else {
        Err(ProvisionError::CommandFailed {
            command: format_command(program, args),
            status,
        })
    }
}

fn spawn_error(program: &str, e: std::io::Error) -> ProvisionError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ProvisionError::CommandNotFound(program.to_string())
    } else {
        ProvisionError::Io(e)
    }
}

fn format_command(program: &str, args: &[&str]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().map(|a| (*a).to_string()));
    parts.join(" ")
}

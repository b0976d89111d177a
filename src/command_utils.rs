use std::process::{Command, Output};
use log::{debug, info};
use anyhow::{Context, Result};
use crate::error::E2eError;

/// Captured streams and exit code of a single shell invocation.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub command: String,
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Execute a program with debug logging
pub fn execute_command(cmd: &str, args: &[&str]) -> Result<Output> {
    debug!("Executing command: {} {}", cmd, args.join(" "));

    let output = Command::new(cmd)
        .args(args)
        .output()
        .with_context(|| format!("Failed to spawn {}", cmd))?;

    if output.status.success() {
        debug!("Command succeeded: {} {}", cmd, args.join(" "));
    } else {
        debug!("Command failed: {} {} (exit code: {:?})", cmd, args.join(" "), output.status.code());
    }

    Ok(output)
}

#[cfg(not(windows))]
fn shell_invocation(command: &str) -> (&'static str, [&str; 2]) {
    ("sh", ["-c", command])
}

#[cfg(windows)]
fn shell_invocation(command: &str) -> (&'static str, [&str; 2]) {
    ("cmd", ["/C", command])
}

/// Run `command` through the OS shell in the current directory.
///
/// With `with_errors` false, any stderr output or a non-zero exit code is
/// returned as an error. With `with_errors` true the result is always
/// returned so the caller can assert on the failure itself.
pub fn run_shell_command(command: &str, with_errors: bool) -> Result<CommandResult> {
    info!("Executing shell command: {}", command);

    let (shell, args) = shell_invocation(command);
    let output = execute_command(shell, &args)?;

    let result = CommandResult {
        command: command.to_string(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        code: output.status.code(),
    };

    info!("stdout: {}", result.stdout);
    info!("stderr: {}", result.stderr);
    info!("return code: {:?}", result.code);

    if !with_errors {
        if !result.stderr.is_empty() {
            return Err(E2eError::UnexpectedStderr {
                command: result.command,
                stderr: result.stderr,
            }
            .into());
        }
        if !result.success() {
            return Err(E2eError::NonZeroExit {
                command: result.command,
                code: result.code,
            }
            .into());
        }
    }

    Ok(result)
}

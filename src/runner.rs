//! External command execution
//!
//! All git invocations go through [`CommandRunner`] so the summarizer and
//! commit executor can be exercised against a mock instead of a real
//! repository.

use std::process::{Command, Output, Stdio};

use tracing::debug;

use crate::error::CommandError;

/// Runs external commands on behalf of the git operations.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Run `program` with `args` and return its standard output.
    ///
    /// Output is decoded lossily and returned untrimmed. A non-zero exit
    /// status yields [`CommandError::Failed`] with both captured streams.
    fn capture(&self, program: &str, args: &[String]) -> Result<String, CommandError>;

    /// Run a full command line through the platform shell, with standard
    /// streams inherited from the current process.
    fn run_inherited(&self, command_line: &str) -> Result<(), CommandError>;
}

/// [`CommandRunner`] backed by `std::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn capture(&self, program: &str, args: &[String]) -> Result<String, CommandError> {
        let command = display_command(program, args);
        debug!("Running {}", command);

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| CommandError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(failed(command, output));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run_inherited(&self, command_line: &str) -> Result<(), CommandError> {
        debug!("Running shell command: {}", command_line);

        let status = shell(command_line)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| CommandError::Spawn {
                command: command_line.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(CommandError::Failed {
                command: command_line.to_string(),
                code: status.code(),
                stdout: Vec::new(),
                stderr: Vec::new(),
            });
        }

        Ok(())
    }
}

#[cfg(windows)]
fn shell(command_line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", command_line]);
    command
}

#[cfg(not(windows))]
fn shell(command_line: &str) -> Command {
    let mut command = Command::new("sh");
    command.args(["-c", command_line]);
    command
}

fn failed(command: String, output: Output) -> CommandError {
    CommandError::Failed {
        command,
        code: output.status.code(),
        stdout: output.stdout,
        stderr: output.stderr,
    }
}

fn display_command(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

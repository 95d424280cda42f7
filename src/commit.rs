//! Commit execution
//!
//! Runs `git commit` through the shell with the final message and any
//! pass-through arguments, letting git talk to the terminal directly.

use std::io::{self, Write};

use tracing::debug;

use crate::error::{CommandError, GitError};
use crate::runner::{CommandRunner, SystemRunner};

/// Build the shell command line for a commit
///
/// Double quotes inside `message` are embedded as-is; the command line is
/// handed to the shell unmodified.
///
/// # Example
///
/// ```
/// use staged_commit::commit::build_commit_command;
///
/// let args = vec!["--no-verify".to_string()];
/// assert_eq!(
///     build_commit_command("feat: add parser", &args),
///     r#"git commit -m "feat: add parser" --no-verify"#
/// );
/// ```
pub fn build_commit_command(message: &str, args: &[String]) -> String {
    let extra = if args.is_empty() {
        String::new()
    } else {
        format!(" {}", args.join(" "))
    };

    format!("git commit -m \"{}\"{}", message, extra)
}

/// Commit the staged changes with `message`
///
/// Git's own output goes straight to the terminal. On failure, anything
/// captured is echoed to stdout/stderr before the error is returned.
///
/// # Errors
///
/// * [`GitError::Commit`] if git could not be run or exited unsuccessfully
///
/// # Example
///
/// ```no_run
/// use staged_commit::commit::commit;
///
/// # fn main() -> Result<(), staged_commit::error::GitError> {
/// commit("fix: handle empty input", &["--no-verify".to_string()])?;
/// # Ok(())
/// # }
/// ```
pub fn commit(message: &str, args: &[String]) -> Result<(), GitError> {
    commit_with(
        &SystemRunner,
        &mut io::stdout(),
        &mut io::stderr(),
        message,
        args,
    )
}

/// [`commit`] with an explicit runner and console streams
///
/// # Arguments
///
/// * `runner` - Runs the shell command line
/// * `out` - Receives captured stdout and the final error line
/// * `err` - Receives captured stderr and the command failure
/// * `message` - Commit message, embedded as-is
/// * `args` - Extra `git commit` arguments, space-joined
///
/// # Returns
///
/// * `Result<(), GitError>` - Ok if git exited successfully
///
/// # Errors
///
/// * [`GitError::Commit`] if git could not be run or exited unsuccessfully
pub fn commit_with<R, O, E>(
    runner: &R,
    out: &mut O,
    err: &mut E,
    message: &str,
    args: &[String],
) -> Result<(), GitError>
where
    R: CommandRunner,
    O: Write,
    E: Write,
{
    let command_line = build_commit_command(message, args);
    debug!("Committing with {} extra argument(s)", args.len());

    match runner.run_inherited(&command_line) {
        Ok(()) => Ok(()),
        Err(error) => {
            report_failure(&error, out, err);
            let git_error = GitError::Commit(error);
            // Console reporting is best effort
            let _ = writeln!(out, "{}", git_error);
            let _ = out.flush();
            Err(git_error)
        }
    }
}

fn report_failure<O: Write, E: Write>(error: &CommandError, out: &mut O, err: &mut E) {
    debug!("git commit failed: {}", error);

    if let Some(stdout) = error.stdout() {
        let _ = out.write_all(stdout);
    }
    if let Some(stderr) = error.stderr() {
        let _ = err.write_all(stderr);
    }
    let _ = writeln!(err, "{}", error);
    let _ = err.flush();
}

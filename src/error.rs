//! Error types for git operations
//!
//! Library code reports failures through these `thiserror` types; the
//! binary folds them into `anyhow` at the edge.

use std::io;

use thiserror::Error;

/// Failure of a single external command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The process could not be started at all.
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The process ran but exited unsuccessfully.
    #[error("Command failed: {command}")]
    Failed {
        command: String,
        code: Option<i32>,
        stdout: Vec<u8>,
        stderr: Vec<u8>,
    },
}

impl CommandError {
    /// Captured standard output, if any was collected.
    pub fn stdout(&self) -> Option<&[u8]> {
        match self {
            CommandError::Failed { stdout, .. } if !stdout.is_empty() => Some(stdout),
            _ => None,
        }
    }

    /// Captured standard error, if any was collected.
    pub fn stderr(&self) -> Option<&[u8]> {
        match self {
            CommandError::Failed { stderr, .. } if !stderr.is_empty() => Some(stderr),
            _ => None,
        }
    }
}

/// Errors surfaced by the staged-change and commit operations.
///
/// The display text is fixed; the underlying command failure is kept as
/// the error source.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Failed to get staged changes")]
    StagedChanges(#[source] CommandError),

    #[error("Failed to commit changes")]
    Commit(#[source] CommandError),
}

//! Staged Commit - git helper for generated commit messages
//!
//! This library summarizes the staged changes of a git repository into a
//! size-bounded report, prepares `git commit` arguments, and commits with a
//! message produced by an external generator (Claude Code by default).
//!
//! # Modules
//!
//! - [`args`] - Commit argument classification (prefix + pass-through args)
//! - [`summary`] - Staged change report with truncation limits
//! - [`commit`] - `git commit` execution
//! - [`runner`] - External command execution
//! - [`error`] - Git error types
//! - [`config`] - Configuration file loading and parsing
//! - [`prompt`] - Prompt construction with size limits
//! - [`generator`] - Commit message generation
//! - [`output`] - Output structures for JSON formatting
//!
//! # Example
//!
//! ```no_run
//! use staged_commit::{
//!     args::process_commit_args,
//!     commit::commit,
//!     runner::SystemRunner,
//!     summary::{get_staged_changes, StagedChanges},
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let raw: Vec<String> = std::env::args().skip(1).collect();
//! let commit_args = process_commit_args(&raw);
//!
//! if let StagedChanges::Report(report) = get_staged_changes(&SystemRunner)? {
//!     println!("{}", report);
//!     commit("chore: update", &commit_args.args)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod commit;
pub mod config;
pub mod error;
pub mod generator;
pub mod output;
pub mod prompt;
pub mod runner;
pub mod summary;

pub use args::CommitArgs;
pub use error::{CommandError, GitError};
pub use summary::{StagedChanges, SummaryLimits};

//! Output structures for JSON formatting

use serde::Serialize;

/// Commit message and git arguments for JSON output
///
/// # Example
///
/// ```
/// use staged_commit::output::CommitMessage;
///
/// let commit = CommitMessage {
///     message: "feat: add new feature".to_string(),
///     args: vec!["--no-verify".to_string()],
/// };
///
/// let json = serde_json::to_string(&commit).unwrap();
/// assert_eq!(json, r#"{"message":"feat: add new feature","args":["--no-verify"]}"#);
/// ```
#[derive(Debug, Serialize)]
pub struct CommitMessage {
    /// Final commit message, prefix included
    pub message: String,
    /// Arguments that would be passed through to `git commit`
    pub args: Vec<String>,
}

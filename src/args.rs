//! Commit argument processing
//!
//! The commit message is always supplied by this tool, so any message flag
//! the user passes is removed. The first bare word is taken as a message
//! prefix and everything else is forwarded to `git commit` unchanged.

/// Result of classifying the raw commit arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitArgs {
    /// First bare (non-flag) token, or empty if there was none.
    pub prefix: String,
    /// Remaining arguments, in their original order.
    pub args: Vec<String>,
}

const MESSAGE_FLAGS: [&str; 2] = ["-m", "--message"];
const MESSAGE_ASSIGNMENT: &str = "--message=";

/// Split raw commit arguments into a prefix and pass-through arguments
///
/// * `-m <value>` and `--message <value>` are dropped, value included.
/// * `--message=<value>` is dropped entirely.
/// * The first token not starting with `-` becomes the prefix.
///
/// # Example
///
/// ```
/// use staged_commit::args::process_commit_args;
///
/// let raw: Vec<String> = ["feat", "-m", "ignored", "--no-verify"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let result = process_commit_args(&raw);
/// assert_eq!(result.prefix, "feat");
/// assert_eq!(result.args, vec!["--no-verify".to_string()]);
/// ```
pub fn process_commit_args(args: &[String]) -> CommitArgs {
    let mut result = CommitArgs::default();
    let mut skip_next = false;

    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }

        if MESSAGE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with(MESSAGE_ASSIGNMENT) {
            if result.prefix.is_empty() && !arg.starts_with('-') {
                result.prefix = arg.clone();
            } else {
                result.args.push(arg.clone());
            }
        }
    }

    result
}

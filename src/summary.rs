//! Staged change summary
//!
//! Builds a size-bounded text report of the staged changes, suitable for
//! feeding into a commit message generator. Every staged path is always
//! listed; individual diffs are replaced by a placeholder when they are too
//! long, and detail stops once the running total grows too large.

use serde::Deserialize;
use tracing::debug;

use crate::error::GitError;
use crate::runner::CommandRunner;

/// Default per-file line limit.
pub const MAX_LINES_PER_FILE: usize = 500;

/// Default line limit across all files.
pub const MAX_TOTAL_LINES: usize = 5000;

/// Line-count thresholds applied while building the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SummaryLimits {
    /// Diffs longer than this are replaced by a placeholder line.
    pub max_lines_per_file: usize,
    /// Once the running total exceeds this, remaining files are skipped.
    pub max_total_lines: usize,
}

impl Default for SummaryLimits {
    fn default() -> Self {
        Self {
            max_lines_per_file: MAX_LINES_PER_FILE,
            max_total_lines: MAX_TOTAL_LINES,
        }
    }
}

/// Outcome of collecting the staged changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedChanges {
    /// Nothing is staged.
    NoStagedChanges,
    /// Formatted report of the staged changes.
    Report(String),
}

/// Collect the staged changes with the default limits
///
/// # Errors
///
/// * [`GitError::StagedChanges`] if listing or diffing fails for any reason
///
/// # Example
///
/// ```no_run
/// use staged_commit::runner::SystemRunner;
/// use staged_commit::summary::{get_staged_changes, StagedChanges};
///
/// # fn main() -> Result<(), staged_commit::error::GitError> {
/// match get_staged_changes(&SystemRunner)? {
///     StagedChanges::NoStagedChanges => println!("Nothing staged"),
///     StagedChanges::Report(report) => println!("{}", report),
/// }
/// # Ok(())
/// # }
/// ```
pub fn get_staged_changes<R: CommandRunner>(runner: &R) -> Result<StagedChanges, GitError> {
    get_staged_changes_with_limits(runner, SummaryLimits::default())
}

/// Collect the staged changes using explicit limits
///
/// Files are processed in the order git lists them. A file's diff is only
/// requested if the report is still accepting detail.
///
/// # Arguments
///
/// * `runner` - Runs the git commands
/// * `limits` - Per-file and total line limits
///
/// # Returns
///
/// * `Result<StagedChanges, GitError>` - The report, or
///   [`StagedChanges::NoStagedChanges`] when nothing is staged
///
/// # Errors
///
/// * [`GitError::StagedChanges`] if listing or diffing fails for any reason
pub fn get_staged_changes_with_limits<R: CommandRunner>(
    runner: &R,
    limits: SummaryLimits,
) -> Result<StagedChanges, GitError> {
    let listing = runner
        .capture("git", &name_only_args())
        .map_err(GitError::StagedChanges)?;

    let files: Vec<&str> = listing.trim().split('\n').collect();
    if files.is_empty() || (files.len() == 1 && files[0].is_empty()) {
        debug!("No staged files");
        return Ok(StagedChanges::NoStagedChanges);
    }

    debug!("{} staged file(s)", files.len());

    let report = files.iter().enumerate().try_fold(
        ReportBuilder::default(),
        |report, (index, file)| -> Result<ReportBuilder, GitError> {
            if report.stopped {
                return Ok(report);
            }
            let diff = runner
                .capture("git", &file_diff_args(file))
                .map_err(GitError::StagedChanges)?;
            let remaining = files.len() - (index + 1);
            Ok(report.push_file(file, &diff, remaining, limits))
        },
    )?;

    Ok(StagedChanges::Report(report.finish(&files)))
}

/// Git arguments with path quoting disabled, so listed paths are raw text
/// that can be handed back to git as a pathspec.
fn git_args(args: &[&str]) -> Vec<String> {
    ["-c", "core.quotePath=false"]
        .iter()
        .chain(args)
        .map(|arg| arg.to_string())
        .collect()
}

fn name_only_args() -> Vec<String> {
    git_args(&["diff", "--cached", "--name-only"])
}

fn file_diff_args(file: &str) -> Vec<String> {
    git_args(&["diff", "--cached", "--", file])
}

/// Number of newline-separated segments, so `"a\nb\n"` counts as 3.
fn line_count(diff: &str) -> usize {
    diff.split('\n').count()
}

#[derive(Debug, Default)]
struct ReportBuilder {
    changes: String,
    total_lines: usize,
    truncated_files: usize,
    stopped: bool,
}

impl ReportBuilder {
    fn push_file(mut self, file: &str, diff: &str, remaining: usize, limits: SummaryLimits) -> Self {
        let count = line_count(diff);
        self.total_lines += count;

        if count > limits.max_lines_per_file {
            debug!("Truncating {} ({} lines)", file, count);
            self.truncated_files += 1;
            self.changes.push_str(&format!(
                "[File: {} - Too many changes to display ({} lines)]\n",
                file, count
            ));
        } else {
            self.changes
                .push_str(&format!("[File: {}]\n{}\n\n", file, diff));
        }

        if self.total_lines > limits.max_total_lines && remaining > 0 {
            debug!(
                "Total of {} lines exceeds {}, skipping {} file(s)",
                self.total_lines, limits.max_total_lines, remaining
            );
            self.changes.push_str(&format!(
                "\n[{} more files not shown due to size constraints]\n",
                remaining
            ));
            self.stopped = true;
        }

        self
    }

    fn finish(self, files: &[&str]) -> String {
        let changes = if self.truncated_files > 0 {
            format!(
                "[{} file(s) exceeded maximum line count and were truncated]\n\n{}",
                self.truncated_files, self.changes
            )
        } else {
            self.changes
        };

        format!(
            "Files changed:\n{}\n\nChanges:\n{}",
            files.join("\n"),
            changes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommandError;
    use crate::runner::MockCommandRunner;

    /// Diff text that splits into exactly `n` segments.
    fn lines(n: usize) -> String {
        vec!["+x"; n].join("\n")
    }

    fn git_failure(command: &str) -> CommandError {
        CommandError::Failed {
            command: command.to_string(),
            code: Some(128),
            stdout: Vec::new(),
            stderr: b"fatal: not a git repository".to_vec(),
        }
    }

    fn expect_listing(runner: &mut MockCommandRunner, output: &str) {
        let output = output.to_string();
        runner
            .expect_capture()
            .withf(|program, args| program == "git" && args.join(" ") == "-c core.quotePath=false diff --cached --name-only")
            .times(1)
            .returning(move |_, _| Ok(output.clone()));
    }

    /// Expect a diff request for `file`, `times` times.
    fn expect_diff(runner: &mut MockCommandRunner, file: &str, diff: String, times: usize) {
        let expected = format!("-c core.quotePath=false diff --cached -- {}", file);
        runner
            .expect_capture()
            .withf(move |program, args| program == "git" && args.join(" ") == expected)
            .times(times)
            .returning(move |_, _| Ok(diff.clone()));
    }

    fn report(result: Result<StagedChanges, GitError>) -> String {
        match result.unwrap() {
            StagedChanges::Report(report) => report,
            StagedChanges::NoStagedChanges => panic!("Expected a report"),
        }
    }

    #[test]
    fn test_default_limits() {
        let limits = SummaryLimits::default();

        assert_eq!(limits.max_lines_per_file, 500);
        assert_eq!(limits.max_total_lines, 5000);
    }

    #[test]
    fn test_line_count_includes_trailing_segment() {
        assert_eq!(line_count("a\nb\n"), 3);
        assert_eq!(line_count("a\nb"), 2);
        assert_eq!(line_count(""), 1);
    }

    #[test]
    fn test_no_staged_changes() {
        // Arrange - git lists nothing
        let mut runner = MockCommandRunner::new();
        expect_listing(&mut runner, "");

        // Act
        let result = get_staged_changes(&runner);

        // Assert
        assert_eq!(result.unwrap(), StagedChanges::NoStagedChanges);
    }

    #[test]
    fn test_whitespace_only_listing_is_no_staged_changes() {
        let mut runner = MockCommandRunner::new();
        expect_listing(&mut runner, "\n  \n");

        let result = get_staged_changes(&runner);

        assert_eq!(result.unwrap(), StagedChanges::NoStagedChanges);
    }

    #[test]
    fn test_single_small_file() {
        // Arrange
        let mut runner = MockCommandRunner::new();
        expect_listing(&mut runner, "src/main.rs\n");
        expect_diff(&mut runner, "src/main.rs", "+fn main() {}\n".to_string(), 1);

        // Act
        let result = report(get_staged_changes(&runner));

        // Assert
        assert_eq!(
            result,
            "Files changed:\nsrc/main.rs\n\nChanges:\n[File: src/main.rs]\n+fn main() {}\n\n\n"
        );
    }

    #[test]
    fn test_files_keep_listing_order() {
        // Arrange - deliberately unsorted
        let mut runner = MockCommandRunner::new();
        expect_listing(&mut runner, "zeta.txt\nalpha.txt");
        expect_diff(&mut runner, "zeta.txt", "+z".to_string(), 1);
        expect_diff(&mut runner, "alpha.txt", "+a".to_string(), 1);

        // Act
        let result = report(get_staged_changes(&runner));

        // Assert
        assert_eq!(
            result,
            "Files changed:\nzeta.txt\nalpha.txt\n\nChanges:\n\
             [File: zeta.txt]\n+z\n\n[File: alpha.txt]\n+a\n\n"
        );
    }

    #[test]
    fn test_empty_diff_is_included() {
        let mut runner = MockCommandRunner::new();
        expect_listing(&mut runner, "empty.txt");
        expect_diff(&mut runner, "empty.txt", String::new(), 1);

        let result = report(get_staged_changes(&runner));

        assert_eq!(result, "Files changed:\nempty.txt\n\nChanges:\n[File: empty.txt]\n\n\n");
    }

    #[test]
    fn test_large_file_is_truncated() {
        // Arrange - one file with 600 lines
        let mut runner = MockCommandRunner::new();
        expect_listing(&mut runner, "big.rs");
        expect_diff(&mut runner, "big.rs", lines(600), 1);

        // Act
        let result = report(get_staged_changes(&runner));

        // Assert - placeholder instead of the body, summary line first
        assert_eq!(
            result,
            "Files changed:\nbig.rs\n\nChanges:\n\
             [1 file(s) exceeded maximum line count and were truncated]\n\n\
             [File: big.rs - Too many changes to display (600 lines)]\n"
        );
        assert!(!result.contains("+x"));
    }

    #[test]
    fn test_file_at_limit_is_not_truncated() {
        let mut runner = MockCommandRunner::new();
        expect_listing(&mut runner, "edge.rs");
        expect_diff(&mut runner, "edge.rs", lines(500), 1);

        let result = report(get_staged_changes(&runner));

        assert!(result.contains("[File: edge.rs]\n+x"));
        assert!(!result.contains("truncated"));
    }

    #[test]
    fn test_total_limit_stops_detail() {
        // Arrange - 12 files of 499 lines; the 11th crosses 5000
        let mut runner = MockCommandRunner::new();
        let names: Vec<String> = (1..=12).map(|i| format!("file{:02}.txt", i)).collect();
        expect_listing(&mut runner, &names.join("\n"));
        for (index, name) in names.iter().enumerate() {
            let times = if index < 11 { 1 } else { 0 };
            expect_diff(&mut runner, name, lines(499), times);
        }

        // Act
        let result = report(get_staged_changes(&runner));

        // Assert - every file is still listed at the top
        let (listed, changes) = result.split_once("\n\nChanges:\n").unwrap();
        for name in &names {
            assert!(listed.contains(name.as_str()));
        }
        assert!(changes.contains("[File: file11.txt]"));
        assert!(!changes.contains("[File: file12.txt]"));
        assert!(changes.ends_with("\n\n[1 more files not shown due to size constraints]\n"));
    }

    #[test]
    fn test_total_limit_crossed_on_last_file() {
        // Arrange - small limits, crossing on the final file
        let limits = SummaryLimits {
            max_lines_per_file: 5,
            max_total_lines: 6,
        };
        let mut runner = MockCommandRunner::new();
        expect_listing(&mut runner, "a\nb");
        expect_diff(&mut runner, "a", lines(4), 1);
        expect_diff(&mut runner, "b", lines(4), 1);

        // Act
        let result = report(get_staged_changes_with_limits(&runner, limits));

        // Assert - nothing remains, so no omission line
        assert!(!result.contains("more files not shown"));
        assert!(result.contains("[File: b]"));
    }

    #[test]
    fn test_truncated_file_counts_towards_total() {
        // Arrange
        let limits = SummaryLimits {
            max_lines_per_file: 5,
            max_total_lines: 8,
        };
        let mut runner = MockCommandRunner::new();
        expect_listing(&mut runner, "huge\nsmall\nother");
        expect_diff(&mut runner, "huge", lines(10), 1);
        expect_diff(&mut runner, "small", lines(2), 0);
        expect_diff(&mut runner, "other", lines(2), 0);

        // Act
        let result = report(get_staged_changes_with_limits(&runner, limits));

        // Assert
        assert_eq!(
            result,
            "Files changed:\nhuge\nsmall\nother\n\nChanges:\n\
             [1 file(s) exceeded maximum line count and were truncated]\n\n\
             [File: huge - Too many changes to display (10 lines)]\n\
             \n[2 more files not shown due to size constraints]\n"
        );
    }

    #[test]
    fn test_path_passed_literally() {
        let mut runner = MockCommandRunner::new();
        expect_listing(&mut runner, "dir with space/\"quoted\".txt");
        runner
            .expect_capture()
            .withf(|_, args| args.len() == 6 && args[5] == "dir with space/\"quoted\".txt")
            .times(1)
            .returning(|_, _| Ok("+q".to_string()));

        let result = report(get_staged_changes(&runner));

        assert!(result.contains("[File: dir with space/\"quoted\".txt]\n+q"));
    }

    #[test]
    fn test_git_args_disable_path_quoting() {
        // Without this, git prints `"\303\251.txt"`, which matches nothing as a pathspec
        assert_eq!(
            name_only_args(),
            vec!["-c", "core.quotePath=false", "diff", "--cached", "--name-only"]
        );
        assert_eq!(
            file_diff_args("é.txt"),
            vec!["-c", "core.quotePath=false", "diff", "--cached", "--", "é.txt"]
        );
    }

    #[test]
    fn test_non_ascii_path_gets_its_diff() {
        // Arrange - raw UTF-8 listing as produced with quoting disabled
        let mut runner = MockCommandRunner::new();
        expect_listing(&mut runner, "é.txt\n");
        expect_diff(&mut runner, "é.txt", "+hello\n".to_string(), 1);

        // Act
        let result = report(get_staged_changes(&runner));

        // Assert - the body is present and the name is not C-quoted
        assert_eq!(
            result,
            "Files changed:\né.txt\n\nChanges:\n[File: é.txt]\n+hello\n\n\n"
        );
        assert!(!result.contains("\\303"));
    }

    #[test]
    fn test_listing_failure_is_staged_changes_error() {
        // Arrange
        let mut runner = MockCommandRunner::new();
        runner
            .expect_capture()
            .times(1)
            .returning(|_, _| Err(git_failure("git diff --cached --name-only")));

        // Act
        let result = get_staged_changes(&runner);

        // Assert
        let error = result.unwrap_err();
        assert!(matches!(error, GitError::StagedChanges(_)));
        assert_eq!(error.to_string(), "Failed to get staged changes");
    }

    #[test]
    fn test_diff_failure_is_staged_changes_error() {
        let mut runner = MockCommandRunner::new();
        expect_listing(&mut runner, "a\nb");
        expect_diff(&mut runner, "a", "+a".to_string(), 1);
        runner
            .expect_capture()
            .withf(|_, args| args.join(" ") == "-c core.quotePath=false diff --cached -- b")
            .times(1)
            .returning(|_, _| Err(git_failure("git diff --cached -- b")));

        let result = get_staged_changes(&runner);

        assert!(matches!(result, Err(GitError::StagedChanges(_))));
    }

    #[test]
    fn test_limits_deserialize_with_defaults() {
        let limits: SummaryLimits = toml::from_str("max_total_lines = 100").unwrap();

        assert_eq!(limits.max_lines_per_file, 500);
        assert_eq!(limits.max_total_lines, 100);
    }
}

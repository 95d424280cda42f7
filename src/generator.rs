//! Commit message generation
//!
//! Runs the configured generator command (Claude Code by default) with a
//! prompt built from the staged change report.

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::debug;

use crate::config::Config;
use crate::prompt::build_prompt;

/// Generate a commit message from the staged change report
///
/// Runs `<command> <args...> <prompt>` and returns its trimmed stdout.
///
/// # Errors
///
/// * Prompt size exceeds `max_prompt_size`
/// * Generator command cannot be started or exits non-zero
/// * Generator produced no output
///
/// # Example
///
/// ```no_run
/// use staged_commit::{config::load_config, generator::generate_message};
///
/// # #[tokio::main]
/// # async fn main() -> anyhow::Result<()> {
/// let config = load_config("prompt.toml")?;
/// let report = "Files changed:\na.txt\n\nChanges:\n[File: a.txt]\n+a\n\n";
/// let message = generate_message(report, &config).await?;
/// println!("Message: {}", message);
/// # Ok(())
/// # }
/// ```
pub async fn generate_message(report: &str, config: &Config) -> Result<String> {
    let prompt = build_prompt(report, &config.prompt, config.max_prompt_size)?;
    let generator = &config.generator;
    debug!(
        "Running generator '{}' with {} byte prompt",
        generator.command,
        prompt.len()
    );

    let output = Command::new(&generator.command)
        .args(&generator.args)
        .arg(&prompt)
        .output()
        .await
        .with_context(|| {
            format!(
                "Failed to execute '{}' command. Make sure it is installed and in PATH",
                generator.command
            )
        })?;

    if !output.status.success() {
        anyhow::bail!(
            "'{}' command failed with exit code {:?}\nstderr: {}",
            generator.command,
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let message = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if message.is_empty() {
        anyhow::bail!("'{}' returned an empty commit message", generator.command);
    }

    Ok(message)
}

/// Put the classified prefix in front of a generated message
///
/// # Arguments
///
/// * `prefix` - Prefix taken from the commit arguments, possibly empty
/// * `message` - Generated commit message
///
/// # Returns
///
/// * `String` - `"{prefix}: {message}"`, or `message` unchanged when the
///   prefix is empty or already leads the message
///
/// # Example
///
/// ```
/// use staged_commit::generator::apply_prefix;
///
/// assert_eq!(apply_prefix("JIRA-12", "fix: typo"), "JIRA-12: fix: typo");
/// assert_eq!(apply_prefix("", "fix: typo"), "fix: typo");
/// assert_eq!(apply_prefix("fix", "fix: typo"), "fix: typo");
/// ```
pub fn apply_prefix(prefix: &str, message: &str) -> String {
    if prefix.is_empty() || message.starts_with(prefix) {
        message.to_string()
    } else {
        format!("{}: {}", prefix, message)
    }
}

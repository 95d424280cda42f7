//! Prompt construction for the message generator
//!
//! Combines the configured template with the staged change report, refusing
//! to build prompts larger than the configured limit.

use anyhow::Result;

/// Default maximum allowed prompt size in bytes (1MB)
pub const DEFAULT_MAX_PROMPT_SIZE: usize = 1_000_000;

/// Separator between template and report ("\n\n")
const SEPARATOR_SIZE: usize = 2;

/// Build a prompt from the template and the staged change report
///
/// The final prompt structure is:
/// ```text
/// {prompt_template}
///
/// {report}
/// ```
///
/// # Arguments
///
/// * `report` - Staged change report
/// * `prompt_template` - Prompt template from configuration
/// * `max_size` - Maximum allowed combined size in bytes
///
/// # Returns
///
/// * `Result<String>` - Complete prompt for the generator
///
/// # Errors
///
/// * Combined size exceeds `max_size` (checked before allocating)
///
/// # Example
///
/// ```
/// use staged_commit::prompt::build_prompt;
///
/// let report = "Files changed:\na.txt\n\nChanges:\n[File: a.txt]\n+a\n\n";
/// let prompt = build_prompt(report, "Write a commit message:", 1_000_000).unwrap();
/// assert!(prompt.starts_with("Write a commit message:\n\nFiles changed:"));
/// ```
pub fn build_prompt(report: &str, prompt_template: &str, max_size: usize) -> Result<String> {
    let combined_size = prompt_size(report, prompt_template);

    if combined_size > max_size {
        anyhow::bail!(
            "Prompt size ({} bytes) exceeds maximum allowed size ({} bytes). \
             Consider reducing the size of staged changes or splitting into multiple commits.",
            combined_size,
            max_size
        );
    }

    Ok(format!("{}\n\n{}", prompt_template, report))
}

/// Size in bytes of the prompt [`build_prompt`] would produce.
pub fn prompt_size(report: &str, prompt_template: &str) -> usize {
    prompt_template.len() + SEPARATOR_SIZE + report.len()
}

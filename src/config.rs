//! Configuration management
//!
//! Loads the TOML configuration file holding the prompt template, the
//! message generator command and the staged-change summary limits.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

use crate::prompt::DEFAULT_MAX_PROMPT_SIZE;
use crate::summary::SummaryLimits;

/// Configuration file structure
///
/// # Example TOML
///
/// ```toml
/// prompt = """
/// Generate a concise git commit message for the following changes.
/// Use conventional commits format (feat:, fix:, docs:, etc.).
/// """
///
/// # Optional: maximum combined size of prompt + report in bytes
/// max_prompt_size = 1000000
///
/// [summary]
/// max_lines_per_file = 500
/// max_total_lines = 5000
///
/// [generator]
/// command = "claude"
/// args = ["-p"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Prompt template placed before the staged change report
    pub prompt: String,
    /// Maximum combined size of prompt template and report in bytes
    #[serde(default = "default_max_prompt_size")]
    pub max_prompt_size: usize,
    /// Line limits for the staged change report
    #[serde(default)]
    pub summary: SummaryLimits,
    /// External command producing the commit message
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Message generator command; the prompt is appended as the final argument.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            command: "claude".to_string(),
            args: vec!["-p".to_string()],
        }
    }
}

fn default_max_prompt_size() -> usize {
    DEFAULT_MAX_PROMPT_SIZE
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// * File does not exist or is not valid TOML
/// * Prompt is empty or whitespace-only
/// * Generator command is empty
/// * A summary limit is zero
///
/// # Example
///
/// ```no_run
/// use staged_commit::config::load_config;
///
/// # fn main() -> anyhow::Result<()> {
/// let config = load_config("prompt.toml")?;
/// println!("Generator: {}", config.generator.command);
/// # Ok(())
/// # }
/// ```
pub fn load_config(config_path: &str) -> Result<Config> {
    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path))?;
    parse_config(&content)
        .with_context(|| format!("Invalid configuration in {}", config_path))
}

/// Parse and validate configuration from TOML text
///
/// # Arguments
///
/// * `content` - TOML document
///
/// # Returns
///
/// * `Result<Config>` - Validated configuration
///
/// # Errors
///
/// * Invalid TOML or missing `prompt`
/// * Blank prompt, empty generator command or a zero summary limit
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse config file as TOML")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.prompt.trim().is_empty() {
        anyhow::bail!(
            "Configuration error: 'prompt' field cannot be empty or whitespace-only"
        );
    }
    if config.generator.command.trim().is_empty() {
        anyhow::bail!("Configuration error: 'generator.command' cannot be empty");
    }
    if config.summary.max_lines_per_file == 0 || config.summary.max_total_lines == 0 {
        anyhow::bail!("Configuration error: summary line limits must be greater than zero");
    }
    Ok(())
}

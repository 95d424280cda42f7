//! CLI tool to commit staged changes with a generated message
//!
//! Summarizes the staged changes, asks the configured generator for a
//! commit message and runs `git commit` with any extra arguments given.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::time::{Duration, sleep};
use tracing_subscriber::EnvFilter;

use staged_commit::{
    args::process_commit_args,
    commit::commit,
    config::{Config, load_config},
    generator::{apply_prefix, generate_message},
    output::CommitMessage,
    runner::SystemRunner,
    summary::{StagedChanges, get_staged_changes_with_limits},
};

/// Command-line arguments
#[derive(Parser)]
#[command(name = "staged_commit")]
#[command(about = "Commit staged changes with a generated message", long_about = None)]
struct Args {
    /// Output in JSON format (git commit will not be executed)
    #[arg(long)]
    json: bool,

    /// Print the staged change report and exit
    #[arg(long)]
    summary: bool,

    /// Path to the prompt configuration file (TOML format)
    #[arg(long, required_unless_present = "summary")]
    config: Option<String>,

    /// Optional message prefix followed by extra `git commit` arguments.
    /// Everything from the first of these on goes to git, so tool options
    /// (`--json`, `--summary`, `--config`) must come before them.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    commit_args: Vec<String>,
}

/// Main entry point
///
/// # Process flow
///
/// 1. Parse command-line arguments
/// 2. Load configuration file
/// 3. Split commit arguments into prefix and pass-through args
/// 4. Summarize the staged changes
/// 5. Generate the commit message (with spinner display)
/// 6. Output as JSON or run git commit
#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(error) = run().await {
        eprintln!("Error: {:#}", error);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let args = Args::parse();
    reject_misplaced_flags(&args.commit_args)?;

    if args.summary {
        let limits = match &args.config {
            Some(path) => load_config(path)?.summary,
            None => Default::default(),
        };
        match get_staged_changes_with_limits(&SystemRunner, limits)? {
            StagedChanges::NoStagedChanges => println!("No staged changes."),
            StagedChanges::Report(report) => println!("{}", report),
        }
        return Ok(());
    }

    let config_path = args
        .config
        .as_deref()
        .context("--config is required unless --summary is given")?;
    let config = load_config(config_path)?;
    let commit_args = process_commit_args(&args.commit_args);

    let report = match get_staged_changes_with_limits(&SystemRunner, config.summary)? {
        StagedChanges::NoStagedChanges => {
            anyhow::bail!("No staged changes found. Stage files with `git add` first.")
        }
        StagedChanges::Report(report) => report,
    };

    let generated = if args.json {
        // JSON mode: no spinner
        generate_message(&report, &config).await?
    } else {
        generate_with_spinner(&report, &config).await?
    };
    let message = apply_prefix(&commit_args.prefix, &generated);

    if args.json {
        let output = CommitMessage {
            message,
            args: commit_args.args,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("Committing with message:\n{}\n", message);
        commit(&message, &commit_args.args)?;
    }

    Ok(())
}

/// Fail when a tool option ended up among the `git commit` arguments.
fn reject_misplaced_flags(commit_args: &[String]) -> Result<()> {
    if let Some(flag) = commit_args.iter().find(|arg| is_tool_flag(arg)) {
        anyhow::bail!(
            "'{}' was given after the commit arguments and would be passed to git. \
             Place it before the prefix and git arguments.",
            flag
        );
    }
    Ok(())
}

fn is_tool_flag(arg: &str) -> bool {
    matches!(arg, "--json" | "--summary" | "--config") || arg.starts_with("--config=")
}

/// Generate the commit message while showing a spinner
///
/// The spinner stops as soon as generation finishes, successfully or not.
async fn generate_with_spinner(report: &str, config: &Config) -> Result<String> {
    let spinner_running = Arc::new(AtomicBool::new(true));
    let spinner_running_clone = Arc::clone(&spinner_running);

    let spinner_task = tokio::spawn(async move {
        let spinner_chars = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
        let mut idx = 0;

        while spinner_running_clone.load(Ordering::Relaxed) {
            print!("\r{} Generating commit message...", spinner_chars[idx]);
            let _ = io::stdout().flush();
            idx = (idx + 1) % spinner_chars.len();
            sleep(Duration::from_millis(80)).await;
        }

        // Clear spinner line
        print!("\r\x1b[K");
        let _ = io::stdout().flush();
    });

    let result = generate_message(report, config).await;

    spinner_running.store(false, Ordering::Relaxed);
    spinner_task.await.context("Spinner task failed")?;

    let message = result?;
    println!("✓ Commit message generated");

    Ok(message)
}

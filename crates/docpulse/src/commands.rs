// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Command handlers
//!
//! Each handler runs the git queries its subcommand needs and returns the
//! text to print. Nothing is printed here, so handlers are testable without
//! capturing stdout.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::PathBuf;

use docpulse_git::{
    BranchActivity, Commit, GitCli, GitError, branch_doc_activity, recent_doc_commits,
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::{Command, Config, ConfigError, OutputFormat};
use crate::state::ActivityView;
use crate::tree::{self, commit_label, file_label};

// ============================================================================
// Error Types
// ============================================================================

/// Handler errors
#[derive(Debug, Error)]
pub enum CommandError {
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// git failed
    #[error(transparent)]
    Git(#[from] GitError),

    /// JSON serialization error
    #[error("Failed to encode JSON: {0}")]
    Json(serde_json::Error),
}

// ============================================================================
// Dispatch
// ============================================================================

/// Validate the configuration and run its subcommand
///
/// # Errors
///
/// Returns `CommandError` for invalid configuration or a failed git call.
pub async fn run(config: &Config) -> Result<String, CommandError> {
    config.validate()?;
    let workspace = config.workspace_path().ok_or(ConfigError::NoWorkspace)?;
    let git = GitCli::new(&workspace).with_program(&config.git);
    debug!(workspace = %workspace.display(), command = ?config.command, "Dispatching");

    match &config.command {
        Command::Recent { .. } => recent(&git, config).await,
        Command::Branches => branches(&git, config).await,
        Command::Show { hash } => Ok(git.show(hash).await?),
        Command::Diff { target } => Ok(git
            .diff_branches(&config.base, target, &config.pattern)
            .await?),
        Command::Tree { depth, .. } => show_tree(git, config, workspace, *depth).await,
    }
}

async fn recent(git: &GitCli, config: &Config) -> Result<String, CommandError> {
    let commits = recent_doc_commits(git, &config.activity_options()).await?;
    match config.format {
        OutputFormat::Json => to_json(&commits),
        OutputFormat::Text => Ok(format_commits(&commits)),
    }
}

async fn branches(git: &GitCli, config: &Config) -> Result<String, CommandError> {
    let activity = branch_doc_activity(git, &config.activity_options()).await?;
    match config.format {
        OutputFormat::Json => to_json(&activity),
        OutputFormat::Text => Ok(format_branches(&activity, &config.base)),
    }
}

async fn show_tree(
    git: GitCli,
    config: &Config,
    workspace: PathBuf,
    depth: usize,
) -> Result<String, CommandError> {
    let mut view = ActivityView::new(git, config.activity_options());
    let state = view.refresh().await?;
    let nodes = tree::expand(state, &workspace, depth);
    match config.format {
        OutputFormat::Json => to_json(&nodes),
        OutputFormat::Text => Ok(tree::render_text(&nodes)),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CommandError> {
    serde_json::to_string_pretty(value).map_err(CommandError::Json)
}

/// Write command output followed by a newline.
///
/// A reader that goes away early (`docpulse recent | head -1`) is not an
/// error.
///
/// # Errors
///
/// Returns any write error other than a broken pipe.
pub fn write_output<W: Write>(mut out: W, output: &str) -> io::Result<()> {
    if output.is_empty() {
        return Ok(());
    }
    match writeln!(out, "{output}").and_then(|()| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result,
    }
}

// ============================================================================
// Text Output
// ============================================================================

/// One block per commit: label line, author, then indented files
#[must_use]
pub fn format_commits(commits: &[Commit]) -> String {
    if commits.is_empty() {
        return "No documentation commits found.".to_string();
    }

    let mut out = String::new();
    for commit in commits {
        write_commit(&mut out, commit, "");
    }
    out.trim_end().to_string()
}

/// One block per branch, commits indented beneath it
#[must_use]
pub fn format_branches(activity: &[BranchActivity], base: &str) -> String {
    if activity.is_empty() {
        return format!("No branches with documentation commits ahead of {base}.");
    }

    let mut out = String::new();
    for branch in activity {
        let count = branch.commits.len();
        let noun = if count == 1 { "commit" } else { "commits" };
        let _ = writeln!(out, "{} ({count} {noun} ahead of {base})", branch.branch_name);
        for commit in &branch.commits {
            write_commit(&mut out, commit, "  ");
        }
    }
    out.trim_end().to_string()
}

fn write_commit(out: &mut String, commit: &Commit, indent: &str) {
    let _ = writeln!(out, "{indent}{}  ({})", commit_label(commit), commit.author);
    for file in &commit.files {
        let _ = writeln!(out, "{indent}    {}", file_label(file));
    }
}

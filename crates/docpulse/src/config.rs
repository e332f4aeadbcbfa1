// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for docpulse
//!
//! Command-line flags and environment variables, plus the derived settings
//! (workspace root, activity options, log level) the commands run with.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use docpulse_git::ActivityOptions;
use docpulse_git::activity::{DEFAULT_BASE_BRANCH, DEFAULT_OVERFETCH_FACTOR, DEFAULT_RECENT_LIMIT};
use docpulse_git::fetcher::{DEFAULT_PATTERN, GIT_COMMAND};

/// docpulse - Markdown change history for a git repository
#[derive(Parser, Debug, Clone)]
#[command(name = "docpulse")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Repository working directory
    ///
    /// Defaults to the current working directory.
    #[arg(short, long, global = true, env = "DOCPULSE_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Branch that other branches are compared against
    #[arg(short, long, global = true, env = "DOCPULSE_BASE_BRANCH", default_value = DEFAULT_BASE_BRANCH)]
    pub base: String,

    /// Pathspec selecting documentation files
    #[arg(short, long, global = true, env = "DOCPULSE_PATTERN", default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// git executable to run
    #[arg(long, global = true, env = "DOCPULSE_GIT", default_value = GIT_COMMAND)]
    pub git: PathBuf,

    /// Raw commits requested per page, as a multiple of the commit limit
    #[arg(long, global = true, default_value_t = DEFAULT_OVERFETCH_FACTOR)]
    pub overfetch: usize,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never mix with command output.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List recent commits that touched documentation files
    Recent {
        /// Number of commits to show
        #[arg(short = 'n', long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: usize,
    },

    /// List branches with doc commits not on the base branch, most recent first
    Branches,

    /// Print the full `git show` output for a commit
    Show {
        /// Commit hash (full or abbreviated)
        hash: String,
    },

    /// Print doc changes on a branch since it forked from the base branch
    Diff {
        /// Branch to compare with the base branch
        target: String,
    },

    /// Print the Commits / Branches tree
    Tree {
        /// Levels to expand below the two root nodes (0 shows only the roots)
        #[arg(short, long, default_value_t = 3)]
        depth: usize,

        /// Number of recent commits to include
        #[arg(short = 'n', long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: usize,
    },
}

/// How command results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command: Command::Branches,
            workspace: None,
            base: DEFAULT_BASE_BRANCH.to_string(),
            pattern: DEFAULT_PATTERN.to_string(),
            git: PathBuf::from(GIT_COMMAND),
            overfetch: DEFAULT_OVERFETCH_FACTOR,
            format: OutputFormat::Text,
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Get the workspace path, using current directory as default
    ///
    /// Returns `None` if no workspace is specified and the current
    /// directory cannot be determined.
    #[must_use]
    pub fn workspace_path(&self) -> Option<PathBuf> {
        self.workspace
            .clone()
            .or_else(|| std::env::current_dir().ok())
    }

    /// Activity settings for this run
    ///
    /// `Recent` and `Tree` supply their own commit limit; other commands use
    /// the default.
    #[must_use]
    pub fn activity_options(&self) -> ActivityOptions {
        let limit = match self.command {
            Command::Recent { limit } | Command::Tree { limit, .. } => limit,
            _ => DEFAULT_RECENT_LIMIT,
        };
        ActivityOptions::default()
            .with_pattern(&self.pattern)
            .with_base_branch(&self.base)
            .with_limit(limit)
            .with_overfetch(self.overfetch)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The workspace path is specified but doesn't exist or isn't a directory
    /// - The pattern or base branch is empty
    /// - The overfetch factor is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref workspace) = self.workspace {
            if !workspace.exists() {
                return Err(ConfigError::WorkspaceNotFound(workspace.clone()));
            }
            if !workspace.is_dir() {
                return Err(ConfigError::WorkspaceNotDirectory(workspace.clone()));
            }
        }

        if self.pattern.trim().is_empty() {
            return Err(ConfigError::EmptyPattern);
        }
        if self.base.trim().is_empty() {
            return Err(ConfigError::EmptyBaseBranch);
        }
        if self.overfetch == 0 {
            return Err(ConfigError::InvalidOverfetch);
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Workspace path not found
    #[error("Workspace path not found: {0}")]
    WorkspaceNotFound(PathBuf),

    /// Workspace path is not a directory
    #[error("Workspace path is not a directory: {0}")]
    WorkspaceNotDirectory(PathBuf),

    /// No workspace given and the current directory is unavailable
    #[error("No workspace given and the current directory cannot be determined")]
    NoWorkspace,

    /// Empty pathspec
    #[error("File pattern must not be empty")]
    EmptyPattern,

    /// Empty base branch name
    #[error("Base branch must not be empty")]
    EmptyBaseBranch,

    /// Overfetch factor of zero
    #[error("Overfetch factor must be at least 1")]
    InvalidOverfetch,
}

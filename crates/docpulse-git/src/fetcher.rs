// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Running git and capturing its output
//!
//! Every call spawns `git` with an argument vector (never through a shell),
//! waits for it to exit and returns stdout. There is no timeout: a git
//! process that never exits stalls the caller.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::GitError;

/// Default git executable
pub const GIT_COMMAND: &str = "git";

/// Default pathspec for documentation files
pub const DEFAULT_PATTERN: &str = "*.md";

/// `--pretty` format understood by [`crate::parser`]
pub const LOG_FORMAT: &str = "--pretty=format:%H|%h|%ct|%an|%s";

/// What to ask `git log` for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    /// Pathspec glob, passed after `--`
    pub pattern: String,
    /// `-n`: maximum commits to list
    pub max_count: Option<usize>,
    /// `--skip`: commits to pass over first
    pub skip: usize,
    /// Revision range such as `main..feature`
    pub range: Option<String>,
}

impl LogQuery {
    /// All commits reachable from HEAD that touch `pattern`
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            max_count: None,
            skip: 0,
            range: None,
        }
    }

    /// Limit the number of commits listed
    #[must_use]
    pub fn max_count(mut self, n: usize) -> Self {
        self.max_count = Some(n);
        self
    }

    /// Skip the first `n` commits
    #[must_use]
    pub fn skip(mut self, n: usize) -> Self {
        self.skip = n;
        self
    }

    /// Only commits on `branch` that are not on `base`
    #[must_use]
    pub fn between(mut self, base: &str, branch: &str) -> Self {
        self.range = Some(format!("{base}..{branch}"));
        self
    }

    /// Build the `git log` argument vector
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["log".to_string()];
        if let Some(n) = self.max_count {
            args.push("-n".to_string());
            args.push(n.to_string());
        }
        if self.skip > 0 {
            args.push(format!("--skip={}", self.skip));
        }
        if let Some(ref range) = self.range {
            args.push(range.clone());
        }
        args.push(LOG_FORMAT.to_string());
        args.push("--name-status".to_string());
        args.push("--".to_string());
        args.push(self.pattern.clone());
        args
    }
}

/// Source of raw log text for the activity functions
///
/// [`GitCli`] is the real implementation; tests substitute scripted sources.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Raw `git log` output for a query
    async fn log(&self, query: &LogQuery) -> Result<String, GitError>;

    /// Short names of all local branches
    async fn local_branches(&self) -> Result<Vec<String>, GitError>;
}

/// Executor for git commands in one working directory
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
    workdir: PathBuf,
}

impl GitCli {
    /// Run `git` from `PATH` inside `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: PathBuf::from(GIT_COMMAND),
            workdir: workdir.into(),
        }
    }

    /// Use a specific git executable
    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Working directory git runs in
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run git with the given arguments and return its stdout.
    ///
    /// Output is decoded lossily and trailing whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::WorkdirNotFound`] if the working directory is
    /// missing, [`GitError::ToolNotFound`] if the executable cannot be
    /// started and [`GitError::CommandFailed`] on a non-zero exit.
    pub async fn run<S: AsRef<OsStr>>(&self, args: &[S]) -> Result<String, GitError> {
        let command = self.describe(args);
        debug!(command = %command, workdir = %self.workdir.display(), "Running git");

        if !self.workdir.is_dir() {
            return Err(GitError::WorkdirNotFound(self.workdir.clone()));
        }

        // Non-ASCII paths would otherwise come back C-quoted
        let output = Command::new(&self.program)
            .args(["-c", "core.quotePath=false"])
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    GitError::ToolNotFound {
                        program: self.program.display().to_string(),
                    }
                } else {
                    GitError::Io(e)
                }
            })?;

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            Ok(stdout.trim_end().to_string())
        } else {
            Err(GitError::CommandFailed {
                command,
                exit_code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    /// Full `git show` text for a commit
    ///
    /// # Errors
    ///
    /// Returns `GitError` if git fails, e.g. for an unknown hash.
    pub async fn show(&self, hash: &str) -> Result<String, GitError> {
        self.run(&["show", hash]).await
    }

    /// `git diff base...target -- pattern`: changes on `target` since it forked from `base`
    ///
    /// # Errors
    ///
    /// Returns `GitError` if either branch cannot be resolved.
    pub async fn diff_branches(
        &self,
        base: &str,
        target: &str,
        pattern: &str,
    ) -> Result<String, GitError> {
        let range = format!("{base}...{target}");
        self.run(&["diff", range.as_str(), "--", pattern]).await
    }

    fn describe<S: AsRef<OsStr>>(&self, args: &[S]) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(args.iter().map(|a| <S as AsRef<OsStr>>::as_ref(a)))
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl LogSource for GitCli {
    async fn log(&self, query: &LogQuery) -> Result<String, GitError> {
        self.run(&query.to_args()).await
    }

    async fn local_branches(&self) -> Result<Vec<String>, GitError> {
        let output = self
            .run(&["for-each-ref", "--format=%(refname:short)", "refs/heads"])
            .await?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string)
            .collect())
    }
}

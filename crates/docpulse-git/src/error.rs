// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for docpulse-git

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while invoking git
#[derive(Debug, Error)]
pub enum GitError {
    /// The git executable could not be started
    #[error("git executable not found: {program}")]
    ToolNotFound {
        /// The program name or path that was tried
        program: String,
    },

    /// git ran but exited unsuccessfully (bad revision, bad range, not a repository, ...)
    #[error("`{command}` failed (exit code {exit_code}): {stderr}")]
    CommandFailed {
        /// The command line, for display only
        command: String,
        /// Process exit code, or -1 when terminated by a signal
        exit_code: i32,
        /// Trimmed standard error output
        stderr: String,
    },

    /// The directory git should run in does not exist
    #[error("working directory not found: {}", .0.display())]
    WorkdirNotFound(PathBuf),

    /// Any other I/O failure while spawning or waiting on git
    #[error("I/O error running git: {0}")]
    Io(std::io::Error),
}

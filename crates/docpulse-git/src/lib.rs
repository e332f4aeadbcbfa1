// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! docpulse-git: Markdown change history from git
//!
//! This library crate runs `git log` for documentation files, parses the
//! output into commits with their changed files, and aggregates doc activity
//! per branch relative to a base branch.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use docpulse_git::{ActivityOptions, GitCli, recent_doc_commits};
//!
//! # async fn run() -> Result<(), docpulse_git::GitError> {
//! let git = GitCli::new(".");
//! let commits = recent_doc_commits(&git, &ActivityOptions::default().with_limit(10)).await?;
//!
//! for c in commits {
//!     println!("{} {} ({} files)", c.short_hash, c.message, c.files.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod activity;
pub mod commit;
pub mod error;
pub mod fetcher;
pub mod parser;

pub use activity::{ActivityOptions, branch_doc_activity, recent_doc_commits};
pub use commit::{BranchActivity, Commit, FileChange, FileStatus, InvalidFileChange};
pub use error::GitError;
pub use fetcher::{GitCli, LogQuery, LogSource};
pub use parser::{ParsedLog, parse_log, parse_log_page};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::activity::{ActivityOptions, branch_doc_activity, recent_doc_commits};
    pub use crate::commit::{BranchActivity, Commit, FileChange, FileStatus};
    pub use crate::error::GitError;
    pub use crate::fetcher::{GitCli, LogQuery, LogSource};
}

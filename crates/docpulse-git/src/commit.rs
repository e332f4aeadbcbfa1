// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Doc commit types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of change recorded for a file in `--name-status` output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// `A`
    Added,
    /// `M`
    Modified,
    /// `D`
    Deleted,
    /// `R<score>`
    Renamed,
}

impl FileStatus {
    /// Map a git status token (`M`, `A`, `D`, `R100`, ...) to a status.
    ///
    /// Only the leading letter is significant. Copies (`C`) and anything
    /// else return `None`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.chars().next()? {
            'A' => Some(Self::Added),
            'M' => Some(Self::Modified),
            'D' => Some(Self::Deleted),
            'R' => Some(Self::Renamed),
            _ => None,
        }
    }

    /// Single-letter code, as git prints it (without a similarity score)
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::Added => 'A',
            Self::Modified => 'M',
            Self::Deleted => 'D',
            Self::Renamed => 'R',
        }
    }
}

/// A single changed file within a commit
///
/// `old_path` is only ever set for renames; the constructors and
/// deserialization both enforce this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFileChange")]
pub struct FileChange {
    status: FileStatus,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    old_path: Option<String>,
}

/// Unchecked wire form of [`FileChange`]
#[derive(Deserialize)]
struct RawFileChange {
    status: FileStatus,
    path: String,
    #[serde(default)]
    old_path: Option<String>,
}

/// A deserialized file change that breaks the rename invariant
#[derive(Debug, Error)]
#[error("old_path given for a {status:?} file; only renames have one")]
pub struct InvalidFileChange {
    status: FileStatus,
}

impl TryFrom<RawFileChange> for FileChange {
    type Error = InvalidFileChange;

    fn try_from(raw: RawFileChange) -> Result<Self, Self::Error> {
        match (raw.status, raw.old_path) {
            (FileStatus::Renamed, Some(old)) => Ok(Self::renamed(old, raw.path)),
            (status, None) => Ok(Self::new(status, raw.path)),
            (status, Some(_)) => Err(InvalidFileChange { status }),
        }
    }
}

impl FileChange {
    /// An added, modified or deleted file.
    ///
    /// Passing [`FileStatus::Renamed`] here records a rename with an unknown
    /// source; use [`FileChange::renamed`] when the old path is known.
    #[must_use]
    pub fn new(status: FileStatus, path: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
            old_path: None,
        }
    }

    /// A file moved from `old_path` to `path`
    #[must_use]
    pub fn renamed(old_path: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            status: FileStatus::Renamed,
            path: path.into(),
            old_path: Some(old_path.into()),
        }
    }

    /// Change kind
    #[must_use]
    pub fn status(&self) -> FileStatus {
        self.status
    }

    /// Workspace-relative path after the change
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path before a rename
    #[must_use]
    pub fn old_path(&self) -> Option<&str> {
        self.old_path.as_deref()
    }
}

/// A commit that touched at least one file matching the doc pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Full commit hash (40 hex characters)
    pub hash: String,
    /// Abbreviated hash as printed by git (`%h`)
    pub short_hash: String,
    /// Committer timestamp, unix seconds
    pub timestamp: i64,
    /// Author name
    pub author: String,
    /// Subject line
    pub message: String,
    /// Changed files, in the order git listed them
    pub files: Vec<FileChange>,
}

impl Commit {
    /// Validate that a hash is a 40-character lowercase hex string
    #[must_use]
    pub fn is_valid_hash(hash: &str) -> bool {
        hash.len() == 40 && hash.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    /// Commit time as a UTC datetime (the epoch if the timestamp is out of range)
    #[must_use]
    pub fn committed_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.timestamp, 0).unwrap_or_default()
    }

    /// Short display date, e.g. `Jan 5, 2026`
    #[must_use]
    pub fn display_date(&self) -> String {
        self.committed_at().format("%b %-d, %Y").to_string()
    }
}

/// Doc commits on a branch that are not on the base branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchActivity {
    /// Short branch name (`feature/docs`)
    pub branch_name: String,
    /// Commits unique to the branch, newest first
    pub commits: Vec<Commit>,
}

impl BranchActivity {
    /// Timestamp of the most recent commit, `None` for an empty branch
    #[must_use]
    pub fn latest_timestamp(&self) -> Option<i64> {
        self.commits.iter().map(|c| c.timestamp).max()
    }
}

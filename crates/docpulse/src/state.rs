// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Activity snapshot and the view that owns it
//!
//! A refresh builds a complete new [`ActivityState`] and swaps it in; the
//! previous snapshot is never edited in place. If the refresh fails, the
//! previous snapshot stays current.

use chrono::{DateTime, Utc};
use docpulse_git::{
    ActivityOptions, BranchActivity, Commit, GitError, LogSource, branch_doc_activity,
    recent_doc_commits,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::tree::DocNode;

/// Everything the tree shows, as of one refresh
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityState {
    /// Recent doc commits, newest first
    pub commits: Vec<Commit>,
    /// Branches with doc activity, most recently active first
    pub branches: Vec<BranchActivity>,
    /// When this snapshot was taken; `None` before the first refresh
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// Owner of the current snapshot and the source it is rebuilt from
pub struct ActivityView<S> {
    source: S,
    options: ActivityOptions,
    state: ActivityState,
}

impl<S: LogSource> ActivityView<S> {
    /// Create a view with an empty snapshot
    pub fn new(source: S, options: ActivityOptions) -> Self {
        Self {
            source,
            options,
            state: ActivityState::default(),
        }
    }

    /// Current snapshot
    #[must_use]
    pub fn state(&self) -> &ActivityState {
        &self.state
    }

    /// Underlying log source
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Settings used on refresh
    #[must_use]
    pub fn options(&self) -> &ActivityOptions {
        &self.options
    }

    /// Rebuild the snapshot: recent commits first, then branch activity.
    ///
    /// # Errors
    ///
    /// Returns the first `GitError`; the previous snapshot is kept.
    pub async fn refresh(&mut self) -> Result<&ActivityState, GitError> {
        let fetched = async {
            let commits = recent_doc_commits(&self.source, &self.options).await?;
            let branches = branch_doc_activity(&self.source, &self.options).await?;
            Ok::<_, GitError>((commits, branches))
        }
        .await;

        match fetched {
            Ok((commits, branches)) => {
                info!(
                    commits = commits.len(),
                    branches = branches.len(),
                    "Refreshed doc activity"
                );
                self.state = ActivityState {
                    commits,
                    branches,
                    refreshed_at: Some(Utc::now()),
                };
                Ok(&self.state)
            }
            Err(e) => {
                warn!(error = %e, "Refresh failed, keeping previous snapshot");
                Err(e)
            }
        }
    }

    /// Top-level nodes
    #[must_use]
    pub fn roots(&self) -> Vec<DocNode> {
        DocNode::roots()
    }

    /// Children of `node` in the current snapshot
    #[must_use]
    pub fn children(&self, node: &DocNode) -> Vec<DocNode> {
        node.children(&self.state)
    }
}

// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Recent doc commits and per-branch doc activity
//!
//! Both functions issue their git calls one after another; nothing here runs
//! concurrently.

use std::cmp::Reverse;

use tracing::{debug, info, warn};

use crate::commit::{BranchActivity, Commit};
use crate::error::GitError;
use crate::fetcher::{DEFAULT_PATTERN, LogQuery, LogSource};
use crate::parser::{parse_log, parse_log_page};

/// Default number of recent commits to collect
pub const DEFAULT_RECENT_LIMIT: usize = 50;

/// Default reference branch for branch activity
pub const DEFAULT_BASE_BRANCH: &str = "main";

/// Default ratio of raw commits requested per page to commits wanted
pub const DEFAULT_OVERFETCH_FACTOR: usize = 5;

/// Settings shared by the activity queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityOptions {
    /// Pathspec glob selecting documentation files
    pub pattern: String,
    /// Branch that other branches are compared against
    pub base_branch: String,
    /// Number of recent commits to collect
    pub recent_limit: usize,
    /// Raw commits requested per page, as a multiple of `recent_limit`
    pub overfetch_factor: usize,
}

impl Default for ActivityOptions {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            overfetch_factor: DEFAULT_OVERFETCH_FACTOR,
        }
    }
}

impl ActivityOptions {
    /// Use a different pathspec
    #[must_use]
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = pattern.to_string();
        self
    }

    /// Use a different base branch
    #[must_use]
    pub fn with_base_branch(mut self, base: &str) -> Self {
        self.base_branch = base.to_string();
        self
    }

    /// Collect `limit` recent commits
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    /// Change the page size multiplier (values below 1 act as 1)
    #[must_use]
    pub fn with_overfetch(mut self, factor: usize) -> Self {
        self.overfetch_factor = factor;
        self
    }

    fn page_size(&self) -> usize {
        self.recent_limit
            .saturating_mul(self.overfetch_factor.max(1))
            .max(1)
    }
}

/// Collect the most recent commits that touched files matching the pattern.
///
/// Commits whose log entry lists no matching file are dropped by the parser,
/// so history is read in pages of `recent_limit * overfetch_factor` commits
/// until enough commits are found or history runs out.
///
/// # Errors
///
/// Returns the first `GitError` from the source; no partial result.
pub async fn recent_doc_commits<S>(
    source: &S,
    options: &ActivityOptions,
) -> Result<Vec<Commit>, GitError>
where
    S: LogSource + ?Sized,
{
    let limit = options.recent_limit;
    if limit == 0 {
        return Ok(Vec::new());
    }

    let page_size = options.page_size();
    let mut commits = Vec::with_capacity(limit);
    let mut skip = 0;

    loop {
        let query = LogQuery::new(&options.pattern)
            .max_count(page_size)
            .skip(skip);
        let raw = source.log(&query).await?;
        let page = parse_log_page(&raw);
        debug!(
            skip,
            headers = page.headers,
            kept = page.commits.len(),
            "Read log page"
        );

        commits.extend(page.commits);
        if commits.len() >= limit || page.headers < page_size {
            break;
        }
        skip += page.headers;
    }

    commits.truncate(limit);
    info!(count = commits.len(), "Collected recent doc commits");
    Ok(commits)
}

/// Doc commits unique to each local branch, most recently active branch first.
///
/// The base branch itself is skipped. A branch whose range cannot be read
/// (deleted mid-scan, unrelated history, ...) is logged and left out rather
/// than failing the whole scan. Branches with equal latest timestamps keep
/// the order git listed them in.
///
/// # Errors
///
/// Returns `GitError` only if the branch list itself cannot be read.
pub async fn branch_doc_activity<S>(
    source: &S,
    options: &ActivityOptions,
) -> Result<Vec<BranchActivity>, GitError>
where
    S: LogSource + ?Sized,
{
    let base = options.base_branch.as_str();
    let branches = source.local_branches().await?;
    let mut activity = Vec::new();

    for branch in branches.into_iter().filter(|b| b != base) {
        let query = LogQuery::new(&options.pattern).between(base, &branch);
        let raw = match source.log(&query).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(branch = %branch, error = %e, "Skipping branch");
                continue;
            }
        };

        let commits = parse_log(&raw, None);
        if commits.is_empty() {
            debug!(branch = %branch, "No doc commits ahead of base");
            continue;
        }
        activity.push(BranchActivity {
            branch_name: branch,
            commits,
        });
    }

    activity.sort_by_key(|b| Reverse(b.latest_timestamp()));
    info!(branches = activity.len(), base, "Collected branch doc activity");
    Ok(activity)
}

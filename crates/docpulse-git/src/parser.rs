// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Git log parsing
//!
//! Parses the output of
//! `git log --pretty=format:%H|%h|%ct|%an|%s --name-status` into [`Commit`]s.
//! Each commit is one header line followed by its status lines:
//!
//! ```text
//! 1945ab9c752534e733c38ba0109dc3b741f0a6eb|1945ab9|1768617186|Alice|Fix typo
//! M	README.md
//! R100	docs/old.md	docs/new.md
//! ```
//!
//! Lines that are neither a header nor a status line are skipped, and a
//! header that collects no files produces no commit.
//!
//! # Example
//!
//! ```
//! use docpulse_git::parser::parse_log;
//!
//! let raw = format!("{}|abc1234|1700000000|Alice|Add guide\nA\tdocs/guide.md", "a".repeat(40));
//! let commits = parse_log(&raw, None);
//! assert_eq!(commits.len(), 1);
//! assert_eq!(commits[0].files[0].path(), "docs/guide.md");
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::commit::{Commit, FileChange, FileStatus};

/// Start of a commit header: full lowercase hash followed by the field separator
static HEADER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{40}\|").expect("Invalid header line regex"));

/// Status letter, optional similarity score, then whitespace
static STATUS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[MADRC][0-9]*\s+").expect("Invalid status line regex"));

/// Number of `|`-separated fields in a header; the last one absorbs any extra `|`
const HEADER_FIELDS: usize = 5;

/// Result of parsing one chunk of log output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLog {
    /// Commits that had at least one file line
    pub commits: Vec<Commit>,
    /// Header lines seen, including those dropped for having no files
    pub headers: usize,
}

/// Parse raw log text into commits, keeping at most `limit` of them.
///
/// Commits keep the order they appear in the input.
#[must_use]
pub fn parse_log(raw: &str, limit: Option<usize>) -> Vec<Commit> {
    let mut commits = parse_log_page(raw).commits;
    if let Some(limit) = limit {
        commits.truncate(limit);
    }
    commits
}

/// Parse raw log text, also reporting how many commit headers were seen.
///
/// Callers paging through history with `-n`/`--skip` use
/// [`ParsedLog::headers`] to tell an exhausted history apart from a page
/// whose commits were all dropped.
#[must_use]
pub fn parse_log_page(raw: &str) -> ParsedLog {
    let mut parsed = ParsedLog::default();
    let mut current: Option<Commit> = None;

    for line in raw.lines() {
        if HEADER_LINE.is_match(line) {
            parsed.headers += 1;
            flush(&mut parsed.commits, current.take());
            current = parse_header(line);
            continue;
        }

        if STATUS_LINE.is_match(line) {
            let Some(commit) = current.as_mut() else {
                continue;
            };
            match parse_status(line) {
                Some(file) => commit.files.push(file),
                None => trace!(line, "Skipping unusable status line"),
            }
        }
    }
    flush(&mut parsed.commits, current);

    parsed
}

/// Keep a finished commit only if it touched at least one file
fn flush(commits: &mut Vec<Commit>, finished: Option<Commit>) {
    match finished {
        Some(commit) if !commit.files.is_empty() => commits.push(commit),
        Some(commit) => trace!(hash = %commit.hash, "Dropping commit with no matching files"),
        None => {}
    }
}

fn parse_header(line: &str) -> Option<Commit> {
    let fields: Vec<&str> = line.splitn(HEADER_FIELDS, '|').collect();
    let [hash, short_hash, timestamp, author, message] = fields.as_slice() else {
        trace!(line, "Skipping header with missing fields");
        return None;
    };

    Some(Commit {
        hash: (*hash).to_string(),
        short_hash: (*short_hash).to_string(),
        timestamp: timestamp.trim().parse().unwrap_or(0),
        author: (*author).to_string(),
        message: (*message).to_string(),
        files: Vec::new(),
    })
}

/// Parse `M\tpath` or `R100\told\tnew`.
///
/// git separates fields with tabs, so a tab split keeps paths containing
/// spaces intact; space-separated input falls back to a whitespace split.
fn parse_status(line: &str) -> Option<FileChange> {
    let line = line.trim();
    let tokens: Vec<&str> = if line.contains('\t') {
        line.split('\t').filter(|t| !t.is_empty()).collect()
    } else {
        line.split_whitespace().collect()
    };

    let status = FileStatus::from_token(tokens.first()?)?;
    match status {
        FileStatus::Renamed => Some(FileChange::renamed(*tokens.get(1)?, *tokens.get(2)?)),
        _ => Some(FileChange::new(status, *tokens.get(1)?)),
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn hash_strategy() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[0-9a-f]{40}").expect("valid regex")
    }

    fn path_strategy() -> impl Strategy<Value = String> {
        "[a-z]{1,8}(/[a-z]{1,8}){0,2}\\.md"
    }

    fn file_line_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            ("[AMD]", path_strategy()).prop_map(|(s, p)| format!("{s}\t{p}")),
            (path_strategy(), path_strategy()).prop_map(|(a, b)| format!("R100\t{a}\t{b}")),
        ]
    }

    /// A header plus 1..4 file lines
    fn entry_strategy() -> impl Strategy<Value = (String, Vec<String>)> {
        (
            hash_strategy(),
            0i64..2_000_000_000i64,
            "[A-Za-z ]{1,20}",
            "[^\r\n]{0,40}",
            proptest::collection::vec(file_line_strategy(), 1..4),
        )
            .prop_map(|(hash, ts, author, message, files)| {
                let short = hash[..7].to_string();
                (format!("{hash}|{short}|{ts}|{author}|{message}"), files)
            })
    }

    proptest! {
        /// Property: every header with at least one file line yields one commit
        #[test]
        fn prop_commit_count_matches_headers(
            entries in proptest::collection::vec(entry_strategy(), 0..12)
        ) {
            let raw: Vec<String> = entries
                .iter()
                .flat_map(|(h, files)| std::iter::once(h.clone()).chain(files.iter().cloned()))
                .collect();
            let parsed = parse_log_page(&raw.join("\n"));
            prop_assert_eq!(parsed.headers, entries.len());
            prop_assert_eq!(parsed.commits.len(), entries.len());
            for (commit, (_, files)) in parsed.commits.iter().zip(&entries) {
                prop_assert_eq!(commit.files.len(), files.len());
            }
        }

        /// Property: the message field survives any embedded `|`
        #[test]
        fn prop_message_roundtrips(
            hash in hash_strategy(),
            message in "[^\r\n]{0,60}",
        ) {
            let raw = format!("{hash}|short|1|Author|{message}\nM\tREADME.md");
            let commits = parse_log(&raw, None);
            prop_assert_eq!(commits.len(), 1);
            prop_assert_eq!(&commits[0].message, &message);
        }

        /// Property: limit never grows the result and keeps a prefix
        #[test]
        fn prop_limit_is_prefix(
            entries in proptest::collection::vec(entry_strategy(), 0..8),
            limit in 0usize..10,
        ) {
            let raw: Vec<String> = entries
                .iter()
                .flat_map(|(h, files)| std::iter::once(h.clone()).chain(files.iter().cloned()))
                .collect();
            let raw = raw.join("\n");
            let all = parse_log(&raw, None);
            let limited = parse_log(&raw, Some(limit));
            prop_assert_eq!(limited.len(), all.len().min(limit));
            prop_assert_eq!(&all[..limited.len()], &limited[..]);
        }

        /// Property: arbitrary input never panics and never yields a fileless commit
        #[test]
        fn prop_arbitrary_input_is_safe(raw in "(?s).{0,400}") {
            for commit in parse_log(&raw, None) {
                prop_assert!(!commit.files.is_empty());
            }
        }
    }
}

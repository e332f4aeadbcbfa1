// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Integration tests for docpulse-git
//!
//! These tests build a small throwaway repository with the real `git`
//! binary and read it back through `GitCli`.

use std::path::Path;
use std::process::Command;

use docpulse_git::prelude::*;
use docpulse_git::parser::parse_log;
use tempfile::TempDir;

/// A scratch repository whose default branch is `main`
struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let repo = Self { dir };
        repo.git(&["init", "-q"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn cli(&self) -> GitCli {
        GitCli::new(self.path())
    }

    /// Run git synchronously with a fixed identity
    fn git(&self, args: &[&str]) -> String {
        self.git_at(args, None)
    }

    fn git_at(&self, args: &[&str], timestamp: Option<i64>) -> String {
        let mut cmd = Command::new("git");
        cmd.current_dir(self.path())
            .args(["-c", "commit.gpgsign=false"])
            .args(args)
            .env("GIT_AUTHOR_NAME", "Test Author")
            .env("GIT_AUTHOR_EMAIL", "author@example.com")
            .env("GIT_COMMITTER_NAME", "Test Author")
            .env("GIT_COMMITTER_EMAIL", "author@example.com");
        if let Some(ts) = timestamp {
            let date = format!("@{ts} +0000");
            cmd.env("GIT_AUTHOR_DATE", &date)
                .env("GIT_COMMITTER_DATE", &date);
        }
        let output = cmd.output().expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    fn write(&self, rel: &str, contents: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create dirs");
        }
        std::fs::write(path, contents).expect("Failed to write file");
    }

    fn commit(&self, message: &str, timestamp: i64) -> String {
        self.git(&["add", "-A"]);
        self.git_at(&["commit", "-q", "-m", message], Some(timestamp));
        self.git(&["rev-parse", "HEAD"])
    }
}

/// main: README (t=1000), code only (t=2000), guide (t=3000), rename (t=4000)
fn repo_with_history() -> TestRepo {
    let repo = TestRepo::new();
    repo.write("README.md", "# Project\n");
    repo.commit("Fix typo|in|README", 1_000);
    repo.write("src/main.txt", "code\n");
    repo.commit("Code only", 2_000);
    repo.write("docs/guide.md", "# Guide\n\nLong enough to be detected as a rename.\n");
    repo.commit("Add guide", 3_000);
    repo.git(&["mv", "docs/guide.md", "docs/manual.md"]);
    repo.commit("Rename guide", 4_000);
    repo
}

#[tokio::test]
async fn test_recent_doc_commits_from_real_repository() {
    let repo = repo_with_history();
    let commits = recent_doc_commits(&repo.cli(), &ActivityOptions::default())
        .await
        .expect("Should read recent commits");

    let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["Rename guide", "Add guide", "Fix typo|in|README"],
        "Code-only commit should be excluded, newest first"
    );

    for commit in &commits {
        assert!(Commit::is_valid_hash(&commit.hash), "bad hash {}", commit.hash);
        assert!(commit.hash.starts_with(&commit.short_hash));
        assert_eq!(commit.author, "Test Author");
    }

    assert_eq!(commits[0].timestamp, 4_000);
    assert_eq!(
        commits[0].files,
        vec![FileChange::renamed("docs/guide.md", "docs/manual.md")]
    );
    assert_eq!(
        commits[2].files,
        vec![FileChange::new(FileStatus::Added, "README.md")]
    );
}

#[tokio::test]
async fn test_recent_doc_commits_respects_limit() {
    let repo = repo_with_history();
    let options = ActivityOptions::default().with_limit(2).with_overfetch(1);
    let commits = recent_doc_commits(&repo.cli(), &options)
        .await
        .expect("Should read recent commits");
    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].message, "Rename guide");
}

#[tokio::test]
async fn test_custom_pattern() {
    let repo = repo_with_history();
    let options = ActivityOptions::default().with_pattern("*.txt");
    let commits = recent_doc_commits(&repo.cli(), &options)
        .await
        .expect("Should read recent commits");
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].message, "Code only");
}

#[tokio::test]
async fn test_branch_activity_from_real_repository() {
    let repo = repo_with_history();

    repo.git(&["checkout", "-q", "-b", "feature-a"]);
    repo.write("a.md", "a\n");
    repo.commit("Docs on a", 5_000);

    repo.git(&["checkout", "-q", "main"]);
    repo.git(&["checkout", "-q", "-b", "feature-b"]);
    repo.write("b.md", "b\n");
    repo.commit("Docs on b", 6_000);

    repo.git(&["checkout", "-q", "main"]);
    repo.git(&["checkout", "-q", "-b", "code-only"]);
    repo.write("src/lib.txt", "more code\n");
    repo.commit("Code on branch", 7_000);

    let activity = branch_doc_activity(&repo.cli(), &ActivityOptions::default())
        .await
        .expect("Should aggregate branches");

    let names: Vec<&str> = activity.iter().map(|b| b.branch_name.as_str()).collect();
    assert_eq!(names, vec!["feature-b", "feature-a"]);
    assert_eq!(activity[0].commits.len(), 1);
    assert_eq!(activity[0].commits[0].files[0].path(), "b.md");
}

#[tokio::test]
async fn test_branch_activity_with_missing_base_skips_everything() {
    let repo = repo_with_history();
    repo.git(&["checkout", "-q", "-b", "feature"]);
    repo.write("f.md", "f\n");
    repo.commit("Docs on feature", 5_000);

    let options = ActivityOptions::default().with_base_branch("trunk");
    let activity = branch_doc_activity(&repo.cli(), &options)
        .await
        .expect("Per-branch failures should not fail the scan");
    assert!(activity.is_empty());
}

#[tokio::test]
async fn test_local_branches_lists_heads() {
    let repo = repo_with_history();
    repo.git(&["branch", "topic/one"]);
    let mut branches = repo.cli().local_branches().await.expect("Should list branches");
    branches.sort();
    assert_eq!(branches, vec!["main".to_string(), "topic/one".to_string()]);
}

#[tokio::test]
async fn test_show_returns_patch_text() {
    let repo = repo_with_history();
    let head = repo.git(&["rev-parse", "HEAD"]);
    let text = repo.cli().show(&head).await.expect("Should show commit");
    assert!(text.starts_with(&format!("commit {head}")));
    assert!(text.contains("docs/manual.md"));
}

#[tokio::test]
async fn test_show_unknown_hash_fails() {
    let repo = repo_with_history();
    let err = repo
        .cli()
        .show("0123456789012345678901234567890123456789")
        .await
        .expect_err("Unknown hash should fail");
    match err {
        GitError::CommandFailed { exit_code, stderr, .. } => {
            assert_ne!(exit_code, 0);
            assert!(!stderr.is_empty());
        }
        other => panic!("Expected CommandFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_diff_branches_limited_to_pattern() {
    let repo = repo_with_history();
    repo.git(&["checkout", "-q", "-b", "feature"]);
    repo.write("notes.md", "notes\n");
    repo.write("src/other.txt", "ignored\n");
    repo.commit("Notes and code", 5_000);

    let diff = repo
        .cli()
        .diff_branches("main", "feature", "*.md")
        .await
        .expect("Should diff branches");
    assert!(diff.contains("notes.md"));
    assert!(!diff.contains("other.txt"));
}

#[tokio::test]
async fn test_invalid_range_is_an_error() {
    let repo = repo_with_history();
    let query = LogQuery::new("*.md").between("main", "does-not-exist");
    let result = repo.cli().log(&query).await;
    assert!(matches!(result, Err(GitError::CommandFailed { .. })));
}

#[tokio::test]
async fn test_raw_log_round_trips_through_parser() {
    let repo = repo_with_history();
    let raw = repo
        .cli()
        .log(&LogQuery::new("*.md"))
        .await
        .expect("Should read log");
    let commits = parse_log(&raw, Some(1));
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].message, "Rename guide");
}

#[tokio::test]
async fn test_non_ascii_paths_are_not_quoted() {
    let repo = TestRepo::new();
    repo.write("docs/café.md", "# Café\n");
    repo.commit("Add café notes", 1_700_000_000);

    let options = ActivityOptions::default().with_limit(5);
    let commits = recent_doc_commits(&repo.cli(), &options)
        .await
        .expect("Should read commits");
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].files[0].path(), "docs/café.md");
}

#[tokio::test]
async fn test_missing_workdir_is_reported() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let gone = dir.path().join("deleted");
    let result = GitCli::new(&gone).local_branches().await;
    assert!(matches!(result, Err(GitError::WorkdirNotFound(p)) if p == gone));
}

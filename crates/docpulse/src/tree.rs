// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Sidebar tree model
//!
//! The tree has two fixed roots, "Commits" and "Branches". Everything below
//! them is produced on demand from the current [`ActivityState`] by
//! [`DocNode::children`]; a host renders [`TreeItem`]s and invokes
//! [`NodeAction`]s, it never inspects node internals.

use std::path::{Path, PathBuf};

use docpulse_git::{BranchActivity, Commit, FileChange, FileStatus};
use serde::Serialize;

use crate::state::ActivityState;

/// Context value the host uses to attach branch-commit menu entries
pub const BRANCH_COMMIT_CONTEXT: &str = "branchCommit";

/// One node of the tree, carrying only what its kind needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocNode {
    /// "Commits" root
    CommitsRoot,
    /// "Branches" root
    BranchesRoot,
    /// A recent doc commit
    Commit(Commit),
    /// A branch with doc commits ahead of the base branch
    Branch(BranchActivity),
    /// A doc commit listed under its branch
    BranchCommit {
        /// Owning branch
        branch: String,
        /// The commit
        commit: Commit,
    },
    /// A changed file inside a commit
    File(FileChange),
}

/// Whether and how a node can be expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collapsible {
    /// Leaf
    None,
    /// Expandable, initially closed
    Collapsed,
    /// Expandable, initially open
    Expanded,
}

/// Something the host can do with a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeAction {
    /// Open a file in an editor
    OpenFile {
        /// Absolute path (workspace root joined with the file's relative path)
        path: PathBuf,
    },
    /// Show `git show` output for a commit in a read-only buffer
    ShowCommit {
        /// Full commit hash
        hash: String,
    },
}

/// Host-neutral presentation of a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeItem {
    /// Main text
    pub label: String,
    /// Secondary text shown dimmed after the label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Expansion state
    pub collapsible: Collapsible,
    /// Menu selector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_value: Option<String>,
    /// Action on activation (click)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<NodeAction>,
    /// Actions offered in the node's context menu
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub menu: Vec<NodeAction>,
}

impl DocNode {
    /// The two fixed top-level nodes
    #[must_use]
    pub fn roots() -> Vec<DocNode> {
        vec![DocNode::CommitsRoot, DocNode::BranchesRoot]
    }

    /// Children of this node under the given state
    #[must_use]
    pub fn children(&self, state: &ActivityState) -> Vec<DocNode> {
        match self {
            DocNode::CommitsRoot => state.commits.iter().cloned().map(DocNode::Commit).collect(),
            DocNode::BranchesRoot => state.branches.iter().cloned().map(DocNode::Branch).collect(),
            DocNode::Commit(commit) | DocNode::BranchCommit { commit, .. } => {
                commit.files.iter().cloned().map(DocNode::File).collect()
            }
            DocNode::Branch(branch) => branch
                .commits
                .iter()
                .map(|commit| DocNode::BranchCommit {
                    branch: branch.branch_name.clone(),
                    commit: commit.clone(),
                })
                .collect(),
            DocNode::File(_) => Vec::new(),
        }
    }

    /// Full hash for commit nodes
    #[must_use]
    pub fn commit_hash(&self) -> Option<&str> {
        match self {
            DocNode::Commit(commit) | DocNode::BranchCommit { commit, .. } => Some(&commit.hash),
            _ => None,
        }
    }

    /// Presentation of this node; file paths resolve against `workspace_root`
    #[must_use]
    pub fn item(&self, workspace_root: &Path) -> TreeItem {
        match self {
            DocNode::CommitsRoot => TreeItem::plain("Commits", Collapsible::Expanded),
            DocNode::BranchesRoot => TreeItem::plain("Branches", Collapsible::Expanded),
            DocNode::Commit(commit) => TreeItem {
                description: Some(commit.author.clone()),
                menu: vec![show_commit(commit)],
                ..TreeItem::plain(commit_label(commit), Collapsible::Collapsed)
            },
            DocNode::BranchCommit { commit, .. } => TreeItem {
                description: Some(commit.author.clone()),
                context_value: Some(BRANCH_COMMIT_CONTEXT.to_string()),
                menu: vec![show_commit(commit)],
                ..TreeItem::plain(commit_label(commit), Collapsible::Collapsed)
            },
            DocNode::Branch(branch) => {
                TreeItem::plain(branch.branch_name.clone(), Collapsible::Collapsed)
            }
            DocNode::File(file) => {
                let open = NodeAction::OpenFile {
                    path: workspace_root.join(file.path()),
                };
                TreeItem {
                    command: Some(open.clone()),
                    menu: vec![open],
                    ..TreeItem::plain(file_label(file), Collapsible::None)
                }
            }
        }
    }
}

impl TreeItem {
    fn plain(label: impl Into<String>, collapsible: Collapsible) -> Self {
        Self {
            label: label.into(),
            description: None,
            collapsible,
            context_value: None,
            command: None,
            menu: Vec::new(),
        }
    }
}

fn show_commit(commit: &Commit) -> NodeAction {
    NodeAction::ShowCommit {
        hash: commit.hash.clone(),
    }
}

/// `Nov 14, 2023 — abc1234 — Fix typo`
#[must_use]
pub fn commit_label(commit: &Commit) -> String {
    format!(
        "{} — {} — {}",
        commit.display_date(),
        commit.short_hash,
        commit.message
    )
}

/// `M README.md`, or `R old.md → new.md` for renames
#[must_use]
pub fn file_label(file: &FileChange) -> String {
    match (file.status(), file.old_path()) {
        (FileStatus::Renamed, Some(old)) => format!("R {old} → {}", file.path()),
        (status, _) => format!("{} {}", status.letter(), file.path()),
    }
}

/// A node with its item and (possibly truncated) subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpandedNode {
    /// Presentation
    #[serde(flatten)]
    pub item: TreeItem,
    /// Children expanded so far; empty for leaves or at the depth cut-off
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ExpandedNode>,
}

/// Materialize the tree from the roots down to `depth` levels below them
#[must_use]
pub fn expand(state: &ActivityState, workspace_root: &Path, depth: usize) -> Vec<ExpandedNode> {
    DocNode::roots()
        .iter()
        .map(|root| expand_node(root, state, workspace_root, depth))
        .collect()
}

fn expand_node(
    node: &DocNode,
    state: &ActivityState,
    workspace_root: &Path,
    depth: usize,
) -> ExpandedNode {
    let children = if depth == 0 {
        Vec::new()
    } else {
        node.children(state)
            .iter()
            .map(|child| expand_node(child, state, workspace_root, depth - 1))
            .collect()
    };
    ExpandedNode {
        item: node.item(workspace_root),
        children,
    }
}

/// Indented text rendering of an expanded tree
#[must_use]
pub fn render_text(nodes: &[ExpandedNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        render_line(node, 0, &mut out);
    }
    out
}

fn render_line(node: &ExpandedNode, indent: usize, out: &mut String) {
    let marker = match node.item.collapsible {
        Collapsible::None => ' ',
        Collapsible::Collapsed if node.children.is_empty() => '+',
        Collapsible::Collapsed | Collapsible::Expanded => '-',
    };
    out.push_str(&"  ".repeat(indent));
    out.push(marker);
    out.push(' ');
    out.push_str(&node.item.label);
    if let Some(ref description) = node.item.description {
        out.push_str("  ");
        out.push_str(description);
    }
    out.push('\n');
    for child in &node.children {
        render_line(child, indent + 1, out);
    }
}

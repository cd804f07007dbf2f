//! Repository host trait and related types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub owner: String,
    pub name: String,
    /// `owner/name`
    pub full_name: String,
    pub default_branch: String,
}

impl Repository {
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        default_branch: impl Into<String>,
    ) -> Self {
        let owner = owner.into();
        let name = name.into();
        Self {
            full_name: format!("{}/{}", owner, name),
            owner,
            name,
            default_branch: default_branch.into(),
        }
    }
}

/// Kind of a tree entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Blob,
    Tree,
    /// Submodule reference
    Commit,
}

/// One entry of a repository tree listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub sha: String,
}

impl TreeEntry {
    pub fn is_blob(&self) -> bool {
        self.kind == EntryKind::Blob
    }
}

/// A file write on a branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentUpdate {
    pub path: String,
    pub content: Vec<u8>,
    /// Sha of the blob being replaced, required when the file exists
    pub blob_sha: Option<String>,
    pub branch: String,
    /// Commit message
    pub message: String,
}

/// Remote operations the assistant needs from a hosting service.
///
/// Implementations handle the specifics of each service; the orchestrator
/// only sees repositories, trees and file contents.
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Look up a repository by owner and name
    async fn repository(&self, owner: &str, name: &str) -> Result<Repository>;

    /// Sha of the head commit of the default branch
    async fn tip_sha(&self, repo: &Repository) -> Result<String>;

    /// Root-level entries of the tree at `sha`
    async fn fetch_tree(&self, repo: &Repository, sha: &str) -> Result<Vec<TreeEntry>>;

    /// Raw content of a file on the default branch
    async fn fetch_content(&self, repo: &Repository, path: &str) -> Result<Vec<u8>>;

    /// Fork `repo` into the authenticated account, returning the fork
    async fn fork(&self, repo: &Repository) -> Result<Repository>;

    /// Create branch `name` pointing at `base_sha`
    async fn create_branch(&self, repo: &Repository, name: &str, base_sha: &str) -> Result<()>;

    /// Write one file as a new commit on `update.branch`
    async fn put_content(&self, repo: &Repository, update: &ContentUpdate) -> Result<()>;

    /// Browser URL comparing `head` against `base`
    async fn compare_url(&self, repo: &Repository, base: &str, head: &str) -> Result<String>;
}

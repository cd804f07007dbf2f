//! In-memory [`RepositoryHost`] for tests and offline runs

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::host::{ContentUpdate, EntryKind, Repository, RepositoryHost, TreeEntry};
use crate::{Error, Result};

/// Git-style object id: SHA-256 over `blob <len>\0<content>`
fn content_sha(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("blob {}\0", content.len()).as_bytes());
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone, Default)]
struct Branch {
    head: String,
    files: BTreeMap<String, Vec<u8>>,
}

#[derive(Debug, Clone)]
struct StoredRepo {
    repo: Repository,
    branches: BTreeMap<String, Branch>,
}

impl StoredRepo {
    fn branch(&self, name: &str) -> Result<&Branch> {
        self.branches
            .get(name)
            .ok_or_else(|| Error::NotFound(format!("{}@{}", self.repo.full_name, name)))
    }
}

/// A file written through [`RepositoryHost::put_content`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    pub repository: String,
    pub update: ContentUpdate,
}

#[derive(Debug, Default)]
struct State {
    repos: BTreeMap<String, StoredRepo>,
    writes: Vec<RecordedWrite>,
    commits: u64,
}

impl State {
    fn stored(&self, full_name: &str) -> Result<&StoredRepo> {
        self.repos
            .get(full_name)
            .ok_or_else(|| Error::NotFound(full_name.to_string()))
    }

    fn stored_mut(&mut self, full_name: &str) -> Result<&mut StoredRepo> {
        self.repos
            .get_mut(full_name)
            .ok_or_else(|| Error::NotFound(full_name.to_string()))
    }

    fn next_commit(&mut self) -> String {
        self.commits += 1;
        format!("{:040x}", self.commits)
    }
}

/// Repository host that keeps every repository in memory.
///
/// Each branch holds a flat map of file paths to contents. Commits are
/// numbered sequentially; blob shas are content hashes.
#[derive(Debug)]
pub struct MemoryHost {
    fork_owner: String,
    state: Mutex<State>,
}

impl MemoryHost {
    /// Create an empty host whose forks land under `fork_owner`
    pub fn new(fork_owner: impl Into<String>) -> Self {
        Self {
            fork_owner: fork_owner.into(),
            state: Mutex::new(State::default()),
        }
    }

    /// Add a repository with a single `main` branch holding `files`
    pub fn with_repository<P, C>(
        mut self,
        owner: &str,
        name: &str,
        files: impl IntoIterator<Item = (P, C)>,
    ) -> Self
    where
        P: Into<String>,
        C: Into<Vec<u8>>,
    {
        {
            let state = self.state.get_mut();
            let head = state.next_commit();
            let branch = Branch {
                head,
                files: files
                    .into_iter()
                    .map(|(path, content)| (path.into(), content.into()))
                    .collect(),
            };
            let repo = Repository::new(owner, name, "main");
            state.repos.insert(
                repo.full_name.clone(),
                StoredRepo {
                    repo,
                    branches: BTreeMap::from([("main".to_string(), branch)]),
                },
            );
        }
        self
    }

    /// Every write performed so far, in order
    pub async fn writes(&self) -> Vec<RecordedWrite> {
        self.state.lock().await.writes.clone()
    }

    /// Full names of all known repositories, forks included
    pub async fn repositories(&self) -> Vec<String> {
        self.state.lock().await.repos.keys().cloned().collect()
    }

    /// Branch names of a repository
    pub async fn branches(&self, full_name: &str) -> Vec<String> {
        self.state
            .lock()
            .await
            .repos
            .get(full_name)
            .map(|stored| stored.branches.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Content of a file on a given branch
    pub async fn file(&self, full_name: &str, branch: &str, path: &str) -> Option<Vec<u8>> {
        self.state
            .lock()
            .await
            .repos
            .get(full_name)?
            .branches
            .get(branch)?
            .files
            .get(path)
            .cloned()
    }
}

#[async_trait]
impl RepositoryHost for MemoryHost {
    async fn repository(&self, owner: &str, name: &str) -> Result<Repository> {
        let state = self.state.lock().await;
        Ok(state.stored(&format!("{owner}/{name}"))?.repo.clone())
    }

    async fn tip_sha(&self, repo: &Repository) -> Result<String> {
        let state = self.state.lock().await;
        let stored = state.stored(&repo.full_name)?;
        Ok(stored.branch(&stored.repo.default_branch)?.head.clone())
    }

    async fn fetch_tree(&self, repo: &Repository, sha: &str) -> Result<Vec<TreeEntry>> {
        let state = self.state.lock().await;
        let stored = state.stored(&repo.full_name)?;
        let branch = stored
            .branches
            .values()
            .find(|branch| branch.head == sha)
            .ok_or_else(|| Error::NotFound(format!("{}@{}", repo.full_name, sha)))?;

        let mut entries = Vec::new();
        let mut directories = BTreeSet::new();
        for (path, content) in &branch.files {
            match path.split_once('/') {
                Some((directory, _)) => {
                    directories.insert(directory.to_string());
                }
                None => entries.push(TreeEntry {
                    path: path.clone(),
                    kind: EntryKind::Blob,
                    sha: content_sha(content),
                }),
            }
        }
        entries.extend(directories.into_iter().map(|directory| TreeEntry {
            sha: content_sha(directory.as_bytes()),
            path: directory,
            kind: EntryKind::Tree,
        }));
        Ok(entries)
    }

    async fn fetch_content(&self, repo: &Repository, path: &str) -> Result<Vec<u8>> {
        let state = self.state.lock().await;
        let stored = state.stored(&repo.full_name)?;
        stored
            .branch(&stored.repo.default_branch)?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("{}:{}", repo.full_name, path)))
    }

    async fn fork(&self, repo: &Repository) -> Result<Repository> {
        let mut state = self.state.lock().await;
        let source = state.stored(&repo.full_name)?.clone();
        let fork = Repository::new(&self.fork_owner, &source.repo.name, &source.repo.default_branch);

        // Forking twice returns the existing fork
        state
            .repos
            .entry(fork.full_name.clone())
            .or_insert(StoredRepo {
                repo: fork.clone(),
                branches: source.branches,
            });
        Ok(fork)
    }

    async fn create_branch(&self, repo: &Repository, name: &str, base_sha: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        let stored = state.stored_mut(&repo.full_name)?;
        if stored.branches.contains_key(name) {
            return Err(Error::BranchExists {
                branch: name.to_string(),
            });
        }

        let base = stored
            .branches
            .values()
            .find(|branch| branch.head == base_sha)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("{}@{}", repo.full_name, base_sha)))?;
        stored.branches.insert(name.to_string(), base);
        Ok(())
    }

    async fn put_content(&self, repo: &Repository, update: &ContentUpdate) -> Result<()> {
        let mut state = self.state.lock().await;
        let head = state.next_commit();
        let stored = state.stored_mut(&repo.full_name)?;
        let branch = stored
            .branches
            .get_mut(&update.branch)
            .ok_or_else(|| Error::NotFound(format!("{}@{}", repo.full_name, update.branch)))?;

        let current = branch.files.get(&update.path).map(|c| content_sha(c));
        if current.is_some() && current != update.blob_sha {
            return Err(Error::Status {
                status: 409,
                url: format!("{}:{}", repo.full_name, update.path),
            });
        }

        branch.files.insert(update.path.clone(), update.content.clone());
        branch.head = head;
        state.writes.push(RecordedWrite {
            repository: repo.full_name.clone(),
            update: update.clone(),
        });
        Ok(())
    }

    async fn compare_url(&self, repo: &Repository, base: &str, head: &str) -> Result<String> {
        let state = self.state.lock().await;
        state.stored(&repo.full_name)?;
        Ok(format!("memory://{}/compare/{}...{}", repo.full_name, base, head))
    }
}

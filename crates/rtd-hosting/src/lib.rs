//! Repository hosting for the Read the Docs assistant.
//!
//! The [`RepositoryHost`] trait covers the handful of remote operations the
//! assistant performs: reading a repository's root tree and config file,
//! forking, branching and committing a single file. [`GitHubHost`] talks to
//! the GitHub REST API; [`MemoryHost`] keeps everything in memory.

pub mod error;
pub mod github;
pub mod host;
pub mod memory;

pub use error::{Error, Result};
pub use github::{DEFAULT_API_URL, GitHubHost};
pub use host::{ContentUpdate, EntryKind, Repository, RepositoryHost, TreeEntry};
pub use memory::{MemoryHost, RecordedWrite};

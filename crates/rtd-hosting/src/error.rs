//! Error types for rtd-hosting

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { status: u16, url: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to decode content of {path}: {message}")]
    Decode { path: String, message: String },

    #[error("Branch already exists: {branch}")]
    BranchExists { branch: String },
}

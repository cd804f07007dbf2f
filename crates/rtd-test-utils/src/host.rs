//! Pre-seeded [`MemoryHost`] instances.

use rtd_hosting::MemoryHost;

/// Owner of the upstream test repository
pub const OWNER: &str = "jupyterlite";

/// Name of the upstream test repository
pub const REPO: &str = "jupyterlite";

/// Account forks are created under
pub const FORK_OWNER: &str = "readthedocs-assistant";

/// Host holding `jupyterlite/jupyterlite` with a config at `config_path`
/// plus some unrelated files.
pub fn host_with_config(config_path: &str, config: &str) -> MemoryHost {
    host_with_files(vec![
        (config_path.to_string(), config.to_string()),
        ("README.md".to_string(), "# jupyterlite\n".to_string()),
        ("docs/conf.py".to_string(), "project = 'jupyterlite'\n".to_string()),
    ])
}

/// Host holding `jupyterlite/jupyterlite` with exactly `files`
pub fn host_with_files(files: Vec<(String, String)>) -> MemoryHost {
    MemoryHost::new(FORK_OWNER).with_repository(OWNER, REPO, files)
}

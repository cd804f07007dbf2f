//! Locate the Read the Docs configuration file in a repository tree

use std::sync::LazyLock;

use regex::Regex;
use rtd_hosting::TreeEntry;

use crate::{Error, Result};

/// File names Read the Docs itself accepts as a configuration file
pub const CONFIG_FILENAME_PATTERN: &str = r"^\.?readthedocs.ya?ml$";

static CONFIG_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(CONFIG_FILENAME_PATTERN).expect("Invalid config filename regex")
});

/// Check whether a root-level file name is a configuration file
pub fn is_config_filename(name: &str) -> bool {
    CONFIG_FILENAME.is_match(name)
}

/// Pick the single configuration file among the root entries of a tree.
///
/// Only blobs count; directories and submodules named like a config file
/// are skipped.
pub fn find_config<'a>(repository: &str, entries: &'a [TreeEntry]) -> Result<&'a TreeEntry> {
    let candidates: Vec<&TreeEntry> = entries
        .iter()
        .filter(|entry| entry.is_blob() && is_config_filename(&entry.path))
        .collect();

    match candidates.as_slice() {
        [] => Err(Error::ConfigNotFound {
            repository: repository.to_string(),
        }),
        [single] => Ok(*single),
        _ => Err(Error::AmbiguousConfig {
            repository: repository.to_string(),
            candidates: candidates.iter().map(|entry| entry.path.clone()).collect(),
        }),
    }
}

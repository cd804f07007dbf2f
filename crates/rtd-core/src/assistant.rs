//! End-to-end migration of a hosted repository's configuration.
//!
//! The pipeline is strictly sequential: locate the repository and its
//! config file, validate, run the requested migrators, compare, and then
//! either preview the change or publish it on a fork.

use rtd_content::{Document, unified_text_diff};
use rtd_hosting::{ContentUpdate, Repository, RepositoryHost, TreeEntry};
use rtd_migrate::{MigratorRegistry, apply_migrators};
use tracing::{debug, info};

use crate::config::{DEFAULT_BRANCH, DEFAULT_MESSAGE, MigrationSection};
use crate::discovery::find_config;
use crate::validation::{SchemaValidator, load_and_validate};
use crate::{Error, Result};

/// What a migration run concluded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No migrator considered itself relevant
    NotApplied,
    /// At least one migrator ran but the document is unchanged
    Unchanged,
    /// The document changed and must be published
    Changed { rendered: String },
}

impl Outcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, Outcome::Changed { .. })
    }
}

/// Decide what a run of migrators amounts to
pub fn classify(original: &Document, migrated: &Document, applied: &[bool]) -> Result<Outcome> {
    if !applied.iter().any(|applied| *applied) {
        info!("No migration was applied, nothing else to do");
        return Ok(Outcome::NotApplied);
    }

    if original == migrated {
        info!("Migrations applied but configuration did not change, nothing else to do");
        return Ok(Outcome::Unchanged);
    }

    info!("Configuration changed, an update is required");
    Ok(Outcome::Changed {
        rendered: migrated.to_yaml()?,
    })
}

/// Dotted paths of every key that differs between the two documents
pub fn changed_paths(original: &Document, migrated: &Document) -> Vec<String> {
    original
        .diff(migrated)
        .paths()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Resolve `names` against `registry` and run them in order over `document`
pub async fn run_migrators<S: AsRef<str>>(
    registry: &MigratorRegistry,
    document: &Document,
    names: &[S],
) -> Result<(Document, Vec<bool>)> {
    let migrators = registry.resolve_all(names)?;
    Ok(apply_migrators(document, &migrators).await?)
}

/// Parameters of a single repository migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRequest {
    pub owner: String,
    pub repository: String,
    /// Migrator names, applied in order
    pub migrators: Vec<String>,
    /// Preview only, never write to the host
    pub dry_run: bool,
    /// Reject configurations that do not match the schema
    pub strict: bool,
    /// Branch created on the fork
    pub branch: String,
    /// Commit message
    pub message: String,
}

impl MigrationRequest {
    /// Dry-run request with the default branch and message
    pub fn new(
        owner: impl Into<String>,
        repository: impl Into<String>,
        migrators: Vec<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repository: repository.into(),
            migrators,
            dry_run: true,
            strict: true,
            branch: DEFAULT_BRANCH.to_string(),
            message: DEFAULT_MESSAGE.to_string(),
        }
    }

    /// Take branch, message and dry-run mode from settings
    pub fn with_settings(mut self, settings: &MigrationSection) -> Self {
        self.branch = settings.branch.clone();
        self.message = settings.message.clone();
        self.dry_run = settings.dry_run;
        self
    }

    pub fn publish(mut self, publish: bool) -> Self {
        self.dry_run = !publish;
        self
    }
}

/// Where a published change landed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    /// Full name of the fork
    pub fork: String,
    pub branch: String,
    pub compare_url: String,
}

/// Result of [`Assistant::migrate_config`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Full name of the upstream repository
    pub repository: String,
    pub config_path: String,
    /// Applied flag of each migrator, in request order
    pub applied: Vec<bool>,
    pub outcome: Outcome,
    /// Dotted paths of the keys that changed, e.g. `build` or `python.version`
    pub changes: Vec<String>,
    /// Unified diff of the config file, present when it changed
    pub diff: Option<String>,
    /// Set when the change was written to a fork
    pub published: Option<Publication>,
}

/// Runs configuration migrations against a repository host
pub struct Assistant<'a> {
    host: &'a dyn RepositoryHost,
    registry: &'a MigratorRegistry,
    validator: &'a dyn SchemaValidator,
}

impl<'a> Assistant<'a> {
    pub fn new(
        host: &'a dyn RepositoryHost,
        registry: &'a MigratorRegistry,
        validator: &'a dyn SchemaValidator,
    ) -> Self {
        Self {
            host,
            registry,
            validator,
        }
    }

    /// Migrate the configuration of one repository.
    ///
    /// Migrator names are resolved before anything is fetched, so a typo
    /// fails without touching the network.
    pub async fn migrate_config(&self, request: &MigrationRequest) -> Result<MigrationReport> {
        let migrators = self.registry.resolve_all(&request.migrators)?;

        let upstream = self
            .host
            .repository(&request.owner, &request.repository)
            .await?;
        info!(repository = %upstream.full_name, "Analyzing repository");

        let tip_sha = self.host.tip_sha(&upstream).await?;
        let tree = self.host.fetch_tree(&upstream, &tip_sha).await?;
        let config_item = find_config(&upstream.full_name, &tree)?;
        debug!(path = %config_item.path, sha = %config_item.sha, "Found configuration file");

        let raw = self.host.fetch_content(&upstream, &config_item.path).await?;
        let source = String::from_utf8(raw).map_err(|_| Error::Encoding {
            path: config_item.path.clone(),
        })?;
        let config = load_and_validate(&source, self.validator, request.strict)?;
        debug!(config = ?config.document, "Current configuration");

        let (migrated, applied) = apply_migrators(&config.document, &migrators).await?;
        debug!(config = ?migrated, "New configuration");

        let outcome = classify(&config.document, &migrated, &applied)?;
        let mut report = MigrationReport {
            repository: upstream.full_name.clone(),
            config_path: config_item.path.clone(),
            applied,
            outcome,
            changes: Vec::new(),
            diff: None,
            published: None,
        };

        if let Outcome::Changed { rendered } = &report.outcome {
            report.changes = changed_paths(&config.document, &migrated);
            debug!(changes = ?report.changes, "Changed keys");
            report.diff = Some(unified_text_diff(
                &source,
                rendered,
                &format!("a/{}", config_item.path),
                &format!("b/{}", config_item.path),
            ));

            if request.dry_run {
                info!("Dry run, not publishing");
            } else {
                report.published = Some(
                    self.fork_and_update(&upstream, config_item, rendered, &tip_sha, request)
                        .await?,
                );
            }
        }

        Ok(report)
    }

    /// Write `rendered` to a new branch on a fork of `upstream`
    async fn fork_and_update(
        &self,
        upstream: &Repository,
        config_item: &TreeEntry,
        rendered: &str,
        tip_sha: &str,
        request: &MigrationRequest,
    ) -> Result<Publication> {
        let fork = self.host.fork(upstream).await?;
        info!(fork = %fork.full_name, "Fork ready");

        self.host
            .create_branch(&fork, &request.branch, tip_sha)
            .await?;
        info!(branch = %request.branch, "Branch created");

        self.host
            .put_content(
                &fork,
                &ContentUpdate {
                    path: config_item.path.clone(),
                    content: rendered.as_bytes().to_vec(),
                    blob_sha: Some(config_item.sha.clone()),
                    branch: request.branch.clone(),
                    message: request.message.clone(),
                },
            )
            .await?;
        info!(path = %config_item.path, "Configuration updated");

        let compare_url = self
            .host
            .compare_url(&fork, &fork.default_branch, &request.branch)
            .await?;
        info!(url = %compare_url, "Browse the URL to see the changes");

        Ok(Publication {
            fork: fork.full_name,
            branch: request.branch.clone(),
            compare_url,
        })
    }
}

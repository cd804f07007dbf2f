//! Migrate the configuration of a hosted repository

use colored::Colorize;
use rtd_core::{
    AcceptAll, Assistant, AssistantConfig, JsonSchemaValidator, MigrationRequest, SchemaValidator,
};
use rtd_hosting::GitHubHost;
use rtd_migrate::MigratorRegistry;

use crate::cli::MigrateConfigArgs;
use crate::commands::{describe, print_changes, print_diff};
use crate::error::{CliError, Result};

/// User agent sent to GitHub when no user name is configured
const DEFAULT_USER_AGENT: &str = "readthedocs-assistant";

/// Run the migrate-config command
pub async fn run_migrate_config(args: MigrateConfigArgs) -> Result<()> {
    let settings = AssistantConfig::load_or_default(args.config.as_deref())?;
    let registry = MigratorRegistry::with_builtins()?;

    let mut request = MigrationRequest::new(&args.owner, &args.repository, args.migrators.clone())
        .with_settings(&settings.migration);
    if args.publish {
        request = request.publish(true);
    }
    if let Some(branch) = &args.branch {
        request.branch = branch.clone();
    }
    if let Some(message) = &args.message {
        request.message = message.clone();
    }
    request.strict = !args.lenient;

    if !request.dry_run && args.token.is_none() {
        return Err(CliError::user(
            "Publishing requires a GitHub token (--token or GH_TOKEN)",
        ));
    }

    // Fail on typos before any network access
    registry.resolve_all(&request.migrators)?;

    let validator: Box<dyn SchemaValidator> = if args.skip_validation {
        Box::new(AcceptAll)
    } else {
        let url = args
            .schema_url
            .as_deref()
            .unwrap_or(&settings.migration.schema_url);
        Box::new(JsonSchemaValidator::fetch(url).await?)
    };

    let user_agent = args.username.as_deref().unwrap_or(DEFAULT_USER_AGENT);
    let host = GitHubHost::new(&settings.github.api_url, user_agent, args.token.clone())?;

    let report = Assistant::new(&host, &registry, validator.as_ref())
        .migrate_config(&request)
        .await?;

    println!(
        "{} {} ({})",
        report.repository.bold(),
        report.config_path,
        describe(&report.outcome)
    );
    print_changes(&report.changes);
    if let Some(diff) = &report.diff {
        print_diff(diff);
    }
    match &report.published {
        Some(publication) => println!(
            "{} {} on {}, compare at {}",
            "Published".green().bold(),
            publication.branch,
            publication.fork,
            publication.compare_url.cyan()
        ),
        None if report.outcome.is_changed() => {
            println!("Dry run, re-run with {} to publish", "--publish".cyan())
        }
        None => {}
    }

    Ok(())
}

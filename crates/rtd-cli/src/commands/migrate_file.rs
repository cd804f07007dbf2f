//! Migrate a configuration file on disk

use std::fs;

use colored::Colorize;
use rtd_content::unified_text_diff;
use rtd_core::{AcceptAll, Outcome, changed_paths, classify, load_and_validate, run_migrators};
use rtd_migrate::MigratorRegistry;
use tracing::info;

use crate::cli::MigrateFileArgs;
use crate::commands::{describe, print_changes, print_diff};
use crate::error::{CliError, Result};

/// Run the migrate-file command
pub async fn run_migrate_file(args: MigrateFileArgs) -> Result<()> {
    let registry = MigratorRegistry::with_builtins()?;
    let source = fs::read_to_string(&args.path).map_err(|e| CliError::io(&args.path, e))?;

    let config = load_and_validate(&source, &AcceptAll, false)?;
    let (migrated, applied) = run_migrators(&registry, &config.document, &args.migrators).await?;
    let outcome = classify(&config.document, &migrated, &applied)?;

    println!("{}", describe(&outcome));

    if let Outcome::Changed { rendered } = outcome {
        print_changes(&changed_paths(&config.document, &migrated));
        if args.write {
            fs::write(&args.path, &rendered).map_err(|e| CliError::io(&args.path, e))?;
            info!(path = %args.path.display(), "Configuration written");
            println!("{} {}", "Updated".green().bold(), args.path.display());
        } else {
            let name = args.path.display().to_string();
            print_diff(&unified_text_diff(
                &source,
                &rendered,
                &format!("a/{name}"),
                &format!("b/{name}"),
            ));
        }
    }

    Ok(())
}

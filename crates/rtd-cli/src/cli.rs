//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Read the Docs assistant - Migrate Read the Docs configuration files
#[derive(Parser, Debug)]
#[command(name = "rtd-assistant")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Migrate the configuration of a GitHub repository
    ///
    /// Runs a dry run by default and prints the resulting diff. With
    /// --publish the new configuration is committed to a branch on a fork.
    ///
    /// Examples:
    ///   rtd-assistant migrate-config jupyterlite jupyterlite -m use-build-tools
    ///   rtd-assistant migrate-config owner repo -m use-build-tools --publish
    MigrateConfig(MigrateConfigArgs),

    /// Migrate a local configuration file
    MigrateFile(MigrateFileArgs),

    /// List available migrators
    ListMigrators,
}

/// Arguments of `migrate-config`
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct MigrateConfigArgs {
    /// Repository owner
    pub owner: String,

    /// Repository name
    pub repository: String,

    /// Migrators to apply, in order
    #[arg(short, long = "migrator", required = true)]
    pub migrators: Vec<String>,

    /// Commit the change to a fork instead of previewing it
    #[arg(long)]
    pub publish: bool,

    /// Branch to create on the fork
    #[arg(long)]
    pub branch: Option<String>,

    /// Commit message
    #[arg(long)]
    pub message: Option<String>,

    /// URL of the configuration schema
    #[arg(long)]
    pub schema_url: Option<String>,

    /// Do not validate the configuration against the schema
    #[arg(long)]
    pub skip_validation: bool,

    /// Warn about schema violations instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// Settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// GitHub user name
    #[arg(long, env = "GH_USERNAME")]
    pub username: Option<String>,

    /// GitHub token
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// Arguments of `migrate-file`
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct MigrateFileArgs {
    /// Configuration file to migrate
    pub path: PathBuf,

    /// Migrators to apply, in order
    #[arg(short, long = "migrator", required = true)]
    pub migrators: Vec<String>,

    /// Overwrite the file instead of printing a diff
    #[arg(long)]
    pub write: bool,
}

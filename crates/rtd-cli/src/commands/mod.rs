//! Command implementations for rtd-cli

pub mod list_migrators;
pub mod migrate_config;
pub mod migrate_file;

pub use list_migrators::run_list_migrators;
pub use migrate_config::run_migrate_config;
pub use migrate_file::run_migrate_file;

use colored::Colorize;
use rtd_core::Outcome;

/// Print a unified diff, colouring added and removed lines
fn print_diff(diff: &str) {
    for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else {
            println!("{line}");
        }
    }
}

/// Print the dotted paths of the keys a migration touched
fn print_changes(changes: &[String]) {
    if !changes.is_empty() {
        println!("{} {}", "Changed keys:".bold(), changes.join(", "));
    }
}

/// One-line description of an outcome
fn describe(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::NotApplied => "No migration was applied, nothing to do",
        Outcome::Unchanged => "Migrations applied but the configuration did not change",
        Outcome::Changed { .. } => "Configuration changed",
    }
}

//! List available migrators

use colored::Colorize;
use rtd_migrate::MigratorRegistry;

use crate::error::Result;

/// Run the list-migrators command
pub fn run_list_migrators() -> Result<()> {
    let registry = MigratorRegistry::with_builtins()?;

    println!("{}", "Available Migrators".bold());
    println!();
    for name in registry.names() {
        let migrator = registry.resolve(&name)?;
        println!("  {:<20} {}", name.green(), migrator.description());
    }
    println!();
    println!("{} migrator(s) available", registry.len());

    Ok(())
}

//! `mcloader list` command implementation

use crate::registry::ModpackRegistry;
use clap::Args;

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Only display modpack ids
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `list` command
pub async fn execute(args: ListArgs, registry: &ModpackRegistry) -> anyhow::Result<()> {
    if registry.is_empty() {
        println!("No modpacks available");
        return Ok(());
    }

    if args.quiet {
        for modpack in registry.iter() {
            println!("{}", modpack.short_id);
        }
        return Ok(());
    }

    println!("Available modpacks:");
    for modpack in registry.iter() {
        println!("  {} ({})", modpack.display_name, modpack.short_id);
    }

    Ok(())
}

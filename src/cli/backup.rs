//! `mcloader backup` command implementation

use crate::docker::DockerCli;
use crate::registry::ModpackRegistry;
use crate::state::StateResolver;
use crate::workflow::Workflow;
use clap::Args;

/// Arguments for the `backup` command
#[derive(Args)]
pub struct BackupArgs {
    /// Suppress the backup tool's own output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `backup` command
pub async fn execute(
    args: BackupArgs,
    registry: &ModpackRegistry,
    docker: &DockerCli,
) -> anyhow::Result<()> {
    let resolver = StateResolver::new(docker);
    if let Some(active) = resolver.active_modpack().await? {
        let name = registry.describe(&active).unwrap_or(&active);
        println!("Backing up {}...", name);
    }

    let output = Workflow::new(docker, registry).backup().await?;
    if !args.quiet && !output.trim().is_empty() {
        println!("{}", output.trim_end());
    }

    println!("Backup complete");
    Ok(())
}

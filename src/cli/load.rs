//! `mcloader load` command implementation

use crate::docker::DockerCli;
use crate::registry::ModpackRegistry;
use crate::workflow::Workflow;
use clap::Args;

/// Arguments for the `load` command
#[derive(Args)]
pub struct LoadArgs {
    /// Modpack to load, by short or canonical id
    pub modpack: String,
}

/// Execute the `load` command
pub async fn execute(
    args: LoadArgs,
    registry: &ModpackRegistry,
    docker: &DockerCli,
) -> anyhow::Result<()> {
    let report = Workflow::new(docker, registry)
        .switch_to(&args.modpack)
        .await?;

    if let Some(old) = &report.stopped {
        let old_name = registry.describe(old).unwrap_or(old);
        if report.backed_up {
            println!("Backed up {}", old_name);
        }
        println!("Shut down {}", old_name);
    }

    let new_name = registry
        .describe(&report.started)
        .unwrap_or(&report.started);
    println!(
        "Active modpack is now {}. It may take a few minutes before the server is fully available.",
        new_name
    );

    Ok(())
}

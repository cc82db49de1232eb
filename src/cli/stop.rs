//! `mcloader stop` command implementation

use crate::docker::DockerCli;
use crate::registry::ModpackRegistry;
use crate::workflow::Workflow;
use clap::Args;

/// Arguments for the `stop` command
#[derive(Args)]
pub struct StopArgs {}

/// Execute the `stop` command
pub async fn execute(
    _args: StopArgs,
    registry: &ModpackRegistry,
    docker: &DockerCli,
) -> anyhow::Result<()> {
    let stopped = Workflow::new(docker, registry).stop().await?;
    let name = registry.describe(&stopped).unwrap_or(&stopped);
    println!("Shut down {}", name);
    Ok(())
}

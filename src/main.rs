//! mcloader CLI entry point
//!
//! A modpack lifecycle manager for containerized Minecraft servers.

use clap::Parser;
use mcloader::cli::{Cli, Commands};
use mcloader::docker::DockerCli;
use mcloader::registry::ModpackRegistry;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let registry = ModpackRegistry::scan(&cli.modpacks_dir)?;
    let docker = DockerCli::new();

    match cli.command {
        Commands::Load(args) => mcloader::cli::load::execute(args, &registry, &docker).await,
        Commands::Backup(args) => mcloader::cli::backup::execute(args, &registry, &docker).await,
        Commands::Status(args) => mcloader::cli::status::execute(args, &registry, &docker).await,
        Commands::Stop(args) => mcloader::cli::stop::execute(args, &registry, &docker).await,
        Commands::Logs(args) => mcloader::cli::logs::execute(args, &docker).await,
        Commands::List(args) => mcloader::cli::list::execute(args, &registry).await,
    }
}

//! CLI command definitions and handlers

pub mod backup;
pub mod list;
pub mod load;
pub mod logs;
pub mod status;
pub mod stop;

use crate::DEFAULT_MODPACKS_DIR;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// mcloader - Manage containerized Minecraft modpack servers
#[derive(Parser)]
#[command(name = "mcloader")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding one subdirectory per modpack
    #[arg(long, global = true, default_value = DEFAULT_MODPACKS_DIR)]
    pub modpacks_dir: PathBuf,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Back up and shut down the current modpack, and load a new one
    Load(load::LoadArgs),

    /// Back up the currently running modpack
    Backup(backup::BackupArgs),

    /// Show the status of the currently running modpack
    Status(status::StatusArgs),

    /// Stop the currently running modpack
    Stop(stop::StopArgs),

    /// Show the log tail for the server or backup service
    Logs(logs::LogsArgs),

    /// List the available modpacks
    List(list::ListArgs),
}

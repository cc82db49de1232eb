//! mcloader - A modpack lifecycle manager for containerized Minecraft servers
//!
//! This crate orchestrates a single host's Minecraft modpack deployments by
//! driving the `docker` CLI: switching between compose-managed modpacks,
//! triggering backups, reporting live server status, and tailing logs.

pub mod cli;
pub mod docker;
pub mod registry;
pub mod state;
pub mod workflow;

use thiserror::Error;

/// Main error type for mcloader operations
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Unknown modpack: {0}")]
    UnknownModpack(String),

    #[error("Modpack is already running: {0}")]
    ModpackAlreadyActive(String),

    #[error("No modpack is currently active")]
    NoActiveModpack,

    #[error("Server is paused: {0}")]
    ServerPaused(String),

    #[error("Log tail of {0} lines is too large (maximum is {MAX_LOG_TAIL})")]
    TailTooLarge(u32),

    #[error("Command `{command}` exited with status {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Process spawn error: {0}")]
    Spawn(String),

    #[error("Unexpected command output: {0}")]
    UnexpectedOutput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LoaderError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "mcloader";

/// Default root directory holding one subdirectory per modpack
pub const DEFAULT_MODPACKS_DIR: &str = "/opt/minecraft/modpacks";

/// Largest log tail a single `logs` request may ask for
pub const MAX_LOG_TAIL: u32 = 2000;

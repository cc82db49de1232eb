//! Docker CLI collaborator
//!
//! Every container operation goes through the host's `docker` binary; this
//! module is the only place that spawns it. The trait exists so workflows can
//! be exercised against a recording mock in tests.

use crate::{LoaderError, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// The narrow contract this tool needs from a container runtime CLI.
///
/// Captured invocations return the child's stdout and fail on non-zero exit;
/// `logs_follow` instead inherits the terminal and blocks until interrupted.
#[async_trait::async_trait]
pub trait ContainerRuntime {
    /// Free-text listing of running containers (`docker ps`).
    async fn ps(&self) -> Result<String>;

    /// Execute a command inside a running container (`docker exec`).
    async fn exec(&self, container: &str, command: &[&str]) -> Result<String>;

    /// Bring a compose deployment up, detached (`docker compose up -d`).
    async fn compose_up(&self, compose_file: &Path) -> Result<String>;

    /// Tear a compose deployment down (`docker compose down`).
    async fn compose_down(&self, compose_file: &Path) -> Result<String>;

    /// Fetch the last `tail` log lines of a container.
    async fn logs(&self, container: &str, tail: u32) -> Result<String>;

    /// Stream a container's logs to the invoking terminal.
    async fn logs_follow(&self, container: &str, tail: u32) -> Result<()>;
}

/// `ContainerRuntime` implementation backed by the `docker` binary.
pub struct DockerCli;

impl DockerCli {
    pub fn new() -> Self {
        Self
    }

    /// Run `docker <args>`, capture stdout, and fail on non-zero exit.
    async fn run_captured(&self, args: &[&str]) -> Result<String> {
        tracing::debug!("docker {}", args.join(" "));

        let output = Command::new("docker")
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| LoaderError::Spawn(e.to_string()))?;

        if !output.status.success() {
            return Err(LoaderError::CommandFailed {
                command: format!("docker {}", args.join(" ")),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ContainerRuntime for DockerCli {
    async fn ps(&self) -> Result<String> {
        self.run_captured(&["ps"]).await
    }

    async fn exec(&self, container: &str, command: &[&str]) -> Result<String> {
        let mut args = vec!["exec", container];
        args.extend_from_slice(command);
        self.run_captured(&args).await
    }

    async fn compose_up(&self, compose_file: &Path) -> Result<String> {
        let file = compose_file.to_string_lossy();
        self.run_captured(&[
            "compose",
            "-f",
            file.as_ref(),
            "up",
            "-d",
            "--remove-orphans",
        ])
        .await
    }

    async fn compose_down(&self, compose_file: &Path) -> Result<String> {
        let file = compose_file.to_string_lossy();
        self.run_captured(&["compose", "-f", file.as_ref(), "down"])
            .await
    }

    async fn logs(&self, container: &str, tail: u32) -> Result<String> {
        let tail = tail.to_string();
        self.run_captured(&["logs", container, "-n", &tail]).await
    }

    async fn logs_follow(&self, container: &str, tail: u32) -> Result<()> {
        tracing::debug!("docker logs {} --tail {} --follow", container, tail);

        let status = Command::new("docker")
            .args(["logs", container, "--tail", &tail.to_string(), "--follow"])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| LoaderError::Spawn(e.to_string()))?;

        if !status.success() {
            return Err(LoaderError::CommandFailed {
                command: format!("docker logs {} --tail {} --follow", container, tail),
                code: status.code().unwrap_or(-1),
                stderr: String::new(),
            });
        }

        Ok(())
    }
}

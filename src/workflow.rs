//! Modpack lifecycle workflows
//!
//! Sequencing for switch, backup, and stop. Each step is a blocking docker
//! invocation; a failure aborts the workflow at that step with no rollback,
//! so a failed start after a successful stop leaves no modpack active.

use crate::docker::ContainerRuntime;
use crate::registry::ModpackRegistry;
use crate::state::StateResolver;
use crate::{LoaderError, Result};
use std::time::Duration;

/// Wall-clock wait after a compose up, giving the server process time to
/// come up before control returns. Not a health check.
pub const SETTLE_DELAY: Duration = Duration::from_secs(20);

/// Outcome of a completed modpack switch, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchReport {
    /// Whether an instant backup ran before the old modpack went down
    pub backed_up: bool,
    /// Canonical id of the modpack that was shut down, if one was active
    pub stopped: Option<String>,
    /// Canonical id of the modpack that is now active
    pub started: String,
}

/// Lifecycle sequencing over a container runtime and the modpack registry.
pub struct Workflow<'a, R: ContainerRuntime> {
    runtime: &'a R,
    registry: &'a ModpackRegistry,
    settle: Duration,
}

impl<'a, R: ContainerRuntime> Workflow<'a, R> {
    pub fn new(runtime: &'a R, registry: &'a ModpackRegistry) -> Self {
        Self {
            runtime,
            registry,
            settle: SETTLE_DELAY,
        }
    }

    /// Override the settle delay. Tests use a zero delay.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    fn resolver(&self) -> StateResolver<'a, R> {
        StateResolver::new(self.runtime)
    }

    /// Back up and shut down the active modpack, then bring up `target`.
    ///
    /// Rejected without issuing any container commands when `target` is
    /// already active or does not resolve to a known modpack.
    pub async fn switch_to(&self, target: &str) -> Result<SwitchReport> {
        let new_modpack = self
            .registry
            .resolve(target)
            .ok_or_else(|| LoaderError::UnknownModpack(target.to_string()))?;

        let active = self.resolver().active_modpack().await?;
        if active.as_deref() == Some(new_modpack.canonical_id.as_str()) {
            return Err(LoaderError::ModpackAlreadyActive(
                new_modpack.display_name.clone(),
            ));
        }

        let mut backed_up = false;
        if let Some(ref old_id) = active {
            if self.resolver().is_running().await? {
                tracing::info!("Backing up current modpack {}", old_id);
                self.instant_backup().await?;
                backed_up = true;
            }

            tracing::info!("Shutting down current modpack {}", old_id);
            let old_compose = self.compose_file_for(Some(old_id)).await?;
            self.runtime.compose_down(&old_compose).await?;
        }

        tracing::info!("Starting modpack {}", new_modpack.canonical_id);
        self.runtime.compose_up(&new_modpack.compose_file).await?;
        tokio::time::sleep(self.settle).await;

        Ok(SwitchReport {
            backed_up,
            stopped: active,
            started: new_modpack.canonical_id.clone(),
        })
    }

    /// Instant backup of whatever is running now. A missing backup sidecar
    /// is a no-op here, unlike the standalone [`Workflow::backup`].
    pub async fn instant_backup(&self) -> Result<Option<String>> {
        match self.resolver().backup_container().await? {
            Some(container) => {
                let output = self.runtime.exec(&container, &["backup", "now"]).await?;
                Ok(Some(output))
            }
            None => Ok(None),
        }
    }

    /// Standalone backup of the active modpack.
    ///
    /// A paused server blocks backups by policy; a missing backup sidecar
    /// is an error here.
    pub async fn backup(&self) -> Result<String> {
        if !self.resolver().is_running().await? {
            let active = self
                .resolver()
                .active_modpack()
                .await?
                .unwrap_or_else(|| "server".to_string());
            return Err(LoaderError::ServerPaused(active));
        }

        self.instant_backup().await?.ok_or_else(|| {
            LoaderError::ContainerNotFound("active backup container".to_string())
        })
    }

    /// Shut down the active modpack.
    pub async fn stop(&self) -> Result<String> {
        let active = self
            .resolver()
            .active_modpack()
            .await?
            .ok_or(LoaderError::NoActiveModpack)?;
        let compose = self.compose_file_for(Some(&active)).await?;
        self.runtime.compose_down(&compose).await?;
        Ok(active)
    }

    /// Compose file for the given canonical id, falling back to the active
    /// modpack's when none is given.
    pub async fn compose_file_for(
        &self,
        canonical_id: Option<&str>,
    ) -> Result<std::path::PathBuf> {
        let id = match canonical_id {
            Some(id) => id.to_string(),
            None => self
                .resolver()
                .active_modpack()
                .await?
                .ok_or(LoaderError::NoActiveModpack)?,
        };
        self.registry
            .compose_file(&id)
            .map(|p| p.to_path_buf())
            .ok_or(LoaderError::UnknownModpack(id))
    }
}

//! Running-state resolution
//!
//! Nothing about the active deployment is stored locally; everything is
//! re-derived per query by scraping `docker ps` output and rcon responses.
//! The text formats belong to third-party tools, so each brittle rule lives
//! in its own parsing function and must not be "improved": changing one
//! breaks compatibility with the live system.

use crate::docker::ContainerRuntime;
use crate::{LoaderError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Matches a game server container name, capturing the modpack id.
/// Backup containers end in `-backup` and never match.
fn server_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s([\w-]+)?-server").expect("server pattern is valid"))
}

/// Matches a backup sidecar container name.
fn backup_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s[\w-]+-backup").expect("backup pattern is valid"))
}

/// Canonical id of the active modpack, if a server container is listed.
pub fn active_modpack_in(ps_output: &str) -> Option<&str> {
    server_pattern()
        .captures(ps_output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Full name of the listed game server container. The pattern anchors on the
/// whitespace column separator, which is trimmed off before the name is used
/// as an argv token.
pub fn server_container_in(ps_output: &str) -> Option<&str> {
    server_pattern()
        .find(ps_output)
        .map(|m| m.as_str().trim_start())
}

/// Full name of the listed backup sidecar container.
pub fn backup_container_in(ps_output: &str) -> Option<&str> {
    backup_pattern()
        .find(ps_output)
        .map(|m| m.as_str().trim_start())
}

/// Player count from an rcon `list` response.
///
/// The response reads `There are N of a max of M players online: ...`; the
/// count is the third space-delimited field of the text before the first
/// `": "`. This wording is rcon-cli's, not ours.
pub fn parse_player_count(list_output: &str) -> Result<u32> {
    let head = list_output.split(": ").next().unwrap_or(list_output);
    head.split(' ')
        .nth(2)
        .and_then(|field| field.parse().ok())
        .ok_or_else(|| {
            LoaderError::UnexpectedOutput(format!("cannot parse player count from {:?}", head))
        })
}

/// Integer value from an rcon `time query` response: the last
/// space-delimited token of the first line (`The time is 5372` -> 5372).
pub fn parse_query_value(output: &str) -> Result<i64> {
    let first_line = output.lines().next().unwrap_or("");
    first_line
        .rsplit(' ')
        .next()
        .and_then(|field| field.parse().ok())
        .ok_or_else(|| {
            LoaderError::UnexpectedOutput(format!(
                "cannot parse time query value from {:?}",
                first_line
            ))
        })
}

/// Convert a daytime tick count to an in-game wall clock (hours, minutes).
/// Tick 0 is 08:00; a full day is 24000 ticks.
pub fn ingame_clock(daytime_ticks: i64) -> (u8, u8) {
    let hours = (daytime_ticks / 1000 + 8).rem_euclid(24) as u8;
    let minutes = ((daytime_ticks.rem_euclid(1000)) * 60 / 1000) as u8;
    (hours, minutes)
}

/// Derives the host's running state from the container runtime's live
/// listing. Every method issues a fresh `docker ps`; no result is cached.
pub struct StateResolver<'a, R: ContainerRuntime> {
    runtime: &'a R,
}

impl<'a, R: ContainerRuntime> StateResolver<'a, R> {
    pub fn new(runtime: &'a R) -> Self {
        Self { runtime }
    }

    /// Canonical id of the currently active modpack, if any.
    pub async fn active_modpack(&self) -> Result<Option<String>> {
        let ps = self.runtime.ps().await?;
        Ok(active_modpack_in(&ps).map(|s| s.to_string()))
    }

    /// Name of the active game server container, if any.
    pub async fn server_container(&self) -> Result<Option<String>> {
        let ps = self.runtime.ps().await?;
        Ok(server_container_in(&ps).map(|s| s.to_string()))
    }

    /// Name of the active backup sidecar container, if any.
    pub async fn backup_container(&self) -> Result<Option<String>> {
        let ps = self.runtime.ps().await?;
        Ok(backup_container_in(&ps).map(|s| s.to_string()))
    }

    /// Number of players currently online, via rcon `list` against the
    /// active server container.
    pub async fn player_count(&self) -> Result<u32> {
        let container = self
            .server_container()
            .await?
            .ok_or_else(|| LoaderError::ContainerNotFound("game server".to_string()))?;
        let list = self.runtime.exec(&container, &["rcon-cli", "list"]).await?;
        parse_player_count(&list)
    }

    /// Whether the server is running. Zero players online means the
    /// autopause sidecar has paused the world.
    pub async fn is_running(&self) -> Result<bool> {
        Ok(self.player_count().await? > 0)
    }
}

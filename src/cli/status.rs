//! `mcloader status` command implementation

use crate::docker::{ContainerRuntime, DockerCli};
use crate::registry::ModpackRegistry;
use crate::state::{self, StateResolver};
use crate::{LoaderError, Result};
use clap::Args;
use serde::Serialize;

/// Arguments for the `status` command
#[derive(Args)]
pub struct StatusArgs {
    /// Print machine-readable JSON instead of the status card
    #[arg(long)]
    pub json: bool,
}

/// Live status of the active server, gathered over rcon.
#[derive(Debug, Serialize)]
pub struct ServerStatus {
    pub modpack: Option<String>,
    pub display_name: Option<String>,
    pub running: bool,
    pub players_online: u32,
    pub players: Vec<String>,
    pub ingame_days: i64,
    pub ingame_time: String,
}

/// Execute the `status` command
pub async fn execute(
    args: StatusArgs,
    registry: &ModpackRegistry,
    docker: &DockerCli,
) -> anyhow::Result<()> {
    let status = gather(registry, docker).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let title = status
        .display_name
        .or(status.modpack)
        .unwrap_or_else(|| "Unknown modpack".to_string());
    println!("{}", title);
    println!();
    println!(
        "Current status:      {}",
        if status.running { "Running" } else { "Paused" }
    );
    println!("Ingame days passed:  {} days", status.ingame_days);
    println!("Current ingame time: {}", status.ingame_time);
    println!();
    if status.players.is_empty() {
        println!("{} players online", status.players_online);
    } else {
        println!("{} players online:", status.players_online);
        println!("{}", status.players.join(", "));
    }

    Ok(())
}

/// Query the active server container over rcon and assemble its status.
async fn gather<R: ContainerRuntime>(
    registry: &ModpackRegistry,
    runtime: &R,
) -> Result<ServerStatus> {
    let resolver = StateResolver::new(runtime);
    let container = resolver
        .server_container()
        .await?
        .ok_or_else(|| LoaderError::ContainerNotFound("game server".to_string()))?;

    let list = runtime.exec(&container, &["rcon-cli", "list"]).await?;
    let day_raw = runtime
        .exec(&container, &["rcon-cli", "time", "query", "day"])
        .await?;
    let daytime_raw = runtime
        .exec(&container, &["rcon-cli", "time", "query", "daytime"])
        .await?;

    let players_online = state::parse_player_count(&list)?;
    let players = player_names_in(&list);
    let ingame_days = state::parse_query_value(&day_raw)?;
    let (hours, minutes) = state::ingame_clock(state::parse_query_value(&daytime_raw)?);

    let ps = runtime.ps().await?;
    let modpack = state::active_modpack_in(&ps).map(|s| s.to_string());
    let display_name = modpack
        .as_deref()
        .and_then(|id| registry.describe(id))
        .map(|s| s.to_string());

    Ok(ServerStatus {
        modpack,
        display_name,
        running: players_online > 0,
        players_online,
        players,
        ingame_days,
        ingame_time: format!("{:02}:{:02}", hours, minutes),
    })
}

/// Names from an rcon `list` response: the first line's text after the
/// colon, comma-separated. Empty when nobody is online.
fn player_names_in(list_output: &str) -> Vec<String> {
    list_output
        .split_once(": ")
        .map(|(_, rest)| rest)
        .and_then(|rest| rest.lines().next())
        .map(|line| {
            line.split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_names_parsed_from_list() {
        let out = "There are 3 of a max of 20 players online: Alice, Bob, Carol\n";
        assert_eq!(player_names_in(out), vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_player_names_empty_server() {
        let out = "There are 0 of a max of 20 players online: \n";
        assert!(player_names_in(out).is_empty());
    }

    #[tokio::test]
    async fn test_gather_composes_rcon_queries() {
        use crate::docker::mock::MockRuntime;

        let registry = ModpackRegistry::from_entries([crate::registry::Modpack {
            short_id: "atm9".to_string(),
            canonical_id: "atm9".to_string(),
            display_name: "All The Mods 9".to_string(),
            compose_file: "/opt/minecraft/modpacks/atm9/docker-compose.yaml".into(),
        }])
        .unwrap();

        let runtime = MockRuntime::new();
        runtime.push_ps("1a2b  itzg/minecraft-server  \"/start\"  Up  atm9-server\n");
        runtime.on_exec(
            "rcon-cli list",
            "There are 2 of a max of 20 players online: Alice, Bob\n",
        );
        runtime.on_exec("rcon-cli time query day", "The time is 124\n");
        runtime.on_exec("rcon-cli time query daytime", "The time is 5372\n");

        let status = gather(&registry, &runtime).await.unwrap();
        assert_eq!(status.modpack.as_deref(), Some("atm9"));
        assert_eq!(status.display_name.as_deref(), Some("All The Mods 9"));
        assert!(status.running);
        assert_eq!(status.players_online, 2);
        assert_eq!(status.players, vec!["Alice", "Bob"]);
        assert_eq!(status.ingame_days, 124);
        assert_eq!(status.ingame_time, "13:22");
    }

    #[tokio::test]
    async fn test_gather_without_server_container() {
        use crate::docker::mock::MockRuntime;

        let registry = ModpackRegistry::from_entries(Vec::new()).unwrap();
        let runtime = MockRuntime::new();
        runtime.push_ps("CONTAINER ID   IMAGE   NAMES\n");

        let result = gather(&registry, &runtime).await;
        assert!(matches!(result, Err(LoaderError::ContainerNotFound(_))));
    }
}

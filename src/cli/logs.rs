//! `mcloader logs` command implementation

use crate::docker::{ContainerRuntime, DockerCli};
use crate::state::StateResolver;
use crate::{LoaderError, Result, MAX_LOG_TAIL};
use clap::{Args, ValueEnum};

/// Which deployed service to read logs from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Service {
    Server,
    Backup,
}

/// Arguments for the `logs` command
#[derive(Args)]
pub struct LogsArgs {
    /// Service whose logs to show
    #[arg(short, long, value_enum, default_value_t = Service::Server)]
    pub service: Service,

    /// Number of lines to show from the end of the logs
    #[arg(short = 'n', long, default_value_t = 100)]
    pub tail: u32,

    /// Follow log output
    #[arg(short, long)]
    pub follow: bool,
}

/// Execute the `logs` command
pub async fn execute(args: LogsArgs, docker: &DockerCli) -> anyhow::Result<()> {
    let output = run(args, docker).await?;
    if let Some(text) = output {
        print!("{}", text);
        if !text.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

/// Validate and issue the log request. Returns the captured tail, or `None`
/// in follow mode where output streams straight to the terminal.
async fn run<R: ContainerRuntime>(args: LogsArgs, runtime: &R) -> Result<Option<String>> {
    if args.tail > MAX_LOG_TAIL {
        return Err(LoaderError::TailTooLarge(args.tail));
    }

    let resolver = StateResolver::new(runtime);
    let container = match args.service {
        Service::Server => resolver.server_container().await?,
        Service::Backup => resolver.backup_container().await?,
    }
    .ok_or_else(|| {
        LoaderError::ContainerNotFound(format!("{:?} container", args.service).to_lowercase())
    })?;

    if args.follow {
        runtime.logs_follow(&container, args.tail).await?;
        Ok(None)
    } else {
        Ok(Some(runtime.logs(&container, args.tail).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docker::mock::{Call, MockRuntime};

    const PS: &str = "1a2b  itzg/minecraft-server  \"/start\"  Up  vanilla-server\n\
                      3c4d  itzg/mc-backup  \"/sh\"  Up  vanilla-backup\n";

    fn args(service: Service, tail: u32, follow: bool) -> LogsArgs {
        LogsArgs {
            service,
            tail,
            follow,
        }
    }

    #[tokio::test]
    async fn test_oversized_tail_rejected_before_any_command() {
        let runtime = MockRuntime::new();
        runtime.push_ps(PS);

        let result = run(args(Service::Server, 2001, false), &runtime).await;
        assert!(matches!(result, Err(LoaderError::TailTooLarge(2001))));
        assert!(runtime.calls().is_empty());
    }

    #[tokio::test]
    async fn test_maximum_tail_accepted() {
        let runtime = MockRuntime::new();
        runtime.push_ps(PS);

        run(args(Service::Server, 2000, false), &runtime)
            .await
            .unwrap();
        assert!(runtime
            .calls()
            .contains(&Call::Logs("vanilla-server".to_string(), 2000)));
    }

    #[tokio::test]
    async fn test_backup_service_targets_backup_container() {
        let runtime = MockRuntime::new();
        runtime.push_ps(PS);

        run(args(Service::Backup, 100, false), &runtime)
            .await
            .unwrap();
        assert!(runtime
            .calls()
            .contains(&Call::Logs("vanilla-backup".to_string(), 100)));
    }

    #[tokio::test]
    async fn test_follow_uses_streaming_invocation() {
        let runtime = MockRuntime::new();
        runtime.push_ps(PS);

        let output = run(args(Service::Server, 50, true), &runtime).await.unwrap();
        assert_eq!(output, None);
        assert!(runtime
            .calls()
            .contains(&Call::LogsFollow("vanilla-server".to_string(), 50)));
    }

    #[tokio::test]
    async fn test_missing_container_is_an_error() {
        let runtime = MockRuntime::new();
        runtime.push_ps("CONTAINER ID   IMAGE   NAMES\n");

        let result = run(args(Service::Server, 100, false), &runtime).await;
        assert!(matches!(result, Err(LoaderError::ContainerNotFound(_))));
    }
}

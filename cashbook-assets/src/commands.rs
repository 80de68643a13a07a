//! Command handlers between the CLI and the task runner.
//!
//! Configuration and build failures leave here as [`TypedError`] so the
//! binary reports every domain error the same way.

use cashbook_types::{AssetsConfig, Result, TypedError};

use crate::cli::{Cli, Commands};
use crate::config;
use crate::tasks::{Runner, Task, TaskReport};

/// Loads the configuration and applies the command-line overrides.
pub fn prepare(cli: &Cli) -> Result<AssetsConfig> {
    let mut config = config::load_config(cli.config.as_deref())?;
    if cli.production {
        config.production = true;
    }
    if let Some(Commands::Serve { host, port, listen_port }) = &cli.command {
        if let Some(host) = host {
            config.serve.host.clone_from(host);
        }
        if let Some(port) = port {
            config.serve.port = *port;
        }
        if let Some(listen_port) = listen_port {
            config.serve.listen_port = *listen_port;
        }
    }
    config.check()?;
    Ok(config)
}

/// Runs `task` with its dependencies.
pub async fn run_task(config: AssetsConfig, task: Task) -> Result<Vec<TaskReport>> {
    Ok(Runner::new(config).run(&[task]).await?)
}

/// Logs `err` for people and, at debug level, as JSON for tooling.
pub fn report(err: &TypedError) {
    tracing::error!("{err}");
    match serde_json::to_string(err) {
        Ok(json) => tracing::debug!(error = %json, "Error detail"),
        Err(e) => tracing::debug!("Error detail unavailable: {e}"),
    }
}

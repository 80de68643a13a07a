//! Cashbook Assets - build pipeline CLI
//!
//! Builds the cashbook front-end assets:
//! - Compiles Sass stylesheets into `<dest>/stylesheets`
//! - Bundles vendor scripts and the widget WASM module into `<dest>/javascripts`
//! - Copies images into `<dest>/images`
//!
//! `serve` builds once, then serves `<dest>` under `/static`, proxies the
//! application server (default localhost:8001) on http://localhost:3000 and
//! rebuilds sources as they change.

#![cfg_attr(test, allow(clippy::panic))]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod serve;
mod tasks;

use cli::{Cli, Commands};
use tasks::{Runner, Task};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = commands::prepare(&cli).inspect_err(commands::report)?;

    match cli.command.unwrap_or(Commands::Build) {
        Commands::Serve { .. } => serve::run(Runner::new(config)).await,
        other => {
            let task = other.task().unwrap_or(Task::Build);
            let production = config.production;
            let reports =
                commands::run_task(config, task).await.inspect_err(commands::report)?;
            let total: std::time::Duration = reports.iter().map(|r| r.elapsed).sum();
            tracing::info!(
                production,
                "'{task}' done: {} tasks in {total:?}",
                reports.len()
            );
            Ok(())
        },
    }
}

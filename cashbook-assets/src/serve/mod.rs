//! Development server: built assets under `/static`, everything else
//! proxied to the application server, sources rebuilt as they change.

mod proxy;
mod watch;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use tokio::signal;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::tasks::{Runner, Task};

pub use proxy::Upstream;
pub use watch::Watcher;

pub fn build_router(static_dir: &Path, upstream: Upstream) -> Router {
    Router::new()
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(proxy::forward)
        .with_state(upstream)
        .layer(TraceLayer::new_for_http())
}

/// Builds everything, then serves until Ctrl+C.
pub async fn run(runner: Runner) -> Result<()> {
    runner.run(&[Task::Build]).await?;

    let config = runner.config().clone();
    let upstream = Upstream::new(config.serve.upstream_url())?;
    let app = build_router(&config.paths.dest, upstream.clone());

    let debounce = Duration::from_millis(config.serve.debounce_ms);
    let watcher = Watcher::new(&config, debounce).await?;
    let watching = watch::spawn(Arc::new(runner), watcher);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.serve.listen_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Serving {} under http://{addr}/static/", config.paths.dest.display());
    info!("Proxying {} on http://{addr}/", upstream.base_url());

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    watching.abort();
    Ok(())
}

#[allow(
    clippy::expect_used,
    reason = "Signal handlers are critical infrastructure, panic is appropriate on failure"
)]
async fn shutdown_signal() {
    signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    info!("Received Ctrl+C, shutting down");
}

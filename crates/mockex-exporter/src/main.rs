//! mockex exporter
//!
//! - Load config (fatal on error, before anything is registered)
//! - Register series and spawn one generator per series
//! - Serve /metrics, /healthz, /readyz until SIGINT / SIGTERM

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use mockex_core::error::{MockexError, Result};
use mockex_exporter::app_state::AppState;
use mockex_exporter::cli::Args;
use mockex_exporter::registry::SeriesRegistry;
use mockex_exporter::sim::SimulationEngine;
use mockex_exporter::{config, router};

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, class = e.class().as_str(), "mockex exiting");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let cfg = config::load_from_file_with_listen(&args.config, args.listen.as_deref())?;
    tracing::info!(path = %args.config.display(), "config loaded");

    let listen = cfg.exporter.listen_addr()?;
    let grace = cfg.exporter.drain_grace();
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| MockexError::Internal(format!("bind {listen} failed: {e}")))?;

    let registry = Arc::new(SeriesRegistry::new());
    let engine = SimulationEngine::new(Arc::clone(&registry), cfg.exporter.tick_range()?);
    let simulation = engine.start(&cfg);

    let state = AppState::new(registry);
    let app = router::build_router(state.clone());

    tracing::info!(
        %listen,
        generators = simulation.generator_count(),
        "mockex exporter running on /metrics"
    );
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state, grace))
        .await;

    simulation.shutdown().await;
    served.map_err(|e| MockexError::Internal(format!("server error: {e}")))
}

/// Resolves after a signal plus the drain grace period, so `/readyz`
/// reports 503 while the listener is still accepting.
async fn shutdown_signal(state: AppState, grace: Duration) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!(grace_ms = grace.as_millis() as u64, "signal received, draining");
    state.drain(grace).await;
    tracing::info!("shutting down");
}

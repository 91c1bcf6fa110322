//! Lexiserve Server
//!
//! HTTP inference service for the Lexiserve bilingual text pipeline.
//!
//! The process loads its lexicon model exactly once at startup and serves
//! concurrent translation/analysis requests against the shared, read-only
//! pipeline. Requests arriving before the load completes are refused with
//! 503; a failed load is fatal and the process exits non-zero.

use anyhow::Result;
use clap::Parser;
use lexiserve_core::HealthStatus;
use lexiserve_engine::PipelineLoader;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

use lexiserve_server::cli::Cli;
use lexiserve_server::config::ServerConfig;
use lexiserve_server::routes;
use lexiserve_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    info!("Starting Lexiserve server");

    // Load configuration
    let config = ServerConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded successfully");
    info!("Model: {} ({})", config.model.name, config.model.dir.display());
    info!("Task: {:?}", config.model.task);

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // Initialize application state; the readiness barrier starts closed
    let state = AppState::new(config, metrics_handle);

    // Kick off the one-time model load on a blocking worker thread
    let (load_failed_tx, load_failed_rx) = tokio::sync::oneshot::channel();
    spawn_model_load(state.clone(), load_failed_tx);

    // Bind and serve; /health reports `starting` until the load lands
    let addr: SocketAddr = format!("{}:{}", state.config.listen, state.config.port).parse()?;
    let app = routes::create_router(state.clone());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    // Stop on shutdown signals, or when the model load fails
    let shutdown = async move {
        tokio::select! {
            _ = shutdown_signal() => {
                warn!("Shutdown signal received, stopping server...");
            }
            _ = load_failed_rx => {
                error!("Model load failed, stopping server...");
            }
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    if state.health.status() == HealthStatus::Failed {
        anyhow::bail!("model load failed before the service became ready");
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Run the blocking model load and settle the readiness barrier
fn spawn_model_load(state: AppState, load_failed: tokio::sync::oneshot::Sender<()>) {
    tokio::spawn(async move {
        let model_config = state.config.model.clone();
        let loaded =
            tokio::task::spawn_blocking(move || PipelineLoader::load(&model_config)).await;

        match loaded {
            Ok(Ok(pipeline)) => {
                info!(model = %pipeline.metadata().name, "pipeline ready");
                state.publish_pipeline(pipeline);
            }
            Ok(Err(e)) => {
                error!("Model load failed: {}", e);
                state.mark_load_failed();
                let _ = load_failed.send(());
            }
            Err(e) => {
                error!("Model load task panicked: {}", e);
                state.mark_load_failed();
                let _ = load_failed.send(());
            }
        }
    });
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("lexiserve_server=debug,lexiserve_engine=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("lexiserve_server=info,lexiserve_engine=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "lexiserve_requests_total",
        "Total number of requests processed"
    );
    metrics::describe_counter!(
        "lexiserve_errors_total",
        "Total number of request errors by code"
    );
    metrics::describe_histogram!(
        "lexiserve_inference_latency_us",
        metrics::Unit::Microseconds,
        "Inference latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}

//! SRE practice app server.
//!
//! - Config: first CLI argument, else `SRE_APP_CONFIG`, else `srepractice.yaml`
//! - Logging: `RUST_LOG` overrides `log.filter`
//! - Graceful shutdown on Ctrl-C / SIGTERM

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use srepractice_core::error::{Result, SreError};
use srepractice_server::{app_state, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    let explicit = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SRE_APP_CONFIG").ok());

    let cfg = match config::resolve(explicit.clone()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("config load failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log.filter));
    fmt().with_env_filter(filter).init();

    tracing::info!(
        config = explicit.as_deref().unwrap_or(config::DEFAULT_CONFIG_PATH),
        "config loaded"
    );

    match run(cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cfg: config::AppConfig) -> Result<()> {
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, "srepractice-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| SreError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SreError::Internal(format!("server failed: {e}")))?;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
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
    tracing::info!("signal received, starting graceful shutdown");
}

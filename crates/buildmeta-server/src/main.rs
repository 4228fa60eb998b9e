//! buildmeta server
//!
//! - HTTP endpoint: GET /metadata (path configurable)
//! - Values baked in at compile time, optionally overridden by config
//! - Config: $BUILDMETA_CONFIG or ./buildmeta.yaml, defaults when absent

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use buildmeta_core::error::Result;
use buildmeta_server::{app_state, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "buildmeta-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = config::load(std::env::var("BUILDMETA_CONFIG").ok())?;
    let listen = cfg.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;
    tracing::info!(
        %listen,
        path = %state.cfg().server.path,
        version = %state.metadata().version(),
        commit = %state.metadata().commit_sha(),
        "buildmeta-server starting"
    );
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("buildmeta-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler failed");
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
                tracing::warn!(error = %e, "SIGTERM handler failed");
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
    tracing::info!("shutdown signal received");
}

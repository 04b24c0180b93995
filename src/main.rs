//! Users API server: loads settings from the environment, prepares the database,
//! and serves HTTP until SIGINT/SIGTERM.

use tokio::net::TcpListener;
use users_api::{apply_migrations, create_app, init_tracing, AppConfig, AppState, UserStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    init_tracing(&config)?;

    let store = UserStore::connect(&config).await?;
    apply_migrations(store.pool()).await?;

    let addr = config.bind_addr()?;
    let environment = config.environment;
    let app = create_app(AppState::new(store.clone(), config));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%environment, "listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    store.close().await;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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

use tokio::net::TcpListener;
use tracing::{error, info};

use wishlist_api::app::{log_endpoints, router, AppState};
use wishlist_api::config::Config;
use wishlist_api::infrastructure::logger::Logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    Logger::init(&config.logging);

    info!("Starting wishlist API...");

    let state = AppState::build(&config).await.map_err(|e| {
        error!("Failed to initialize application: {}", e);
        e
    })?;
    let app = router(state);

    let listener = TcpListener::bind(config.listen_address()).await?;
    let addr = listener.local_addr()?;
    log_endpoints(&addr.to_string());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Ctrl-C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}

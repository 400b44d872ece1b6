/**
 * docauth Server Entry Point
 *
 * Loads configuration, opens the document store, and serves the
 * authentication API until Ctrl-C.
 */

use docauth::backend::server::{build_state, create_app};
use docauth::shared::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        "Configuration loaded: port={}, bcrypt_cost={}, session_ttl_hours={}",
        config.port,
        config.bcrypt_cost,
        config.session_ttl_hours
    );

    let state = build_state(&config).await?;
    let store = state.accounts.store().clone();
    let (app, reaper) = create_app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down, closing document store");
    reaper.shutdown().await;
    store.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

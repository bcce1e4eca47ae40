use std::net::IpAddr;
use std::sync::Arc;

use guess_persistence::connection::connect_and_migrate;
use guess_persistence::{GuessHistoryRepository, SqliteStore};
use guess_server::{
    config::Config, create_routes, scoring_client::HttpScorer, session_manager::SessionManager,
};
use guess_types::DateKey;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Daily Guess...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let host: IpAddr = match config.host.parse() {
        Ok(host) => host,
        Err(e) => {
            error!("Invalid HOST '{}': {}", config.host, e);
            std::process::exit(1);
        }
    };

    // Initialize database connection and run migrations
    let db = match connect_and_migrate(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to open guess history database: {}", e);
            std::process::exit(1);
        }
    };
    let history = Arc::new(GuessHistoryRepository::new(Arc::new(SqliteStore::new(db))));

    let scorer = match HttpScorer::new(config.scoring_base_url.clone(), config.scoring_timeout) {
        Ok(scorer) => scorer,
        Err(e) => {
            error!("Failed to build scoring client: {}", e);
            std::process::exit(1);
        }
    };
    info!("Scoring guesses against {}", config.scoring_base_url);

    let session_manager =
        Arc::new(SessionManager::open(history, Arc::new(scorer), DateKey::today()).await);
    let routes = create_routes(session_manager);

    let bound = warp::serve(routes)
        .try_bind_with_graceful_shutdown((host, config.port), shutdown_signal());
    let (addr, server) = match bound {
        Ok(bound) => bound,
        Err(e) => {
            error!("Failed to bind {}:{}: {}", config.host, config.port, e);
            std::process::exit(1);
        }
    };

    info!("Daily Guess running on http://{}. Press Ctrl+C to stop.", addr);
    server.await;
    info!("Shutdown complete.");
}

async fn shutdown_signal() {
    // Wait for SIGINT (Ctrl+C) or SIGTERM
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal as unix_signal};

        match (
            unix_signal(SignalKind::interrupt()),
            unix_signal(SignalKind::terminate()),
        ) {
            (Ok(mut sigint), Ok(mut sigterm)) => {
                tokio::select! {
                    _ = sigint.recv() => info!("Received SIGINT, shutting down gracefully..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down gracefully..."),
                }
            }
            _ => {
                error!("Could not install signal handlers; falling back to Ctrl+C");
                let _ = signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = signal::ctrl_c().await;
        info!("Received Ctrl+C, shutting down gracefully...");
    }
}

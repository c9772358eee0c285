use std::net::SocketAddr;

use till_api::{app, AppState};
use till_store::app_config::StorageBackend;
use till_store::{Config, DbClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "till_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting TillDesk API on port {}", config.server.port);

    let state = match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("storage backend: memory");
            AppState::with_memory_store()
        }
        StorageBackend::Postgres => {
            tracing::info!("storage backend: postgres");
            let db = DbClient::new(&config.database.url).await?;
            AppState::with_postgres(&db)
        }
    };

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

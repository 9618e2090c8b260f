use std::net::SocketAddr;
use std::sync::Arc;

use galaxium_api::{app, state::AppState};
use galaxium_core::Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "galaxium_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = galaxium_store::Config::load()?;
    tracing::info!("Starting Galaxium API on port {}", config.server.port);

    let store = galaxium_store::SqliteStore::connect(&config.database.url).await?;
    store.init_schema().await?;

    let store: Arc<dyn Store> = Arc::new(store);
    if config.seed.demo_data {
        galaxium_store::seed::seed_demo_data(store.as_ref())
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
    }

    let app = app(AppState::new(store));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

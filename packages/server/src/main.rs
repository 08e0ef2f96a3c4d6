use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use gallery_common::storage::filesystem::FilesystemBlobStore;
use gallery_server::config::AppConfig;
use gallery_server::state::AppState;
use gallery_server::{build_router, database, seed};
use tracing::{Level, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = database::init_db(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    info!("Database ready");

    seed::seed_admin(&db, &config.auth).await?;

    let blob_store = FilesystemBlobStore::new(
        config.storage.blob_dir.clone(),
        config.storage.max_blob_size,
    )
    .await
    .context("Failed to initialize blob store")?;
    info!(dir = %config.storage.blob_dir.display(), "Blob store ready");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        db,
        blob_store: Arc::new(blob_store),
        config,
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

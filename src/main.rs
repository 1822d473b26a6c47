//! Listing service binary
//!
//! Reads `.env` and the environment, initialises logging, picks a storage
//! backend and serves the HTTP API.

use anyhow::Result;
use listings::config::ServiceConfig;
use listings::core::service::PropertyStore;
use listings::server::ServerBuilder;
use listings::storage::InMemoryPropertyStore;
use listings::telemetry;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ServiceConfig::load()?;
    telemetry::init(&config.log_level)?;

    let store = select_store(&config).await?;
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    ServerBuilder::new()
        .with_shared_store(store)
        .with_database_url_set(config.database_url_set())
        .serve(listener)
        .await
}

#[cfg(feature = "mongodb_backend")]
async fn select_store(config: &ServiceConfig) -> Result<Arc<dyn PropertyStore>> {
    use listings::storage::MongoPropertyStore;

    match &config.storage.database_url {
        Some(url) => {
            let store = MongoPropertyStore::connect(url, &config.storage.database_name).await?;
            info!(database = %config.storage.database_name, "using MongoDB storage");
            Ok(Arc::new(store))
        }
        None => {
            warn!("DATABASE_URL not set, falling back to in-memory storage");
            Ok(Arc::new(InMemoryPropertyStore::new()))
        }
    }
}

#[cfg(not(feature = "mongodb_backend"))]
async fn select_store(config: &ServiceConfig) -> Result<Arc<dyn PropertyStore>> {
    if config.database_url_set() {
        warn!("DATABASE_URL is set but the mongodb_backend feature is disabled");
    }
    info!("using in-memory storage");
    Ok(Arc::new(InMemoryPropertyStore::new()))
}

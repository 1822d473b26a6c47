//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::build_property_routes;
use crate::core::service::{PropertyService, PropertyStore};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Builder for the listing service router
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryPropertyStore::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn PropertyStore>>,
    database_url_set: bool,
    cors: bool,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            database_url_set: false,
            cors: true,
        }
    }

    /// Set the property store (required)
    pub fn with_store(mut self, store: impl PropertyStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set an already shared property store
    pub fn with_shared_store(mut self, store: Arc<dyn PropertyStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Report in `/test` whether a storage connection target was configured
    pub fn with_database_url_set(mut self, set: bool) -> Self {
        self.database_url_set = set;
        self
    }

    /// Drop the permissive CORS layer (on by default)
    pub fn without_cors(mut self) -> Self {
        self.cors = false;
        self
    }

    /// Build the final router with tracing and CORS layers
    pub fn build(mut self) -> Result<Router> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("PropertyStore is required. Call .with_store()"))?;

        let state = AppState {
            service: PropertyService::new(store),
            database_url_set: self.database_url_set,
        };

        let app = build_property_routes(state);

        let app = if self.cors {
            app.layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::very_permissive()),
            )
        } else {
            app.layer(TraceLayer::new_for_http())
        };

        Ok(app)
    }

    /// Build the router and serve it on `listener` until the process stops
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let app = self.build()?;
        info!(addr = %listener.local_addr()?, "listing service ready");
        axum::serve(listener, app).await?;
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

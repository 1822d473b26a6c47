//! Integration test infrastructure for storage backends.
//!
//! Builds the production router around any `PropertyStore` so a backend can
//! be exercised through the full HTTP layer
//! (HTTP → handler → PropertyService → PropertyStore → response).
//!
//! # Architecture
//!
//! ```text
//! axum_test::TestServer
//!     └─ Router (built by build_test_router)
//!         ├─ GET  /                  → root
//!         ├─ GET  /properties        → list_properties
//!         ├─ POST /properties        → create_property
//!         ├─ GET  /properties/{id}   → get_property
//!         └─ GET  /test              → test_database
//! ```

#[macro_use]
pub mod rest_tests;

use axum::Router;
use axum_test::TestServer;
use listings::core::service::PropertyStore;
use listings::server::ServerBuilder;
use serde_json::Value;
use std::sync::Arc;

/// Router with the same middleware stack as the binary.
pub fn build_test_router(store: Arc<dyn PropertyStore>) -> Router {
    ServerBuilder::new()
        .with_shared_store(store)
        .with_database_url_set(true)
        .build()
        .unwrap()
}

/// POST a payload and return the generated id.
pub async fn create_listing(server: &TestServer, payload: &Value) -> String {
    let response = server.post("/properties").json(payload).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<String>()
}

/// Ids of a list response, sorted.
pub fn sorted_ids(records: &[Value]) -> Vec<String> {
    let mut ids: Vec<String> = records
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    ids
}

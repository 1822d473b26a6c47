//! Router builder for the property routes

use super::handlers::{
    AppState, create_property, get_property, list_properties, root, test_database,
};
use axum::{Router, routing::get};

/// Build the property routes
///
/// - GET  / - Health message
/// - GET  /properties - Filtered listing
/// - POST /properties - Create a property
/// - GET  /properties/{id} - Get a property by id
/// - GET  /test - Storage diagnostic
pub fn build_property_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/properties", get(list_properties).post(create_property))
        .route("/properties/{id}", get(get_property))
        .route("/test", get(test_database))
        .with_state(state)
}

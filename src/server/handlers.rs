//! HTTP handlers for the property endpoints

use crate::core::error::ListingError;
use crate::core::property::PropertyRecord;
use crate::core::query::ListParams;
use crate::core::service::{PropertyService, StoreDiagnostics};
use crate::core::validation::ValidatedProperty;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{Value, json};

/// Shared state of the property routes
#[derive(Clone)]
pub struct AppState {
    pub service: PropertyService,
    /// Whether a storage connection target was configured
    pub database_url_set: bool,
}

/// GET / - health message
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Luxury Real Estate API running" }))
}

/// GET /properties - filtered listing
pub async fn list_properties(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<PropertyRecord>>, ListingError> {
    let Query(params) = params.map_err(|e| ListingError::InvalidParameter {
        parameter: "query".to_string(),
        message: e.body_text(),
    })?;
    let criteria = params.into_criteria()?;
    let records = state.service.list(&criteria).await?;
    Ok(Json(records))
}

/// GET /properties/{id} - single record
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PropertyRecord>, ListingError> {
    state.service.get(&id).await.map(Json)
}

/// POST /properties - create, returns the new identifier
pub async fn create_property(
    State(state): State<AppState>,
    ValidatedProperty(property): ValidatedProperty,
) -> Result<(StatusCode, Json<String>), ListingError> {
    let id = state.service.create(property).await?;
    Ok((StatusCode::CREATED, Json(id.to_string())))
}

/// GET /test - storage diagnostic, always 200
pub async fn test_database(State(state): State<AppState>) -> Json<StoreDiagnostics> {
    Json(state.service.diagnostics(state.database_url_set).await)
}

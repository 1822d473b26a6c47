//! Axum extractor for validated Property payloads
//!
//! This module provides the `ValidatedProperty` extractor that runs the
//! Property schema on the request body before it reaches handlers.

use super::schema::property_schema;
use crate::core::error::ListingError;
use crate::core::property::Property;
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::Value;

/// Axum extractor holding a Property that passed schema validation
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_property(
///     State(state): State<AppState>,
///     ValidatedProperty(property): ValidatedProperty,
/// ) -> Result<Json<String>, ListingError> {
///     // property already carries its defaults
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedProperty(pub Property);

impl<S> FromRequest<S> for ValidatedProperty
where
    S: Send + Sync,
{
    type Rejection = ListingError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<Value> =
            Json::from_request(req, state)
                .await
                .map_err(|e| ListingError::InvalidJson {
                    message: e.body_text(),
                })?;

        let property = property_schema().validate(payload)?;
        Ok(ValidatedProperty(property))
    }
}

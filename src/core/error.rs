//! Typed error handling for the listing service
//!
//! Every failure a request can hit is a [`ListingError`]. Client-input
//! failures carry enough context to be reported field by field; storage
//! failures are flattened into a message and surface as a generic
//! server-side error.
//!
//! # Example
//!
//! ```rust,ignore
//! match service.get(raw_id).await {
//!     Ok(record) => println!("{}", record.property.title),
//!     Err(ListingError::NotFound { id }) => println!("no property {id}"),
//!     Err(ListingError::InvalidIdentifier { value }) => println!("bad id {value}"),
//!     Err(e) => eprintln!("other error: {e}"),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type of the crate
#[derive(Debug)]
pub enum ListingError {
    /// One or more field constraints violated on create
    Validation(ValidationError),

    /// Identifier does not follow the object-id syntax
    InvalidIdentifier { value: String },

    /// Well-formed identifier, but no record carries it
    NotFound { id: String },

    /// `limit` outside of the accepted window
    LimitOutOfRange { value: i64, min: u32, max: u32 },

    /// A query parameter could not be parsed or is out of its domain
    InvalidParameter { parameter: String, message: String },

    /// Request body is not valid JSON
    InvalidJson { message: String },

    /// Storage collaborator failure
    Storage(String),
}

impl fmt::Display for ListingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingError::Validation(e) => write!(f, "{}", e),
            ListingError::InvalidIdentifier { value } => {
                write!(f, "Invalid property id: '{}'", value)
            }
            ListingError::NotFound { id } => write!(f, "Property '{}' not found", id),
            ListingError::LimitOutOfRange { value, min, max } => {
                write!(
                    f,
                    "limit must be between {} and {} (got {})",
                    min, max, value
                )
            }
            ListingError::InvalidParameter { parameter, message } => {
                write!(f, "Invalid query parameter '{}': {}", parameter, message)
            }
            ListingError::InvalidJson { message } => write!(f, "Invalid JSON: {}", message),
            ListingError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for ListingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListingError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ListingError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ListingError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ListingError::InvalidIdentifier { .. } => StatusCode::BAD_REQUEST,
            ListingError::NotFound { .. } => StatusCode::NOT_FOUND,
            ListingError::LimitOutOfRange { .. } => StatusCode::BAD_REQUEST,
            ListingError::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            ListingError::InvalidJson { .. } => StatusCode::BAD_REQUEST,
            ListingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ListingError::Validation(_) => "VALIDATION_ERROR",
            ListingError::InvalidIdentifier { .. } => "INVALID_IDENTIFIER",
            ListingError::NotFound { .. } => "PROPERTY_NOT_FOUND",
            ListingError::LimitOutOfRange { .. } => "LIMIT_OUT_OF_RANGE",
            ListingError::InvalidParameter { .. } => "INVALID_PARAMETER",
            ListingError::InvalidJson { .. } => "INVALID_JSON",
            ListingError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Whether the failure was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ListingError::Validation(e) => Some(serde_json::json!({ "fields": e.fields() })),
            ListingError::InvalidIdentifier { value } => {
                Some(serde_json::json!({ "id": value }))
            }
            ListingError::NotFound { id } => Some(serde_json::json!({ "id": id })),
            ListingError::LimitOutOfRange { value, min, max } => Some(serde_json::json!({
                "limit": value,
                "min": min,
                "max": max
            })),
            ListingError::InvalidParameter { parameter, .. } => {
                Some(serde_json::json!({ "parameter": parameter }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        if !self.is_client_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ListingError {
    fn from(err: anyhow::Error) -> Self {
        ListingError::Storage(err.to_string())
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Every field constraint violated by a create request
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    fields: Vec<FieldValidationError>,
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ValidationError {
    pub fn new(fields: Vec<FieldValidationError>) -> Self {
        Self { fields }
    }

    /// Violations in schema field order
    pub fn fields(&self) -> &[FieldValidationError] {
        &self.fields
    }

    /// Whether `field` has at least one violation
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .fields
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "Validation errors: {}", msgs.join(", "))
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ListingError {
    fn from(err: ValidationError) -> Self {
        ListingError::Validation(err)
    }
}

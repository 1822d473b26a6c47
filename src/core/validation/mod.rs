//! Validation of inbound Property records
//!
//! A declarative schema checks every field of an untyped create request and
//! reports all violations together. The `ValidatedProperty` extractor plugs
//! the schema into axum handlers.

pub mod extractor;
pub mod schema;
pub mod validators;

pub use extractor::ValidatedProperty;
pub use schema::{FieldRule, PropertySchema, property_schema};

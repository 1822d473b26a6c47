//! Core module: record model, validation, query filters and the service seam

pub mod error;
pub mod filter;
pub mod property;
pub mod query;
pub mod service;
pub mod validation;

pub use error::{FieldValidationError, ListingError, ValidationError};
pub use filter::{
    Condition, FilterBuilder, FilterField, NumericRange, PropertyFilter, PropertySelection,
    TextPattern,
};
pub use property::{Collection, GeoLocation, Property, PropertyId, PropertyRecord};
pub use query::{Limit, ListParams, SearchCriteria};
pub use service::{PropertyService, PropertyStore, StoreDiagnostics};
pub use validation::{PropertySchema, ValidatedProperty};

//! # Estate Listings
//!
//! A property-listing query service: validated real-estate records with
//! filtered list and detail queries, exposed over HTTP.
//!
//! ## Features
//!
//! - **Schema validation**: every violated field of a create request is reported at once
//! - **Composable filters**: city/type (case-insensitive, whole string), price range,
//!   minimum bedrooms and featured flag, ANDed together
//! - **Bounded results**: `limit` between 1 and 100, default 24
//! - **Pluggable storage**: in-memory by default, MongoDB behind `mongodb_backend`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use listings::prelude::*;
//!
//! let store = InMemoryPropertyStore::new();
//! let service = PropertyService::new(std::sync::Arc::new(store));
//!
//! let id = service.create_from_value(serde_json::json!({
//!     "title": "Marina View", "address": "1 Marina Walk", "city": "Dubai",
//!     "country": "UAE", "price": 500000, "bedrooms": 3, "bathrooms": 2,
//!     "area": 1800, "type": "Apartment", "featured": true
//! })).await?;
//!
//! let hits = service
//!     .list(&SearchCriteria::new().city("dubai").min_bedrooms(3))
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod telemetry;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{FieldValidationError, ListingError, ValidationError},
        filter::{FilterField, PropertyFilter, PropertySelection},
        property::{Collection, GeoLocation, Property, PropertyId, PropertyRecord},
        query::{Limit, ListParams, SearchCriteria},
        service::{PropertyService, PropertyStore, StoreDiagnostics},
        validation::{PropertySchema, ValidatedProperty, property_schema},
    };

    // === Storage ===
    pub use crate::storage::InMemoryPropertyStore;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoPropertyStore;

    // === Config ===
    pub use crate::config::{ConfigError, ServiceConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}

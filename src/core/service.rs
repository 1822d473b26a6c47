//! Storage seam and the listing service built on top of it

use crate::core::error::ListingError;
use crate::core::filter::PropertySelection;
use crate::core::property::{Property, PropertyId, PropertyRecord};
use crate::core::query::SearchCriteria;
use crate::core::validation::property_schema;
use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Storage collaborator for Property records
///
/// Implementations own the persisted bytes and provide single-document
/// atomicity. Every call touches at most one document, except `find`,
/// which only reads.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Persist a validated property and return its generated identifier
    async fn insert(&self, property: Property) -> Result<PropertyId>;

    /// Fetch a record by identifier
    ///
    /// Returns `Ok(None)` if no record carries `id`.
    async fn find_by_id(&self, id: &PropertyId) -> Result<Option<PropertyRecord>>;

    /// Records matching the selection's filter, at most `selection.limit`
    async fn find(&self, selection: &PropertySelection) -> Result<Vec<PropertyRecord>>;

    /// Name of the backing database, if the backend has one
    fn database_name(&self) -> Option<String>;

    /// Names of the collections visible to the backend
    async fn list_collections(&self) -> Result<Vec<String>>;
}

/// Number of collection names reported by the diagnostic
pub const DIAGNOSTIC_COLLECTIONS: usize = 10;

const ERROR_SNIPPET_LEN: usize = 50;

/// Storage reachability report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreDiagnostics {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// Validates, stores and queries Property records
#[derive(Clone)]
pub struct PropertyService {
    store: Arc<dyn PropertyStore>,
}

impl PropertyService {
    pub fn new(store: Arc<dyn PropertyStore>) -> Self {
        Self { store }
    }

    /// Persist an already validated property
    pub async fn create(&self, property: Property) -> Result<PropertyId, ListingError> {
        let id = self.store.insert(property).await?;
        info!(%id, "property created");
        Ok(id)
    }

    /// Validate an untyped record, then persist it
    pub async fn create_from_value(&self, input: Value) -> Result<PropertyId, ListingError> {
        let property = property_schema().validate(input)?;
        self.create(property).await
    }

    /// Records matching `criteria`
    pub async fn list(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<PropertyRecord>, ListingError> {
        criteria.check()?;
        let selection = PropertySelection::from_criteria(criteria)?;
        Ok(self.store.find(&selection).await?)
    }

    /// Single record by client-supplied identifier
    pub async fn get(&self, raw_id: &str) -> Result<PropertyRecord, ListingError> {
        let id = PropertyId::parse(raw_id)?;
        self.store
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ListingError::NotFound { id: id.to_string() })
    }

    /// Describe storage reachability; never fails
    pub async fn diagnostics(&self, database_url_set: bool) -> StoreDiagnostics {
        let mut report = StoreDiagnostics {
            backend: "✅ Running".to_string(),
            database: "✅ Available".to_string(),
            database_url: Some(if database_url_set { "✅ Set" } else { "❌ Not Set" }.to_string()),
            database_name: self.store.database_name(),
            connection_status: "Connected".to_string(),
            collections: Vec::new(),
        };

        match self.store.list_collections().await {
            Ok(mut collections) => {
                collections.truncate(DIAGNOSTIC_COLLECTIONS);
                report.collections = collections;
                report.database = "✅ Connected & Working".to_string();
            }
            Err(e) => {
                warn!(error = %e, "storage diagnostic failed");
                let snippet: String = e.to_string().chars().take(ERROR_SNIPPET_LEN).collect();
                report.database = format!("⚠️ Connected but Error: {}", snippet);
            }
        }

        report
    }
}

//! In-memory implementation of PropertyStore for testing and development

use crate::core::filter::PropertySelection;
use crate::core::property::{Collection, Property, PropertyId, PropertyRecord};
use crate::core::service::PropertyStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// In-memory property store
///
/// Records are kept in insertion order behind an `RwLock`, so `find`
/// returns them in the order they were created.
#[derive(Clone, Default)]
pub struct InMemoryPropertyStore {
    records: Arc<RwLock<Vec<PropertyRecord>>>,
}

impl InMemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PropertyStore for InMemoryPropertyStore {
    async fn insert(&self, property: Property) -> Result<PropertyId> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let mut id = PropertyId::generate();
        while records.iter().any(|r| r.id == id) {
            id = PropertyId::generate();
        }

        records.push(PropertyRecord {
            id: id.clone(),
            property,
        });

        Ok(id)
    }

    async fn find_by_id(&self, id: &PropertyId) -> Result<Option<PropertyRecord>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.iter().find(|r| &r.id == id).cloned())
    }

    async fn find(&self, selection: &PropertySelection) -> Result<Vec<PropertyRecord>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records
            .iter()
            .filter(|r| selection.filter.matches(&r.property))
            .take(selection.limit.get() as usize)
            .cloned()
            .collect())
    }

    fn database_name(&self) -> Option<String> {
        Some("in-memory".to_string())
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        if self.is_empty() {
            Ok(Vec::new())
        } else {
            Ok(vec![Collection::Property.name().to_string()])
        }
    }
}

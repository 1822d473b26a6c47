//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoPropertyStore`, a `PropertyStore` backed by a
//! `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! estate-listings = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Storage model
//!
//! Records live in the collection declared by `Collection::Property`.
//! MongoDB generates the `_id` object id on insert; it is exposed as the
//! 24-digit hex `id` of the public record.
//!
//! # Serialization strategy
//!
//! Records are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents, so the stored field names match the
//! public JSON shape (`type`, `floor_plans`, ...).

use crate::core::filter::{Condition, PropertyFilter, PropertySelection};
use crate::core::property::{Collection, Property, PropertyId, PropertyRecord};
use crate::core::service::PropertyStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, doc};
use mongodb::{Client, Database};

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document.
fn json_to_document(json: serde_json::Value) -> Result<Document> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    match bson_val {
        Bson::Document(d) => Ok(d),
        _ => Err(anyhow!("Expected BSON document, got non-object")),
    }
}

/// Convert a BSON Document back into a serde_json::Value,
/// renaming `_id` → `id` and rendering object ids as hex strings.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        let id = match id {
            Bson::ObjectId(oid) => Bson::String(oid.to_hex()),
            other => other,
        };
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

fn object_id(id: &PropertyId) -> Result<ObjectId> {
    ObjectId::parse_str(id.as_str()).map_err(|e| anyhow!("Invalid object id '{}': {}", id, e))
}

/// Translate a filter into a MongoDB query document
///
/// Text patterns become case-insensitive `$regex` clauses, ranges become
/// `$gte`/`$lte`, flags are matched exactly. An empty filter yields `{}`.
pub fn filter_to_document(filter: &PropertyFilter) -> Document {
    let mut query = Document::new();

    for (field, condition) in filter.iter() {
        let value = match condition {
            Condition::Pattern(pattern) => Bson::Document(doc! {
                "$regex": pattern.source(),
                "$options": "i",
            }),
            Condition::Range(range) => {
                let mut bounds = Document::new();
                if let Some(min) = range.min {
                    bounds.insert("$gte", min);
                }
                if let Some(max) = range.max {
                    bounds.insert("$lte", max);
                }
                Bson::Document(bounds)
            }
            Condition::Equals(flag) => Bson::Boolean(*flag),
        };
        query.insert(field.name(), value);
    }

    query
}

// ---------------------------------------------------------------------------
// MongoPropertyStore
// ---------------------------------------------------------------------------

/// Property storage backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use listings::storage::MongoPropertyStore;
///
/// let store = MongoPropertyStore::connect("mongodb://localhost:27017", "listings").await?;
/// let id = store.insert(property).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoPropertyStore {
    database: Database,
}

impl MongoPropertyStore {
    /// Create a new `MongoPropertyStore` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Parse `uri`, build a client and select `database_name`.
    ///
    /// The driver connects lazily; reachability is only known on first use.
    pub async fn connect(uri: &str, database_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| anyhow!("Failed to create MongoDB client: {}", e))?;
        Ok(Self::new(client.database(database_name)))
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(Collection::Property.name())
    }

    fn property_to_document(property: &Property) -> Result<Document> {
        let json = serde_json::to_value(property)
            .map_err(|e| anyhow!("Failed to serialize property: {}", e))?;
        json_to_document(json)
    }

    fn document_to_record(doc: Document) -> Result<PropertyRecord> {
        let json = document_to_json(doc);
        serde_json::from_value(json)
            .map_err(|e| anyhow!("Failed to deserialize property from document: {}", e))
    }
}

#[async_trait]
impl PropertyStore for MongoPropertyStore {
    async fn insert(&self, property: Property) -> Result<PropertyId> {
        let doc = Self::property_to_document(&property)?;

        let result = self
            .collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to create property: {}", e))?;

        let oid = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| anyhow!("Inserted id is not an object id: {}", result.inserted_id))?;

        PropertyId::parse(&oid.to_hex()).map_err(|e| anyhow!("{}", e))
    }

    async fn find_by_id(&self, id: &PropertyId) -> Result<Option<PropertyRecord>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": object_id(id)? })
            .await
            .map_err(|e| anyhow!("Failed to get property: {}", e))?;

        match doc {
            Some(d) => Ok(Some(Self::document_to_record(d)?)),
            None => Ok(None),
        }
    }

    async fn find(&self, selection: &PropertySelection) -> Result<Vec<PropertyRecord>> {
        let filter = filter_to_document(&selection.filter);

        let cursor = self
            .collection()
            .find(filter)
            .limit(i64::from(selection.limit.get()))
            .await
            .map_err(|e| anyhow!("Failed to query properties: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect properties: {}", e))?;

        docs.into_iter().map(Self::document_to_record).collect()
    }

    fn database_name(&self) -> Option<String> {
        Some(self.database.name().to_string())
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        self.database
            .list_collection_names()
            .await
            .map_err(|e| anyhow!("Failed to list collections: {}", e))
    }
}

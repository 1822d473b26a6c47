//! The Property record, its identifier and its storage namespace

use crate::core::error::ListingError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Default listing status applied when a create request omits it
pub const DEFAULT_STATUS: &str = "For Sale";

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

/// Room counts may have been written as whole-number floats (`3.0`)
fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct CountVisitor;

    impl<'de> Visitor<'de> for CountVisitor {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative whole number")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<u32, E> {
            u32::try_from(value).map_err(|_| E::custom(format!("count {} out of range", value)))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<u32, E> {
            u32::try_from(value).map_err(|_| E::custom(format!("count {} out of range", value)))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<u32, E> {
            if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
                Ok(value as u32)
            } else {
                Err(E::invalid_value(de::Unexpected::Float(value), &self))
            }
        }
    }

    deserializer.deserialize_any(CountVisitor)
}

/// Storage namespaces, declared statically per entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Property,
}

impl Collection {
    /// Name of the collection holding this entity type
    pub const fn name(&self) -> &'static str {
        match self {
            Collection::Property => "property",
        }
    }
}

/// Geographic coordinates of a listing
///
/// No range check is applied to either coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lng: f64,
}

/// A real-estate listing as accepted on create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub title: String,
    pub address: String,
    pub city: String,
    pub country: String,
    /// Price in currency units
    pub price: f64,
    #[serde(deserialize_with = "deserialize_count")]
    pub bedrooms: u32,
    #[serde(deserialize_with = "deserialize_count")]
    pub bathrooms: u32,
    /// Area in square feet
    pub area: f64,
    /// Free-text category, e.g. "Apartment" or "Villa"
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub location: Option<GeoLocation>,
    #[serde(default)]
    pub floor_plans: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

impl Property {
    /// Listing with every optional field at its default
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
        property_type: impl Into<String>,
        price: f64,
        bedrooms: u32,
        bathrooms: u32,
        area: f64,
    ) -> Self {
        Self {
            title: title.into(),
            address: address.into(),
            city: city.into(),
            country: country.into(),
            price,
            bedrooms,
            bathrooms,
            area,
            property_type: property_type.into(),
            status: default_status(),
            badges: Vec::new(),
            images: Vec::new(),
            description: None,
            amenities: Vec::new(),
            location: None,
            floor_plans: Vec::new(),
            featured: false,
        }
    }
}

/// A persisted listing: the stored fields plus the generated identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: PropertyId,
    #[serde(flatten)]
    pub property: Property,
}

/// Storage-generated identifier in object-id syntax (24 hex digits)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(String);

impl PropertyId {
    /// Length of the textual form
    pub const LEN: usize = 24;

    /// Parse a client-supplied identifier
    pub fn parse(raw: &str) -> Result<Self, ListingError> {
        if raw.len() == Self::LEN && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(raw.to_ascii_lowercase()))
        } else {
            Err(ListingError::InvalidIdentifier {
                value: raw.to_string(),
            })
        }
    }

    /// Fresh identifier for backends that do not generate their own
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(hex[..Self::LEN].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PropertyId {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

//! Query parameters for listing properties
//!
//! Query strings are first captured as raw text (`ListParams`) so that every
//! malformed value can be reported against its parameter name, then parsed
//! into typed `SearchCriteria`.

use crate::core::error::ListingError;
use serde::Deserialize;
use validator::Validate;

/// Raw query parameters of `GET /properties`
///
/// # Example
/// ```rust,ignore
/// // In handler:
/// pub async fn list_properties(
///     Query(params): Query<ListParams>,
/// ) -> Result<Json<Vec<PropertyRecord>>, ListingError> {
///     let criteria = params.into_criteria()?;
/// }
///
/// // Usage:
/// GET /properties?city=dubai&min_price=400000&bedrooms=3&featured=true&limit=10
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub city: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub bedrooms: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub featured: Option<String>,
    pub limit: Option<String>,
}

/// Maximum number of rows a single list request may return
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Limit(u32);

impl Limit {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 100;
    pub const DEFAULT: u32 = 24;

    /// Accept `value` only inside `[MIN, MAX]`; nothing is clamped
    pub fn new(value: i64) -> Result<Self, ListingError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u32))
        } else {
            Err(ListingError::LimitOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Parsed search criteria
///
/// Every criterion is optional; `None` places no restriction on its field.
#[derive(Debug, Clone, PartialEq, Default, Validate)]
pub struct SearchCriteria {
    pub city: Option<String>,
    pub property_type: Option<String>,
    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    pub min_price: Option<f64>,
    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    pub max_price: Option<f64>,
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub bedrooms: Option<i64>,
    pub featured: Option<bool>,
    pub limit: Limit,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = Some(property_type.into());
        self
    }

    pub fn min_price(mut self, price: f64) -> Self {
        self.min_price = Some(price);
        self
    }

    pub fn max_price(mut self, price: f64) -> Self {
        self.max_price = Some(price);
        self
    }

    pub fn min_bedrooms(mut self, bedrooms: i64) -> Self {
        self.bedrooms = Some(bedrooms);
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    pub fn limit(mut self, limit: Limit) -> Self {
        self.limit = limit;
        self
    }

    /// Reject criteria whose numeric bounds are out of their domain
    pub fn check(&self) -> Result<(), ListingError> {
        self.validate().map_err(|errors| {
            let field_errors = errors.field_errors();
            let mut names: Vec<_> = field_errors.keys().collect();
            names.sort();
            let parameter = names
                .first()
                .map(|name| name.to_string())
                .unwrap_or_default();
            let message = field_errors
                .get(parameter.as_str())
                .and_then(|errs| errs.first())
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| "invalid value".to_string());
            ListingError::InvalidParameter { parameter, message }
        })
    }
}

impl ListParams {
    /// Parse raw parameters into checked criteria
    ///
    /// Empty values count as absent.
    pub fn into_criteria(self) -> Result<SearchCriteria, ListingError> {
        let limit = match parse_integer("limit", self.limit.as_deref())? {
            Some(value) => Limit::new(value)?,
            None => Limit::default(),
        };

        let criteria = SearchCriteria {
            city: non_empty(self.city),
            property_type: non_empty(self.property_type),
            min_price: parse_number("min_price", self.min_price.as_deref())?,
            max_price: parse_number("max_price", self.max_price.as_deref())?,
            bedrooms: parse_integer("bedrooms", self.bedrooms.as_deref())?,
            featured: parse_flag("featured", self.featured.as_deref())?,
            limit,
        };

        criteria.check()?;
        Ok(criteria)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

fn invalid(parameter: &str, message: impl Into<String>) -> ListingError {
    ListingError::InvalidParameter {
        parameter: parameter.to_string(),
        message: message.into(),
    }
}

fn parse_number(parameter: &str, raw: Option<&str>) -> Result<Option<f64>, ListingError> {
    let Some(raw) = present(raw) else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(invalid(parameter, format!("'{}' is not a valid number", raw))),
    }
}

fn parse_integer(parameter: &str, raw: Option<&str>) -> Result<Option<i64>, ListingError> {
    let Some(raw) = present(raw) else {
        return Ok(None);
    };
    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| invalid(parameter, format!("'{}' is not a valid integer", raw)))
}

fn parse_flag(parameter: &str, raw: Option<&str>) -> Result<Option<bool>, ListingError> {
    let Some(raw) = present(raw) else {
        return Ok(None);
    };
    match raw.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" | "on" => Ok(Some(true)),
        "false" | "f" | "0" | "no" | "n" | "off" => Ok(Some(false)),
        _ => Err(invalid(parameter, format!("'{}' is not a valid boolean", raw))),
    }
}

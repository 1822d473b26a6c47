//! Composite filter predicates over Property records
//!
//! A [`PropertyFilter`] is a conjunction of per-field conditions. It is built
//! from [`SearchCriteria`] and stays backend-neutral: the in-memory store
//! evaluates it with [`PropertyFilter::matches`], the MongoDB store
//! translates it into a query document.

use crate::core::error::ListingError;
use crate::core::property::Property;
use crate::core::query::{Limit, SearchCriteria};
use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;
use std::collections::btree_map::Iter;
use tracing::debug;

/// Fields a filter can constrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterField {
    City,
    Type,
    Price,
    Bedrooms,
    Featured,
}

impl FilterField {
    /// Stored field name
    pub fn name(&self) -> &'static str {
        match self {
            FilterField::City => "city",
            FilterField::Type => "type",
            FilterField::Price => "price",
            FilterField::Bedrooms => "bedrooms",
            FilterField::Featured => "featured",
        }
    }
}

/// Case-insensitive pattern anchored on both ends of the field value
#[derive(Debug, Clone)]
pub struct TextPattern {
    source: String,
    regex: Regex,
}

impl TextPattern {
    /// Whole-string, case-insensitive match of `literal`
    ///
    /// Pattern metacharacters in `literal` match themselves.
    pub fn exact_ignore_case(literal: &str) -> Result<Self, ListingError> {
        let source = format!(r"^{}\z", regex::escape(literal));
        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|e| ListingError::InvalidParameter {
                parameter: "pattern".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { source, regex })
    }

    /// Anchored pattern text, e.g. `^Dubai\z`
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for TextPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// Inclusive numeric bounds; a missing side is open
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Constraint on a single field
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Pattern(TextPattern),
    Range(NumericRange),
    Equals(bool),
}

/// Conjunction of field conditions, at most one per field
///
/// Conditions are keyed by field, so two filters built from the same
/// criteria in any order compare equal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyFilter {
    conditions: BTreeMap<FilterField, Condition>,
}

impl PropertyFilter {
    /// Filter that matches every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn builder() -> FilterBuilder {
        FilterBuilder::default()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn condition(&self, field: FilterField) -> Option<&Condition> {
        self.conditions.get(&field)
    }

    pub fn iter(&self) -> Iter<'_, FilterField, Condition> {
        self.conditions.iter()
    }

    /// Evaluate every condition against `property`
    pub fn matches(&self, property: &Property) -> bool {
        self.conditions
            .iter()
            .all(|(field, condition)| match (field, condition) {
                (FilterField::City, Condition::Pattern(p)) => p.is_match(&property.city),
                (FilterField::Type, Condition::Pattern(p)) => p.is_match(&property.property_type),
                (FilterField::Price, Condition::Range(r)) => r.contains(property.price),
                (FilterField::Bedrooms, Condition::Range(r)) => {
                    r.contains(f64::from(property.bedrooms))
                }
                (FilterField::Featured, Condition::Equals(flag)) => property.featured == *flag,
                _ => false,
            })
    }
}

/// Incremental construction of a [`PropertyFilter`]
///
/// Each setter replaces any previous condition on the same field; absent
/// criteria are simply never set.
#[derive(Debug, Default)]
pub struct FilterBuilder {
    conditions: BTreeMap<FilterField, Condition>,
    price: NumericRange,
}

impl FilterBuilder {
    pub fn city(mut self, city: &str) -> Result<Self, ListingError> {
        let pattern = TextPattern::exact_ignore_case(city)?;
        self.conditions
            .insert(FilterField::City, Condition::Pattern(pattern));
        Ok(self)
    }

    pub fn property_type(mut self, property_type: &str) -> Result<Self, ListingError> {
        let pattern = TextPattern::exact_ignore_case(property_type)?;
        self.conditions
            .insert(FilterField::Type, Condition::Pattern(pattern));
        Ok(self)
    }

    pub fn min_bedrooms(mut self, bedrooms: i64) -> Self {
        self.conditions.insert(
            FilterField::Bedrooms,
            Condition::Range(NumericRange::at_least(bedrooms as f64)),
        );
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.conditions
            .insert(FilterField::Featured, Condition::Equals(featured));
        self
    }

    pub fn min_price(mut self, price: f64) -> Self {
        self.price.min = Some(price);
        self
    }

    pub fn max_price(mut self, price: f64) -> Self {
        self.price.max = Some(price);
        self
    }

    /// Fold the price bounds into a single range condition
    pub fn build(mut self) -> PropertyFilter {
        if !self.price.is_unbounded() {
            self.conditions
                .insert(FilterField::Price, Condition::Range(self.price));
        }
        PropertyFilter {
            conditions: self.conditions,
        }
    }
}

/// A filter plus the maximum number of rows to return
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySelection {
    pub filter: PropertyFilter,
    pub limit: Limit,
}

impl PropertySelection {
    pub fn new(filter: PropertyFilter, limit: Limit) -> Self {
        Self { filter, limit }
    }

    /// Compose the predicate for already-checked criteria
    pub fn from_criteria(criteria: &SearchCriteria) -> Result<Self, ListingError> {
        let mut builder = PropertyFilter::builder();

        if let Some(city) = criteria.city.as_deref().filter(|c| !c.is_empty()) {
            builder = builder.city(city)?;
        }
        if let Some(property_type) = criteria.property_type.as_deref().filter(|t| !t.is_empty()) {
            builder = builder.property_type(property_type)?;
        }
        if let Some(bedrooms) = criteria.bedrooms {
            builder = builder.min_bedrooms(bedrooms);
        }
        if let Some(featured) = criteria.featured {
            builder = builder.featured(featured);
        }
        if let Some(min) = criteria.min_price {
            builder = builder.min_price(min);
        }
        if let Some(max) = criteria.max_price {
            builder = builder.max_price(max);
        }

        let filter = builder.build();
        debug!(conditions = filter.len(), limit = criteria.limit.get(), "built property filter");

        Ok(Self::new(filter, criteria.limit))
    }
}

//! Declarative schema for Property create requests
//!
//! The schema walks every field of an untyped JSON record and gathers all
//! violations before giving up, so callers see the full list at once.

use super::validators::{
    boolean, geo_point, non_negative_integer, non_negative_number, string, string_list,
};
use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::property::Property;
use serde_json::{Map, Value};
use std::sync::OnceLock;

type Validator = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

/// Rule attached to a single top-level field
pub struct FieldRule {
    name: &'static str,
    required: bool,
    integral: bool,
    validators: Vec<Validator>,
}

impl FieldRule {
    /// Field that must be present and non-null
    pub fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            integral: false,
            validators: Vec::new(),
        }
    }

    /// Field that falls back to its default when absent or null
    pub fn optional(name: &'static str) -> Self {
        Self {
            required: false,
            ..Self::required(name)
        }
    }

    pub fn with<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validators.push(Box::new(validator));
        self
    }

    /// Store the accepted value as an unsigned integer (`3.0` becomes `3`)
    pub fn integral(mut self) -> Self {
        self.integral = true;
        self
    }

    fn first_violation(&self, value: &Value) -> Option<String> {
        self.validators
            .iter()
            .find_map(|validator| validator(self.name, value).err())
    }
}

/// Field rules for the Property record, in declaration order
pub struct PropertySchema {
    rules: Vec<FieldRule>,
}

impl Default for PropertySchema {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertySchema {
    pub fn new() -> Self {
        Self {
            rules: vec![
                FieldRule::required("title").with(string()),
                FieldRule::required("address").with(string()),
                FieldRule::required("city").with(string()),
                FieldRule::required("country").with(string()),
                FieldRule::required("price").with(non_negative_number()),
                FieldRule::required("bedrooms")
                    .with(non_negative_integer())
                    .integral(),
                FieldRule::required("bathrooms")
                    .with(non_negative_integer())
                    .integral(),
                FieldRule::required("area").with(non_negative_number()),
                FieldRule::required("type").with(string()),
                FieldRule::optional("status").with(string()),
                FieldRule::optional("badges").with(string_list()),
                FieldRule::optional("images").with(string_list()),
                FieldRule::optional("description").with(string()),
                FieldRule::optional("amenities").with(string_list()),
                FieldRule::optional("location").with(geo_point()),
                FieldRule::optional("floor_plans").with(string_list()),
                FieldRule::optional("featured").with(boolean()),
            ],
        }
    }

    /// Validate an untyped record and build the Property it describes
    ///
    /// Defaults are applied to optional fields that are absent or null.
    /// Fields the schema does not know are ignored.
    pub fn validate(&self, input: Value) -> Result<Property, ValidationError> {
        let Value::Object(mut object) = input else {
            return Err(ValidationError::new(vec![FieldValidationError::new(
                "body",
                "must be a JSON object",
            )]));
        };

        let mut errors = Vec::new();
        for rule in &self.rules {
            self.check_field(rule, &mut object, &mut errors);
        }

        if !errors.is_empty() {
            return Err(ValidationError::new(errors));
        }

        serde_json::from_value(Value::Object(object))
            .map_err(|e| ValidationError::new(vec![FieldValidationError::new("body", e.to_string())]))
    }

    fn check_field(
        &self,
        rule: &FieldRule,
        object: &mut Map<String, Value>,
        errors: &mut Vec<FieldValidationError>,
    ) {
        let coerced = match object.get(rule.name) {
            None | Some(Value::Null) => {
                if rule.required {
                    errors.push(FieldValidationError::new(rule.name, "field required"));
                } else {
                    object.remove(rule.name);
                }
                return;
            }
            Some(value) => {
                if let Some(message) = rule.first_violation(value) {
                    errors.push(FieldValidationError::new(rule.name, message));
                    return;
                }
                if rule.integral {
                    value.as_f64().map(|n| Value::from(n as u64))
                } else {
                    None
                }
            }
        };

        if let Some(value) = coerced {
            object.insert(rule.name.to_string(), value);
        }
    }
}

/// Shared schema instance
pub fn property_schema() -> &'static PropertySchema {
    static SCHEMA: OnceLock<PropertySchema> = OnceLock::new();
    SCHEMA.get_or_init(PropertySchema::new)
}

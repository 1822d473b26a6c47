//! Reusable field validators
//!
//! Each validator inspects one present, non-null JSON value. Absence and
//! `null` are handled by the schema before any validator runs.

use serde_json::Value;

/// Validator: value is a string (empty strings pass)
pub fn string() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| {
        if value.is_string() {
            Ok(())
        } else {
            Err("must be a string".to_string())
        }
    }
}

/// Validator: value is a number greater than or equal to zero
pub fn non_negative_number() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone
{
    |field: &str, value: &Value| match value.as_f64() {
        Some(num) if num < 0.0 => Err(format!(
            "'{}' must be greater than or equal to 0 (value: {})",
            field, num
        )),
        Some(_) => Ok(()),
        None => Err("must be a number".to_string()),
    }
}

/// Validator: value is an integral number greater than or equal to zero
///
/// Integral floats such as `3.0` are accepted.
pub fn non_negative_integer() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone
{
    |field: &str, value: &Value| {
        let Some(num) = value.as_f64() else {
            return Err("must be a non-negative integer".to_string());
        };
        if num.fract() != 0.0 {
            Err(format!("'{}' must be a whole number (value: {})", field, num))
        } else if num < 0.0 {
            Err(format!(
                "'{}' must be greater than or equal to 0 (value: {})",
                field, num
            ))
        } else if num > f64::from(u32::MAX) {
            Err(format!("'{}' is too large (value: {})", field, num))
        } else {
            Ok(())
        }
    }
}

/// Validator: value is a boolean
pub fn boolean() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| {
        if value.is_boolean() {
            Ok(())
        } else {
            Err("must be a boolean".to_string())
        }
    }
}

/// Validator: value is an array whose items are all strings
pub fn string_list() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| {
        let Some(items) = value.as_array() else {
            return Err("must be a list of strings".to_string());
        };
        match items.iter().position(|item| !item.is_string()) {
            Some(index) => Err(format!("item {} must be a string", index)),
            None => Ok(()),
        }
    }
}

/// Validator: value is an object carrying numeric `lat` and `lng`
pub fn geo_point() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| {
        let Some(point) = value.as_object() else {
            return Err("must be an object with 'lat' and 'lng'".to_string());
        };
        let mut missing = Vec::new();
        for coordinate in ["lat", "lng"] {
            match point.get(coordinate) {
                Some(v) if v.is_number() => {}
                Some(Value::Null) | None => missing.push(format!("'{}' is required", coordinate)),
                Some(_) => missing.push(format!("'{}' must be a number", coordinate)),
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing.join("; "))
        }
    }
}

//! Typed field access over a raw JSON request body.
//!
//! Dashboard forms post loosely typed JSON: numbers sometimes arrive as
//! numeric strings and unused inputs as `null`. [`Fields`] normalizes that
//! once so the rule functions only deal with Rust values.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::OrderValidationError;

type FieldResult<T> = Result<T, OrderValidationError>;

/// Read-only view of a JSON object body.
pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// The body must be a JSON object.
    pub(crate) fn object(input: &'a Value) -> FieldResult<Self> {
        input
            .as_object()
            .map(|map| Self { map })
            .ok_or_else(|| OrderValidationError::new("body", "body must be a JSON object"))
    }

    /// First non-null value among `field` and its aliases.
    fn lookup(&self, field: &str, aliases: &[&str]) -> Option<&'a Value> {
        std::iter::once(field)
            .chain(aliases.iter().copied())
            .filter_map(|name| self.map.get(name))
            .find(|v| !v.is_null())
    }

    pub(crate) fn required_str(&self, field: &'static str) -> FieldResult<&'a str> {
        self.required_str_alias(field, &[])
    }

    pub(crate) fn required_str_alias(
        &self,
        field: &'static str,
        aliases: &[&str],
    ) -> FieldResult<&'a str> {
        match self.lookup(field, aliases) {
            None => Err(missing(field)),
            Some(Value::String(s)) if s.trim().is_empty() => Err(missing(field)),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(_) => Err(OrderValidationError::new(field, format!("{field} must be a string"))),
        }
    }

    /// A string or a bare integer, returned as a string (security ids).
    pub(crate) fn required_identifier(&self, field: &'static str) -> FieldResult<String> {
        match self.lookup(field, &[]) {
            None => Err(missing(field)),
            Some(Value::String(s)) if s.trim().is_empty() => Err(missing(field)),
            Some(Value::String(s)) => Ok(s.trim().to_owned()),
            Some(Value::Number(n)) if n.is_u64() => Ok(n.to_string()),
            Some(_) => Err(OrderValidationError::new(
                field,
                format!("{field} must be a string"),
            )),
        }
    }

    pub(crate) fn optional_str(&self, field: &'static str) -> FieldResult<Option<&'a str>> {
        match self.lookup(field, &[]) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(OrderValidationError::new(field, format!("{field} must be a string"))),
        }
    }

    /// Presence and type only; range checks belong to the caller.
    pub(crate) fn required_number(&self, field: &'static str) -> FieldResult<f64> {
        match self.lookup(field, &[]) {
            None => Err(missing(field)),
            Some(v) => number(field, v),
        }
    }

    pub(crate) fn optional_number(&self, field: &'static str) -> FieldResult<Option<f64>> {
        match self.lookup(field, &[]) {
            None => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(v) => number(field, v).map(Some),
        }
    }

    pub(crate) fn optional_bool(&self, field: &'static str) -> FieldResult<Option<bool>> {
        match self.lookup(field, &[]) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(OrderValidationError::new(
                field,
                format!("{field} must be true or false"),
            )),
        }
    }
}

fn missing(field: &'static str) -> OrderValidationError {
    OrderValidationError::new(field, format!("{field} is required"))
}

fn number(field: &'static str, value: &Value) -> FieldResult<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|n| n.is_finite())
        .ok_or_else(|| OrderValidationError::new(field, format!("{field} must be a number")))
}

/// Parse a wire string into one of the closed enums.
pub(crate) fn parse_enum<T: DeserializeOwned>(
    field: &'static str,
    raw: &str,
    allowed: &[&str],
) -> FieldResult<T> {
    serde_json::from_value(Value::String(raw.to_owned())).map_err(|_| {
        OrderValidationError::new(
            field,
            format!("{field} must be one of {} (got {raw:?})", allowed.join(", ")),
        )
    })
}

/// Whole number strictly greater than zero.
pub(crate) fn positive_integer(field: &'static str, value: f64) -> FieldResult<u64> {
    if value.fract() != 0.0 || value <= 0.0 || value > u64::MAX as f64 {
        return Err(OrderValidationError::new(
            field,
            format!("{field} must be a positive integer"),
        ));
    }
    Ok(value as u64)
}

/// Whole number greater than or equal to zero.
pub(crate) fn non_negative_integer(field: &'static str, value: f64) -> FieldResult<u64> {
    if value.fract() != 0.0 || value < 0.0 || value > u64::MAX as f64 {
        return Err(OrderValidationError::new(
            field,
            format!("{field} must be a non-negative integer"),
        ));
    }
    Ok(value as u64)
}

/// Finite and strictly greater than zero.
pub(crate) fn positive_amount(field: &'static str, value: f64) -> FieldResult<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(OrderValidationError::new(
            field,
            format!("{field} must be greater than 0"),
        ))
    }
}

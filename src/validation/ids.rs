//! Order id and correlation id shape checks.
//!
//! Both are opaque to us. The only rules enforced are the ones the broker
//! documents for correlation ids: at most [`MAX_ID_LEN`] characters drawn from
//! ASCII letters, digits, space, `_` and `-`, and not blank. Broker-assigned
//! order ids are plain digits, so they pass the same check.

use crate::constants::MAX_ID_LEN;
use crate::error::OrderValidationError;

/// Validate a broker order id.
pub fn validate_order_id(id: &str) -> Result<(), OrderValidationError> {
    validate_id("orderId", id)
}

/// Validate a client-supplied correlation id.
pub fn validate_correlation_id(id: &str) -> Result<(), OrderValidationError> {
    validate_id("correlationId", id)
}

pub(crate) fn validate_non_empty(
    field: &'static str,
    value: &str,
) -> Result<(), OrderValidationError> {
    if value.trim().is_empty() {
        return Err(OrderValidationError::new(field, format!("{field} is required")));
    }
    Ok(())
}

fn validate_id(field: &'static str, id: &str) -> Result<(), OrderValidationError> {
    validate_non_empty(field, id)?;

    if id.trim() != id {
        return Err(OrderValidationError::new(
            field,
            format!("{field} must not start or end with whitespace"),
        ));
    }
    if id.chars().count() > MAX_ID_LEN {
        return Err(OrderValidationError::new(
            field,
            format!("{field} must be at most {MAX_ID_LEN} characters"),
        ));
    }
    if let Some(bad) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-')))
    {
        return Err(OrderValidationError::new(
            field,
            format!("{field} contains invalid character {bad:?}"),
        ));
    }
    Ok(())
}

//! Order validation.
//!
//! Turns raw JSON request bodies into typed requests, or rejects them with a
//! single [`OrderValidationError`](crate::error::OrderValidationError) naming
//! the first field that broke a rule. Nothing here does I/O; every check runs
//! before a request can reach the broker.
//!
//! | Function | Body |
//! |---|---|
//! | [`validate_place_order_request`] | `POST /v2/orders` |
//! | [`validate_modify_order_request`] | `PUT /v2/orders/{order-id}` |
//! | [`validate_super_order_request`] | `POST /v2/super/orders` |
//! | [`validate_forever_order_request`] | `POST /v2/forever/orders` |
//! | [`validate_order_id`], [`validate_correlation_id`] | identifiers |

pub(crate) mod fields;
pub(crate) mod ids;
mod legs;
pub(crate) mod orders;

pub use ids::{validate_correlation_id, validate_order_id};
pub use legs::{validate_forever_order_request, validate_super_order_request};
pub use orders::{validate_modify_order_request, validate_place_order_request};

//! Order types: place, modify, and the broker's order acknowledgement.

use serde::{Deserialize, Serialize};

use crate::error::OrderValidationError;
use crate::types::enums::*;
use crate::validation;

// ---------------------------------------------------------------------------
// Place Order
// ---------------------------------------------------------------------------

/// Request body for placing a new order.
///
/// Used by `POST /v2/orders`. Build one from a raw body with
/// [`validate_place_order_request`](crate::validation::validate_place_order_request),
/// or construct it directly and call [`validate`](Self::validate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub dhan_client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    pub transaction_type: TransactionType,
    pub exchange_segment: ExchangeSegment,
    pub product_type: ProductType,
    pub order_type: OrderType,
    pub validity: Validity,
    pub security_id: String,
    pub quantity: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclosed_quantity: Option<u64>,
    /// Required for `LIMIT` and `STOP_LOSS`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Required for `STOP_LOSS` and `STOP_LOSS_MARKET`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_market_order: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amo_time: Option<AmoTime>,
    /// Bracket order target offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bo_profit_value: Option<f64>,
    /// Bracket order stop-loss offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bo_stop_loss_value: Option<f64>,
}

impl PlaceOrderRequest {
    /// Re-check the numeric and order-type-conditional rules on a struct that
    /// was built in code rather than parsed from a body.
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        validation::ids::validate_non_empty("dhanClientId", &self.dhan_client_id)?;
        validation::ids::validate_non_empty("securityId", &self.security_id)?;
        validation::orders::check_quantity(self.quantity)?;
        validation::orders::check_conditional_prices(
            self.order_type,
            self.price,
            self.trigger_price,
        )?;
        validation::orders::check_disclosed_quantity(self.disclosed_quantity, Some(self.quantity))?;
        if let Some(id) = &self.correlation_id {
            validation::validate_correlation_id(id)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Modify Order
// ---------------------------------------------------------------------------

/// Request body for modifying a pending order.
///
/// Used by `PUT /v2/orders/{order-id}`. The `order_id` must match the id in
/// the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyOrderRequest {
    pub dhan_client_id: String,
    pub order_id: String,
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leg_name: Option<LegName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclosed_quantity: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_price: Option<f64>,
    pub validity: Validity,
}

impl ModifyOrderRequest {
    /// Re-check the numeric and order-type-conditional rules.
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        validation::validate_order_id(&self.order_id)?;
        validation::ids::validate_non_empty("dhanClientId", &self.dhan_client_id)?;
        if let Some(qty) = self.quantity {
            validation::orders::check_quantity(qty)?;
        }
        validation::orders::check_conditional_prices(
            self.order_type,
            self.price,
            self.trigger_price,
        )?;
        validation::orders::check_disclosed_quantity(self.disclosed_quantity, self.quantity)
    }
}

// ---------------------------------------------------------------------------
// Order Response
// ---------------------------------------------------------------------------

/// Acknowledgement returned by place / modify / cancel endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: String,
    pub order_status: String,
}

// ---------------------------------------------------------------------------
// Order Detail
// ---------------------------------------------------------------------------

/// One row of the order book.
///
/// Only the fields the dashboard renders are typed; the broker sends more.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub dhan_client_id: Option<String>,
    pub order_id: Option<String>,
    pub correlation_id: Option<String>,
    pub order_status: Option<String>,
    pub transaction_type: Option<String>,
    pub exchange_segment: Option<String>,
    pub product_type: Option<String>,
    pub order_type: Option<String>,
    pub validity: Option<String>,
    pub trading_symbol: Option<String>,
    pub security_id: Option<String>,
    #[serde(default)]
    pub quantity: Option<u64>,
    #[serde(default)]
    pub disclosed_quantity: Option<u64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub trigger_price: Option<f64>,
    #[serde(default)]
    pub filled_qty: Option<u64>,
    #[serde(default)]
    pub average_traded_price: Option<f64>,
    pub create_time: Option<String>,
    pub update_time: Option<String>,
    pub oms_error_description: Option<String>,
}

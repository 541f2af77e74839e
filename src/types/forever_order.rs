//! Forever Order (GTT / OCO) types.

use serde::{Deserialize, Serialize};

use crate::types::enums::*;

/// Request body for creating a new forever order.
///
/// Used by `POST /v2/forever/orders`. The `*1` fields describe the second
/// leg and are present only for `OCO`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateForeverOrderRequest {
    pub dhan_client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    pub order_flag: OrderFlag,
    pub transaction_type: TransactionType,
    pub exchange_segment: ExchangeSegment,
    pub product_type: ProductType,
    pub order_type: OrderType,
    pub validity: Validity,
    pub security_id: String,
    pub quantity: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclosed_quantity: Option<u64>,
    pub price: f64,
    pub trigger_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_price1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity1: Option<u64>,
}

/// Forever order as listed by `GET /v2/forever/all`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeverOrderDetail {
    pub order_id: Option<String>,
    pub order_status: Option<String>,
    pub transaction_type: Option<String>,
    pub exchange_segment: Option<String>,
    pub product_type: Option<String>,
    /// `SINGLE` or `OCO`.
    pub order_type: Option<String>,
    pub trading_symbol: Option<String>,
    pub security_id: Option<String>,
    #[serde(default)]
    pub quantity: Option<u64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub trigger_price: Option<f64>,
    pub leg_name: Option<String>,
    pub create_time: Option<String>,
}

#![allow(missing_docs)]
//! Super Order types.

use serde::{Deserialize, Serialize};

use crate::types::enums::*;

// ---------------------------------------------------------------------------
// Place Super Order
// ---------------------------------------------------------------------------

/// Request body for placing a new super order (entry + target + stop-loss).
///
/// Used by `POST /v2/super/orders`. All five numeric fields are mandatory and
/// positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSuperOrderRequest {
    pub dhan_client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    pub transaction_type: TransactionType,
    pub exchange_segment: ExchangeSegment,
    pub product_type: ProductType,
    pub order_type: OrderType,
    pub security_id: String,
    pub quantity: u64,
    pub price: f64,
    pub target_price: f64,
    pub stop_loss_price: f64,
    pub trailing_jump: f64,
}

// ---------------------------------------------------------------------------
// Super Order Detail
// ---------------------------------------------------------------------------

/// Leg detail within a super order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDetail {
    pub order_id: Option<String>,
    pub leg_name: Option<String>,
    pub transaction_type: Option<String>,
    #[serde(default, alias = "totalQuatity")]
    pub total_quantity: Option<u64>,
    #[serde(default)]
    pub remaining_quantity: Option<u64>,
    #[serde(default)]
    pub price: Option<f64>,
    pub order_status: Option<String>,
    #[serde(default)]
    pub trailing_jump: Option<f64>,
}

/// Super order as listed by `GET /v2/super/orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuperOrderDetail {
    pub order_id: Option<String>,
    pub correlation_id: Option<String>,
    pub order_status: Option<String>,
    pub transaction_type: Option<String>,
    pub exchange_segment: Option<String>,
    pub product_type: Option<String>,
    pub order_type: Option<String>,
    pub trading_symbol: Option<String>,
    pub security_id: Option<String>,
    #[serde(default)]
    pub quantity: Option<u64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub ltp: Option<f64>,
    pub create_time: Option<String>,
    #[serde(default)]
    pub leg_details: Vec<LegDetail>,
}

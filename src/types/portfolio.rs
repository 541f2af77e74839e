#![allow(missing_docs)]
//! Portfolio types: Holdings and Positions.
//!
//! Numbers are optional because the broker omits them for some segments; the
//! P&L aggregation treats a missing value as zero.

use serde::{Deserialize, Serialize};

/// A single holding in the demat account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub exchange: Option<String>,
    pub trading_symbol: Option<String>,
    pub security_id: Option<String>,
    pub isin: Option<String>,
    #[serde(default)]
    pub total_qty: Option<i64>,
    #[serde(default)]
    pub available_qty: Option<i64>,
    #[serde(default)]
    pub avg_cost_price: Option<f64>,
}

/// A single position for the day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub trading_symbol: Option<String>,
    pub security_id: Option<String>,
    pub position_type: Option<String>,
    pub exchange_segment: Option<String>,
    pub product_type: Option<String>,
    #[serde(default)]
    pub net_qty: Option<i64>,
    #[serde(default)]
    pub realized_profit: Option<f64>,
    #[serde(default)]
    pub unrealized_profit: Option<f64>,
    #[serde(default)]
    pub day_buy_qty: Option<i64>,
    #[serde(default)]
    pub day_sell_qty: Option<i64>,
}

impl Position {
    /// True when the position saw any buy or sell today.
    pub fn traded_today(&self) -> bool {
        self.day_buy_qty.unwrap_or(0) > 0 || self.day_sell_qty.unwrap_or(0) > 0
    }
}

//! Trader's Control types: risk settings, kill switch status, daily P&L.
//!
//! [`TradersControlSettings`] is the only part that is persisted.
//! [`KillSwitchStatus`] and [`DailyPnLSummary`] live in memory and start from
//! their defaults in every session.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{DEFAULT_AUTO_KILL_SWITCH, DEFAULT_DAILY_LOSS_LIMIT};
use crate::types::portfolio::Position;

// ---------------------------------------------------------------------------
// Settings (persisted)
// ---------------------------------------------------------------------------

/// Operator-controlled risk settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradersControlSettings {
    /// Loss, in rupees, at which the auto kill switch fires. Always > 0 when
    /// set through [`KillSwitchStore::update_settings`](crate::risk::KillSwitchStore::update_settings).
    #[serde(default, deserialize_with = "lenient_amount")]
    pub daily_loss_limit: f64,
    #[serde(default = "default_auto")]
    pub is_auto_kill_switch_enabled: bool,
    #[serde(default)]
    pub is_kill_switch_active: bool,
    #[serde(default)]
    pub kill_switch_activated_at: Option<DateTime<Utc>>,
    /// Local calendar date of the last daily reset.
    pub last_reset_date: NaiveDate,
}

impl TradersControlSettings {
    /// First-run settings.
    pub fn defaults(today: NaiveDate) -> Self {
        Self {
            daily_loss_limit: DEFAULT_DAILY_LOSS_LIMIT,
            is_auto_kill_switch_enabled: DEFAULT_AUTO_KILL_SWITCH,
            is_kill_switch_active: false,
            kill_switch_activated_at: None,
            last_reset_date: today,
        }
    }
}

fn default_auto() -> bool {
    DEFAULT_AUTO_KILL_SWITCH
}

/// Numbers and numeric strings are accepted; anything else reads as 0.
fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    let amount = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(amount.filter(|n: &f64| n.is_finite()).unwrap_or(0.0))
}

/// Partial update for [`TradersControlSettings`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default)]
    pub daily_loss_limit: Option<f64>,
    #[serde(default)]
    pub is_auto_kill_switch_enabled: Option<bool>,
}

impl SettingsPatch {
    pub fn daily_loss_limit(limit: f64) -> Self {
        Self {
            daily_loss_limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn auto_kill_switch(enabled: bool) -> Self {
        Self {
            is_auto_kill_switch_enabled: Some(enabled),
            ..Self::default()
        }
    }

    /// Drops a `daily_loss_limit` that is not a finite number above zero.
    pub fn sanitize(mut self) -> Self {
        self.daily_loss_limit = self
            .daily_loss_limit
            .filter(|l| l.is_finite() && *l > 0.0);
        self
    }
}

// ---------------------------------------------------------------------------
// Kill switch status (ephemeral)
// ---------------------------------------------------------------------------

/// Current kill switch state.
///
/// `is_active`, a non-empty `reason` and `activated_at` always go together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KillSwitchStatus {
    pub is_active: bool,
    pub reason: String,
    pub activated_at: Option<DateTime<Utc>>,
    /// Whether the operator may deactivate manually.
    pub can_override: bool,
}

impl KillSwitchStatus {
    pub fn inactive() -> Self {
        Self {
            is_active: false,
            reason: String::new(),
            activated_at: None,
            can_override: true,
        }
    }

    pub fn active(reason: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            is_active: true,
            reason: reason.into(),
            activated_at: Some(at),
            can_override: true,
        }
    }
}

impl Default for KillSwitchStatus {
    fn default() -> Self {
        Self::inactive()
    }
}

// ---------------------------------------------------------------------------
// Daily P&L (ephemeral)
// ---------------------------------------------------------------------------

/// Realized + unrealized P&L since the last daily reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPnLSummary {
    #[serde(rename = "totalRealizedPnL")]
    pub total_realized_pnl: f64,
    #[serde(rename = "totalUnrealizedPnL")]
    pub total_unrealized_pnl: f64,
    #[serde(rename = "totalDailyPnL")]
    pub total_daily_pnl: f64,
    pub trade_count: u32,
    pub last_updated: Option<DateTime<Utc>>,
}

impl DailyPnLSummary {
    /// Build a summary with `total_daily_pnl` derived from the two parts.
    pub fn new(realized: f64, unrealized: f64, trade_count: u32, at: DateTime<Utc>) -> Self {
        Self {
            total_realized_pnl: realized,
            total_unrealized_pnl: unrealized,
            total_daily_pnl: realized + unrealized,
            trade_count,
            last_updated: Some(at),
        }
    }

    /// Aggregate the broker's position rows.
    pub fn from_positions(positions: &[Position], at: DateTime<Utc>) -> Self {
        let realized = positions
            .iter()
            .filter_map(|p| p.realized_profit)
            .filter(|v| v.is_finite())
            .sum();
        let unrealized = positions
            .iter()
            .filter_map(|p| p.unrealized_profit)
            .filter(|v| v.is_finite())
            .sum();
        let trade_count = positions.iter().filter(|p| p.traded_today()).count();
        Self::new(
            realized,
            unrealized,
            u32::try_from(trade_count).unwrap_or(u32::MAX),
            at,
        )
    }

    /// Coerce non-finite parts to 0 and recompute the total.
    pub fn sanitized(self) -> Self {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        let realized = finite(self.total_realized_pnl);
        let unrealized = finite(self.total_unrealized_pnl);
        Self {
            total_realized_pnl: realized,
            total_unrealized_pnl: unrealized,
            total_daily_pnl: realized + unrealized,
            ..self
        }
    }

    /// Loss as a positive number; 0 when flat or in profit.
    pub fn current_loss(&self) -> f64 {
        self.total_daily_pnl.min(0.0).abs()
    }
}

// ---------------------------------------------------------------------------
// Broker kill switch
// ---------------------------------------------------------------------------

/// Response from `POST /v2/killswitch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KillSwitchResponse {
    pub dhan_client_id: Option<String>,
    pub kill_switch_status: String,
}

//! Constants for the DhanHQ API v2 and the local trader's control.
//!
//! Contains base URLs, REST paths used by the broker proxy, identifier limits
//! and the default risk settings.

// ---------------------------------------------------------------------------
// Base URLs
// ---------------------------------------------------------------------------

/// Base URL for the DhanHQ REST API v2.
pub const API_BASE_URL: &str = "https://api.dhan.co";

/// Base URL for the DhanHQ sandbox.
pub const SANDBOX_BASE_URL: &str = "https://sandbox.dhan.co";

// ---------------------------------------------------------------------------
// REST paths
// ---------------------------------------------------------------------------

/// REST paths forwarded by [`BrokerProxy`](crate::api::BrokerProxy).
pub mod paths {
    pub const ORDERS: &str = "/v2/orders";
    pub const SUPER_ORDERS: &str = "/v2/super/orders";
    pub const FOREVER_ORDERS: &str = "/v2/forever/orders";
    pub const FOREVER_ORDERS_ALL: &str = "/v2/forever/all";
    pub const POSITIONS: &str = "/v2/positions";
    pub const HOLDINGS: &str = "/v2/holdings";
    pub const KILL_SWITCH: &str = "/v2/killswitch";
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Longest order / correlation id the broker accepts.
pub const MAX_ID_LEN: usize = 30;

// ---------------------------------------------------------------------------
// Trader's control
// ---------------------------------------------------------------------------

/// Fixed key the trader's-control settings are persisted under.
pub const SETTINGS_STORAGE_KEY: &str = "traders-control-storage";

/// Default daily loss limit, in rupees.
pub const DEFAULT_DAILY_LOSS_LIMIT: f64 = 5_000.0;

/// Auto kill switch is on unless the operator turns it off.
pub const DEFAULT_AUTO_KILL_SWITCH: bool = true;

/// Default reqwest timeout for broker calls.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

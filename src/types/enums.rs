//! Shared enum types that map directly to DhanHQ API string values.
//!
//! Variant names use `SCREAMING_SNAKE_CASE` to match the JSON wire format
//! expected by the DhanHQ API, so we suppress the Rust naming convention lint.
//! Every enum here is a closed set: a wire string that is not a variant is a
//! validation error, never passed through.
#![allow(non_camel_case_types)]

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Exchange Segment
// ---------------------------------------------------------------------------

/// Exchange and segment identifier used across all DhanHQ APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExchangeSegment {
    /// Index value.
    IDX_I,
    /// NSE Equity Cash.
    NSE_EQ,
    /// NSE Futures & Options.
    NSE_FNO,
    /// NSE Currency.
    NSE_CURRENCY,
    /// BSE Equity Cash.
    BSE_EQ,
    /// MCX Commodity.
    MCX_COMM,
    /// BSE Currency.
    BSE_CURRENCY,
    /// BSE Futures & Options.
    BSE_FNO,
}

impl ExchangeSegment {
    /// All wire values, in documentation order.
    pub const ALL: [&'static str; 8] = [
        "IDX_I",
        "NSE_EQ",
        "NSE_FNO",
        "NSE_CURRENCY",
        "BSE_EQ",
        "MCX_COMM",
        "BSE_CURRENCY",
        "BSE_FNO",
    ];
}

// ---------------------------------------------------------------------------
// Transaction Type
// ---------------------------------------------------------------------------

/// Buy or sell side of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    BUY,
    SELL,
}

impl TransactionType {
    pub const ALL: [&'static str; 2] = ["BUY", "SELL"];
}

// ---------------------------------------------------------------------------
// Product Type
// ---------------------------------------------------------------------------

/// Product type for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    /// Cash & Carry for equity deliveries.
    CNC,
    /// Intraday for Equity, Futures & Options.
    INTRADAY,
    /// Carry Forward in Futures & Options.
    MARGIN,
    /// Cover Order (intraday only).
    CO,
    /// Bracket Order (intraday only).
    BO,
}

impl ProductType {
    pub const ALL: [&'static str; 5] = ["CNC", "INTRADAY", "MARGIN", "CO", "BO"];
}

// ---------------------------------------------------------------------------
// Order Type
// ---------------------------------------------------------------------------

/// Type of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    LIMIT,
    MARKET,
    STOP_LOSS,
    STOP_LOSS_MARKET,
}

impl OrderType {
    pub const ALL: [&'static str; 4] = ["MARKET", "LIMIT", "STOP_LOSS", "STOP_LOSS_MARKET"];

    /// `LIMIT` and `STOP_LOSS` carry a limit price.
    pub fn requires_price(self) -> bool {
        matches!(self, Self::LIMIT | Self::STOP_LOSS)
    }

    /// `STOP_LOSS` and `STOP_LOSS_MARKET` carry a trigger price.
    pub fn requires_trigger_price(self) -> bool {
        matches!(self, Self::STOP_LOSS | Self::STOP_LOSS_MARKET)
    }
}

// ---------------------------------------------------------------------------
// Validity
// ---------------------------------------------------------------------------

/// Order validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Validity {
    /// Valid for the trading day.
    DAY,
    /// Immediate or Cancel.
    IOC,
}

impl Validity {
    pub const ALL: [&'static str; 2] = ["DAY", "IOC"];
}

// ---------------------------------------------------------------------------
// Leg Name
// ---------------------------------------------------------------------------

/// Identifies a leg in Super Order / Bracket Order / Cover Order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegName {
    ENTRY_LEG,
    TARGET_LEG,
    STOP_LOSS_LEG,
}

impl LegName {
    pub const ALL: [&'static str; 3] = ["ENTRY_LEG", "TARGET_LEG", "STOP_LOSS_LEG"];

    /// Wire string, as used in the super-order cancel path.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ENTRY_LEG => "ENTRY_LEG",
            Self::TARGET_LEG => "TARGET_LEG",
            Self::STOP_LOSS_LEG => "STOP_LOSS_LEG",
        }
    }
}

// ---------------------------------------------------------------------------
// After Market Order Time
// ---------------------------------------------------------------------------

/// Timing for after-market orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmoTime {
    /// Pumped at pre-market session.
    PRE_OPEN,
    /// Pumped at market open.
    OPEN,
    /// Pumped 30 minutes after market open.
    OPEN_30,
    /// Pumped 60 minutes after market open.
    OPEN_60,
}

impl AmoTime {
    pub const ALL: [&'static str; 4] = ["PRE_OPEN", "OPEN", "OPEN_30", "OPEN_60"];
}

// ---------------------------------------------------------------------------
// Order Flag (Forever Orders)
// ---------------------------------------------------------------------------

/// Forever order flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderFlag {
    /// Single forever order.
    SINGLE,
    /// One-Cancels-Other order.
    OCO,
}

impl OrderFlag {
    pub const ALL: [&'static str; 2] = ["SINGLE", "OCO"];
}

// ---------------------------------------------------------------------------
// Broker Kill Switch Status
// ---------------------------------------------------------------------------

/// Value of the broker-side `killSwitchStatus` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrokerKillSwitch {
    ACTIVATE,
    DEACTIVATE,
}

impl BrokerKillSwitch {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ACTIVATE => "ACTIVATE",
            Self::DEACTIVATE => "DEACTIVATE",
        }
    }
}

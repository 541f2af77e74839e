//! # dhan-guard
//!
//! Server-side risk layer for a [DhanHQ Broker API v2](https://dhanhq.co/docs/v2/)
//! trading dashboard.
//!
//! - [`validation`] rejects malformed order bodies before they reach the broker.
//! - [`risk`] holds the daily-loss kill switch and the [`TradingGuard`](risk::TradingGuard)
//!   every trading action must pass.
//! - [`api`] is the [`BrokerProxy`]: validate, guard, forward, wrap the answer
//!   in an [`ApiEnvelope`](types::envelope::ApiEnvelope).
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use dhan_guard::risk::TracingNotifier;
//! use dhan_guard::{BrokerConfig, BrokerProxy};
//!
//! #[tokio::main]
//! async fn main() -> dhan_guard::Result<()> {
//!     let config = BrokerConfig::from_env()?;
//!     let proxy = BrokerProxy::from_config(&config, Arc::new(TracingNotifier))?;
//!
//!     let body = serde_json::json!({
//!         "transactionType": "BUY",
//!         "exchangeSegment": "NSE_EQ",
//!         "productType": "INTRADAY",
//!         "orderType": "MARKET",
//!         "validity": "DAY",
//!         "securityId": "1333",
//!         "quantity": 1
//!     });
//!     let envelope = proxy.place_order(&body).await;
//!     println!("{}", serde_json::to_string(&envelope)?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod risk;
pub mod types;
pub mod validation;

pub use api::BrokerProxy;
pub use client::DhanClient;
pub use config::BrokerConfig;
pub use error::{DhanError, Result};

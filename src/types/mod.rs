//! Request and response types.
//!
//! ## Organization
//!
//! - [`enums`]: Closed wire enumerations (exchange segments, order types, etc.)
//! - [`orders`]: Order placement, modification and order book types
//! - [`super_order`]: Super Order (entry + target + stop-loss) types
//! - [`forever_order`]: Forever/GTT order types
//! - [`portfolio`]: Holdings and positions
//! - [`traders_control`]: Risk settings, kill switch status, daily P&L
//! - [`envelope`]: The proxy response envelope
//!
//! All enums are re-exported at the module root via `pub use enums::*`.

pub mod envelope;
pub mod enums;
pub mod forever_order;
pub mod orders;
pub mod portfolio;
pub mod super_order;
pub mod traders_control;

pub use enums::*;

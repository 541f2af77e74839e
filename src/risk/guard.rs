//! Trading guard: the one gate every place / modify / cancel passes through.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::error::{DhanError, Result};
use crate::risk::kill_switch::KillSwitchStore;
use crate::risk::notify::{Notification, NotificationSink};
use crate::types::traders_control::KillSwitchStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeKind {
    Place,
    Modify,
    Cancel,
}

impl fmt::Display for TradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Place => "Place Order",
            Self::Modify => "Modify Order",
            Self::Cancel => "Cancel Order",
        })
    }
}

/// Description of a trading action, for logs and notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeOperation {
    pub kind: TradeKind,
    pub symbol: Option<String>,
    pub quantity: Option<u64>,
    pub price: Option<f64>,
}

impl TradeOperation {
    pub fn new(kind: TradeKind) -> Self {
        Self {
            kind,
            symbol: None,
            quantity: None,
            price: None,
        }
    }

    pub fn place() -> Self {
        Self::new(TradeKind::Place)
    }

    pub fn modify() -> Self {
        Self::new(TradeKind::Modify)
    }

    pub fn cancel() -> Self {
        Self::new(TradeKind::Cancel)
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn quantity(mut self, quantity: u64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn price(mut self, price: Option<f64>) -> Self {
        self.price = price;
        self
    }
}

/// Blocks trading while the kill switch is active.
///
/// The decision is taken once, before the trade future starts. A kill switch
/// that trips while the broker call is in flight does not cancel it.
#[derive(Clone)]
pub struct TradingGuard {
    store: Arc<KillSwitchStore>,
    notifier: Arc<dyn NotificationSink>,
}

impl fmt::Debug for TradingGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TradingGuard")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl TradingGuard {
    pub fn new(store: Arc<KillSwitchStore>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self { store, notifier }
    }

    pub fn store(&self) -> &Arc<KillSwitchStore> {
        &self.store
    }

    /// `false` (with an error notification) while the kill switch is active.
    ///
    /// `operation` is only used for logging today; market-hours or position
    /// limit rules would hook in here.
    pub fn check_trading_allowed(&self, operation: Option<&TradeOperation>) -> bool {
        self.blocked_reason(&self.store.status(), operation).is_none()
    }

    /// The activation reason when `status` blocks trading, after notifying.
    fn blocked_reason(
        &self,
        status: &KillSwitchStatus,
        operation: Option<&TradeOperation>,
    ) -> Option<String> {
        if !status.is_active {
            return None;
        }

        tracing::warn!(
            operation = ?operation.map(|op| op.kind),
            reason = %status.reason,
            "trading blocked by kill switch"
        );
        self.notifier.notify(Notification::error(
            "Trading Blocked",
            format!(
                "Kill switch is active: {}. All trading is blocked.",
                status.reason
            ),
        ));
        Some(status.reason.clone())
    }

    /// Run `trade` if trading is allowed.
    ///
    /// Returns [`DhanError::GuardBlocked`] without calling `trade` while the
    /// kill switch is active. Otherwise awaits `trade` exactly once; a failure
    /// is reported as a notification and returned unchanged.
    pub async fn execute_trade<F, Fut, T>(&self, operation: &TradeOperation, trade: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let status = self.store.status();
        if let Some(reason) = self.blocked_reason(&status, Some(operation)) {
            return Err(DhanError::GuardBlocked { reason });
        }

        tracing::info!(
            kind = %operation.kind,
            symbol = ?operation.symbol,
            quantity = ?operation.quantity,
            price = ?operation.price,
            timestamp = %self.store.now(),
            kill_switch_active = status.is_active,
            "executing trade"
        );

        match trade().await {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::error!(kind = %operation.kind, error = %err, "trade failed");
                self.notifier.notify(Notification::error(
                    format!("{} Failed", operation.kind),
                    err.to_string(),
                ));
                Err(err)
            }
        }
    }
}

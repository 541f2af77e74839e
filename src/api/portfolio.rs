//! Portfolio routes and the daily P&L feed.

use chrono::Utc;

use crate::api::BrokerProxy;
use crate::constants::paths;
use crate::error::Result;
use crate::types::envelope::ApiEnvelope;
use crate::types::portfolio::*;
use crate::types::traders_control::DailyPnLSummary;

impl BrokerProxy {
    /// Open positions for the day.
    ///
    /// A successful fetch also refreshes the kill switch's daily P&L, the
    /// same way the dashboard recomputes it whenever positions change.
    ///
    /// **Upstream:** `GET /v2/positions`
    pub async fn get_positions(&self) -> ApiEnvelope<Vec<Position>> {
        let result = self.fetch_positions().await.inspect(|positions| {
            self.record_pnl(positions);
        });
        ApiEnvelope::from_result(result)
    }

    /// Demat holdings.
    ///
    /// **Upstream:** `GET /v2/holdings`
    pub async fn get_holdings(&self) -> ApiEnvelope<Vec<Holding>> {
        ApiEnvelope::from_result(self.client.get(paths::HOLDINGS).await)
    }

    /// Pull positions, aggregate today's P&L and feed it to the kill switch.
    /// Returns whether this refresh tripped the switch.
    pub async fn refresh_daily_pnl(&self) -> Result<bool> {
        let positions = self.fetch_positions().await?;
        Ok(self.record_pnl(&positions))
    }

    async fn fetch_positions(&self) -> Result<Vec<Position>> {
        self.client.get(paths::POSITIONS).await
    }

    fn record_pnl(&self, positions: &[Position]) -> bool {
        let summary = DailyPnLSummary::from_positions(positions, Utc::now());
        tracing::debug!(
            realized = summary.total_realized_pnl,
            unrealized = summary.total_unrealized_pnl,
            total = summary.total_daily_pnl,
            trades = summary.trade_count,
            "daily P&L updated"
        );
        self.kill_switch().update_daily_pnl(summary)
    }
}

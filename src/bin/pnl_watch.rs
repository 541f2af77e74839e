//! Polls DhanHQ positions, keeps the daily P&L current and trips the local
//! kill switch when the loss limit is reached.
//!
//! # Usage
//!
//! ```sh
//! export DHAN_CLIENT_ID="your-client-id"
//! export DHAN_ACCESS_TOKEN="your-access-token"
//! export PNL_WATCH_INTERVAL_SECS=15          # optional, default 30
//! export PNL_WATCH_BROKER_KILL_SWITCH=true   # optional, also flip the broker switch
//! cargo run --bin pnl_watch --features cli
//! ```

use std::env;
use std::sync::Arc;
use std::time::Duration;

use dhan_guard::error::DhanError;
use dhan_guard::risk::TracingNotifier;
use dhan_guard::{BrokerConfig, BrokerProxy};
use tokio::time;

const DEFAULT_INTERVAL_SECS: u64 = 30;

#[tokio::main]
async fn main() -> dhan_guard::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = BrokerConfig::from_env()?;
    let interval = poll_interval()?;
    let flip_broker = env::var("PNL_WATCH_BROKER_KILL_SWITCH")
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);

    let proxy = BrokerProxy::from_config(&config, Arc::new(TracingNotifier))?;
    let settings = proxy.kill_switch().settings();
    tracing::info!(
        base_url = proxy.client().base_url(),
        settings_path = %config.settings_path.display(),
        daily_loss_limit = settings.daily_loss_limit,
        auto = settings.is_auto_kill_switch_enabled,
        interval_secs = interval.as_secs(),
        "watching daily P&L"
    );

    let mut ticker = time::interval(interval);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted; exiting");
                break;
            }
            _ = ticker.tick() => {
                match proxy.refresh_daily_pnl().await {
                    Ok(true) => {
                        if flip_broker {
                            let envelope = proxy.set_broker_kill_switch(true).await;
                            if envelope.success {
                                tracing::warn!("broker kill switch activated");
                            } else {
                                tracing::error!(
                                    status = envelope.status,
                                    error = ?envelope.error,
                                    "failed to activate broker kill switch"
                                );
                            }
                        }
                    }
                    Ok(false) => {
                        let pnl = proxy.kill_switch().daily_pnl();
                        tracing::info!(
                            total = pnl.total_daily_pnl,
                            loss = proxy.kill_switch().current_daily_loss(),
                            active = proxy.kill_switch().is_active(),
                            "P&L refreshed"
                        );
                    }
                    Err(e) => tracing::error!(error = %e, "failed to refresh positions"),
                }
            }
        }
    }

    Ok(())
}

fn poll_interval() -> dhan_guard::Result<Duration> {
    match env::var("PNL_WATCH_INTERVAL_SECS") {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| {
                DhanError::Config(format!(
                    "PNL_WATCH_INTERVAL_SECS must be a positive integer, got {raw:?}"
                ))
            }),
        Err(_) => Ok(Duration::from_secs(DEFAULT_INTERVAL_SECS)),
    }
}

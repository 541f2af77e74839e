//! Broker proxy routes.
//!
//! [`BrokerProxy`] is what the dashboard's server routes call. Each route
//! takes the raw request, fills in the configured client id, validates,
//! passes trading actions through the [`TradingGuard`], forwards to DhanHQ
//! and answers with an [`ApiEnvelope`](crate::types::envelope::ApiEnvelope).
//!
//! | Module | Routes | Guarded |
//! |---|---|---|
//! | [`orders`] | place, modify, cancel, order book | place / modify / cancel |
//! | [`super_order`] | place, cancel leg, list | place / cancel |
//! | [`forever_order`] | create, delete, list | create / delete |
//! | [`portfolio`] | positions, holdings, P&L refresh | no |
//! | [`traders_control`] | kill switch status, settings, broker kill switch | no |

pub mod forever_order;
pub mod orders;
pub mod portfolio;
pub mod super_order;
pub mod traders_control;

use std::sync::Arc;

use serde_json::Value;

use crate::client::DhanClient;
use crate::config::BrokerConfig;
use crate::error::Result;
use crate::risk::{
    JsonFileStorage, KillSwitchStore, NotificationSink, SystemClock, TradingGuard,
};

/// Validating, kill-switch-aware front of [`DhanClient`].
#[derive(Debug, Clone)]
pub struct BrokerProxy {
    client: DhanClient,
    guard: TradingGuard,
}

impl BrokerProxy {
    pub fn new(client: DhanClient, guard: TradingGuard) -> Self {
        Self { client, guard }
    }

    /// Wire everything from config: HTTP client, settings file at
    /// `config.settings_path`, wall clock.
    pub fn from_config(config: &BrokerConfig, notifier: Arc<dyn NotificationSink>) -> Result<Self> {
        let client = DhanClient::new(config)?;
        let store = Arc::new(KillSwitchStore::load(
            Arc::new(JsonFileStorage::new(&config.settings_path)),
            Arc::new(SystemClock),
        ));
        Ok(Self::new(client, TradingGuard::new(store, notifier)))
    }

    pub fn client(&self) -> &DhanClient {
        &self.client
    }

    pub fn guard(&self) -> &TradingGuard {
        &self.guard
    }

    pub fn kill_switch(&self) -> &Arc<KillSwitchStore> {
        self.guard.store()
    }

    /// Copy of `body` with `dhanClientId` set to the configured client when
    /// the caller left it out. Non-object bodies are returned unchanged for
    /// the validator to reject.
    fn with_client_id(&self, body: &Value) -> Value {
        let mut body = body.clone();
        if let Some(map) = body.as_object_mut() {
            let has_id = ["dhanClientId", "clientId"]
                .iter()
                .any(|k| map.get(*k).is_some_and(|v| !v.is_null()));
            if !has_id {
                map.insert(
                    "dhanClientId".to_owned(),
                    Value::String(self.client.client_id().to_owned()),
                );
            }
        }
        body
    }
}

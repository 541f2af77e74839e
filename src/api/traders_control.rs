//! Trader's control routes: the local kill switch and its settings, plus the
//! broker's own kill switch.

use serde_json::json;

use crate::api::BrokerProxy;
use crate::constants::paths;
use crate::error::Result;
use crate::types::BrokerKillSwitch;
use crate::types::envelope::ApiEnvelope;
use crate::types::traders_control::*;

impl BrokerProxy {
    /// Current local kill switch status.
    pub fn kill_switch_status(&self) -> ApiEnvelope<KillSwitchStatus> {
        ApiEnvelope::ok(self.kill_switch().status())
    }

    /// Current risk settings.
    pub fn traders_control_settings(&self) -> ApiEnvelope<TradersControlSettings> {
        ApiEnvelope::ok(self.kill_switch().settings())
    }

    /// Merge a settings patch. An invalid loss limit answers 400 and leaves
    /// the settings untouched.
    pub fn update_traders_control_settings(
        &self,
        patch: SettingsPatch,
    ) -> ApiEnvelope<TradersControlSettings> {
        let store = self.kill_switch();
        ApiEnvelope::from_result(store.update_settings(patch).map(|()| store.settings()))
    }

    /// Manually trip the local kill switch.
    pub fn activate_kill_switch(&self, reason: &str) -> ApiEnvelope<KillSwitchStatus> {
        let store = self.kill_switch();
        store.activate_kill_switch(reason);
        ApiEnvelope::ok(store.status())
    }

    /// Release the local kill switch.
    pub fn deactivate_kill_switch(&self) -> ApiEnvelope<KillSwitchStatus> {
        let store = self.kill_switch();
        store.deactivate_kill_switch();
        ApiEnvelope::ok(store.status())
    }

    /// Flip the broker-side kill switch for the trading day. This is
    /// independent of the local switch.
    ///
    /// **Upstream:** `POST /v2/killswitch?killSwitchStatus={ACTIVATE|DEACTIVATE}`
    pub async fn set_broker_kill_switch(&self, activate: bool) -> ApiEnvelope<KillSwitchResponse> {
        ApiEnvelope::from_result(self.try_set_broker_kill_switch(activate).await)
    }

    async fn try_set_broker_kill_switch(&self, activate: bool) -> Result<KillSwitchResponse> {
        let status = if activate {
            BrokerKillSwitch::ACTIVATE
        } else {
            BrokerKillSwitch::DEACTIVATE
        };
        tracing::info!(status = status.as_str(), "setting broker kill switch");
        let path = format!("{}?killSwitchStatus={}", paths::KILL_SWITCH, status.as_str());
        // No body; the broker expects an empty object.
        self.client.post(&path, &json!({})).await
    }
}

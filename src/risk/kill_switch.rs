//! Daily-loss kill switch.
//!
//! Two layers:
//!
//! - [`reduce`] is a pure transition function over
//!   `(TradersControlSettings, RuntimeState, KillSwitchAction)`. It never
//!   fails and does no I/O.
//! - [`KillSwitchStore`] owns one copy of that state, applies actions under a
//!   single write lock, performs the daily rollover and persists settings.
//!
//! ```text
//!             Activate{reason} / auto-check breach
//!   INACTIVE ─────────────────────────────────────▶ ACTIVE
//!       ▲                                             │
//!       └──────────── Deactivate / ResetDaily ────────┘
//! ```

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;

use crate::error::{DhanError, Result};
use crate::risk::clock::Clock;
use crate::risk::storage::SettingsStorage;
use crate::types::traders_control::{
    DailyPnLSummary, KillSwitchStatus, SettingsPatch, TradersControlSettings,
};

const MANUAL_REASON: &str = "Manually activated";

// ---------------------------------------------------------------------------
// Pure state machine
// ---------------------------------------------------------------------------

/// Session state that is never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeState {
    pub status: KillSwitchStatus,
    pub daily_pnl: DailyPnLSummary,
    /// `abs(min(total_daily_pnl, 0))`
    pub current_daily_loss: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KillSwitchAction {
    UpdateSettings(SettingsPatch),
    /// Replace the P&L snapshot, then run the auto-check.
    UpdateDailyPnL(DailyPnLSummary),
    Activate { reason: String },
    Deactivate,
    ResetDaily,
    CheckAndActivate,
}

/// Result of one [`reduce`] step.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub settings: TradersControlSettings,
    pub runtime: RuntimeState,
    /// The step moved the switch from inactive to active.
    pub activated: bool,
}

/// Apply one action.
pub fn reduce(
    settings: &TradersControlSettings,
    runtime: &RuntimeState,
    action: KillSwitchAction,
    now: DateTime<Utc>,
    today: NaiveDate,
) -> Transition {
    let mut next = Transition {
        settings: settings.clone(),
        runtime: runtime.clone(),
        activated: false,
    };

    match action {
        KillSwitchAction::UpdateSettings(patch) => {
            let patch = patch.sanitize();
            if let Some(limit) = patch.daily_loss_limit {
                next.settings.daily_loss_limit = limit;
            }
            if let Some(enabled) = patch.is_auto_kill_switch_enabled {
                next.settings.is_auto_kill_switch_enabled = enabled;
            }
        }
        KillSwitchAction::UpdateDailyPnL(summary) => {
            let summary = summary.sanitized();
            next.runtime.current_daily_loss = summary.current_loss();
            next.runtime.daily_pnl = summary;
            next.activated = auto_activate(&mut next, now);
        }
        KillSwitchAction::Activate { reason } => {
            let reason = if reason.trim().is_empty() {
                MANUAL_REASON.to_owned()
            } else {
                reason
            };
            next.activated = activate(&mut next, reason, now);
        }
        KillSwitchAction::Deactivate => deactivate(&mut next),
        KillSwitchAction::ResetDaily => {
            deactivate(&mut next);
            next.runtime = RuntimeState::default();
            next.settings.last_reset_date = today;
        }
        KillSwitchAction::CheckAndActivate => {
            next.activated = auto_activate(&mut next, now);
        }
    }

    next
}

/// Loss at or beyond the limit trips the switch (`>=`, not `>`).
fn auto_activate(next: &mut Transition, now: DateTime<Utc>) -> bool {
    if !next.settings.is_auto_kill_switch_enabled || next.runtime.status.is_active {
        return false;
    }
    let loss = next.runtime.daily_pnl.current_loss();
    let limit = next.settings.daily_loss_limit;
    if loss < limit {
        return false;
    }
    let reason = format!("Daily loss limit of ₹{limit:.2} reached (loss ₹{loss:.2})");
    activate(next, reason, now)
}

fn activate(next: &mut Transition, reason: String, now: DateTime<Utc>) -> bool {
    if next.runtime.status.is_active {
        return false;
    }
    next.runtime.status = KillSwitchStatus::active(reason, now);
    next.settings.is_kill_switch_active = true;
    next.settings.kill_switch_activated_at = Some(now);
    true
}

fn deactivate(next: &mut Transition) {
    next.runtime.status = KillSwitchStatus::inactive();
    next.settings.is_kill_switch_active = false;
    next.settings.kill_switch_activated_at = None;
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct State {
    settings: TradersControlSettings,
    runtime: RuntimeState,
}

/// The session's single kill switch.
///
/// Share it as `Arc<KillSwitchStore>`; all mutation goes through its
/// methods, each of which is one atomic [`reduce`] step. The calendar day is
/// checked before every read and write, so a switch tripped yesterday never
/// blocks today.
pub struct KillSwitchStore {
    state: RwLock<State>,
    storage: Arc<dyn SettingsStorage>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for KillSwitchStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KillSwitchStore")
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

impl KillSwitchStore {
    /// Rehydrate from storage.
    ///
    /// Settings come from `storage` (defaults on first run or unreadable
    /// storage). Status and P&L always start from their defaults; a switch
    /// persisted as active is cleared and stays off until the next P&L push or
    /// manual activation. A stale `lastResetDate` triggers the daily reset.
    ///
    /// Unreadable storage is left as it is until the next real change.
    pub fn load(storage: Arc<dyn SettingsStorage>, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        let today = clock.today();

        let (stored, readable) = match storage.load() {
            Ok(stored) => (stored, true),
            Err(e) => {
                tracing::error!(error = %e, "failed to load trader's control settings; using defaults");
                (None, false)
            }
        };
        let mut settings = stored
            .clone()
            .unwrap_or_else(|| TradersControlSettings::defaults(today));

        if settings.daily_loss_limit <= 0.0 {
            tracing::warn!(
                limit = settings.daily_loss_limit,
                "stored daily loss limit is not positive; any loss will trip the kill switch"
            );
        }

        let runtime = RuntimeState::default();
        if settings.last_reset_date != today {
            tracing::info!(
                last_reset = %settings.last_reset_date,
                %today,
                "new trading day; resetting kill switch and daily P&L"
            );
            settings = reduce(&settings, &runtime, KillSwitchAction::ResetDaily, now, today).settings;
        } else if settings.is_kill_switch_active {
            tracing::warn!(
                activated_at = ?settings.kill_switch_activated_at,
                "kill switch was active in the previous session; starting inactive"
            );
            settings.is_kill_switch_active = false;
            settings.kill_switch_activated_at = None;
        }

        let store = Self {
            state: RwLock::new(State {
                settings: settings.clone(),
                runtime,
            }),
            storage,
            clock,
        };
        if readable && stored.as_ref() != Some(&settings) {
            store.persist(&settings);
        }
        store
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn settings(&self) -> TradersControlSettings {
        self.roll_over_if_needed();
        self.state.read().settings.clone()
    }

    pub fn status(&self) -> KillSwitchStatus {
        self.roll_over_if_needed();
        self.state.read().runtime.status.clone()
    }

    pub fn daily_pnl(&self) -> DailyPnLSummary {
        self.roll_over_if_needed();
        self.state.read().runtime.daily_pnl.clone()
    }

    pub fn current_daily_loss(&self) -> f64 {
        self.roll_over_if_needed();
        self.state.read().runtime.current_daily_loss
    }

    pub fn runtime(&self) -> RuntimeState {
        self.roll_over_if_needed();
        self.state.read().runtime.clone()
    }

    pub fn is_active(&self) -> bool {
        self.status().is_active
    }

    /// The store's clock, for callers that stamp events.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Merge `patch` into the settings.
    ///
    /// A `dailyLossLimit` that is not a finite number above zero is rejected
    /// and nothing changes.
    pub fn update_settings(&self, patch: SettingsPatch) -> Result<()> {
        if let Some(limit) = patch.daily_loss_limit {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(DhanError::InvalidSettings(format!(
                    "dailyLossLimit must be greater than 0, got {limit}"
                )));
            }
        }
        self.apply(KillSwitchAction::UpdateSettings(patch));
        Ok(())
    }

    /// Replace the P&L snapshot and run the auto-check. Returns whether the
    /// switch was activated by this update.
    pub fn update_daily_pnl(&self, summary: DailyPnLSummary) -> bool {
        self.apply(KillSwitchAction::UpdateDailyPnL(summary))
    }

    pub fn activate_kill_switch(&self, reason: impl Into<String>) -> bool {
        self.apply(KillSwitchAction::Activate {
            reason: reason.into(),
        })
    }

    pub fn deactivate_kill_switch(&self) {
        self.apply(KillSwitchAction::Deactivate);
    }

    pub fn reset_daily_data(&self) {
        self.apply(KillSwitchAction::ResetDaily);
    }

    /// Activate if the loss limit is breached and auto mode is on. Returns
    /// `false` when already active, auto mode is off, or the loss is below
    /// the limit.
    pub fn check_and_activate_kill_switch(&self) -> bool {
        self.apply(KillSwitchAction::CheckAndActivate)
    }

    /// Apply any action (after the daily rollover check). Returns whether the
    /// switch was activated.
    pub(crate) fn apply(&self, action: KillSwitchAction) -> bool {
        let now = self.clock.now();
        let today = self.clock.today();
        let mut state = self.state.write();
        let before = state.settings.clone();

        if state.settings.last_reset_date != today {
            Self::roll_over(&mut state, now, today);
        }

        let t = reduce(&state.settings, &state.runtime, action, now, today);
        if t.activated {
            tracing::warn!(reason = %t.runtime.status.reason, "kill switch activated");
        } else if state.runtime.status.is_active && !t.runtime.status.is_active {
            tracing::info!("kill switch deactivated");
        }
        state.settings = t.settings;
        state.runtime = t.runtime;

        if state.settings != before {
            self.persist(&state.settings);
        }
        t.activated
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    fn roll_over_if_needed(&self) {
        let today = self.clock.today();
        if self.state.read().settings.last_reset_date == today {
            return;
        }
        let now = self.clock.now();
        let mut state = self.state.write();
        if state.settings.last_reset_date != today {
            Self::roll_over(&mut state, now, today);
            self.persist(&state.settings);
        }
    }

    fn roll_over(state: &mut State, now: DateTime<Utc>, today: NaiveDate) {
        tracing::info!(
            last_reset = %state.settings.last_reset_date,
            %today,
            "new trading day; resetting kill switch and daily P&L"
        );
        let t = reduce(
            &state.settings,
            &state.runtime,
            KillSwitchAction::ResetDaily,
            now,
            today,
        );
        state.settings = t.settings;
        state.runtime = t.runtime;
    }

    fn persist(&self, settings: &TradersControlSettings) {
        if let Err(e) = self.storage.save(settings) {
            tracing::error!(error = %e, "failed to persist trader's control settings");
        }
    }
}

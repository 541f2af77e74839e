//! Trader's control: the daily-loss kill switch and the trading guard.
//!
//! - [`kill_switch`]: pure reducer plus [`KillSwitchStore`]
//! - [`guard`]: [`TradingGuard`], consulted before every trading action
//! - [`storage`]: settings persistence ([`JsonFileStorage`], [`MemoryStorage`])
//! - [`notify`]: user-facing notifications
//! - [`clock`]: time source ([`SystemClock`], [`FixedClock`])
//!
//! ```no_run
//! use std::sync::Arc;
//! use dhan_guard::risk::*;
//!
//! let store = Arc::new(KillSwitchStore::load(
//!     Arc::new(JsonFileStorage::new("traders-control-storage.json")),
//!     Arc::new(SystemClock),
//! ));
//! let guard = TradingGuard::new(store.clone(), Arc::new(TracingNotifier));
//! assert!(guard.check_trading_allowed(None) || store.is_active());
//! ```

pub mod clock;
pub mod guard;
pub mod kill_switch;
pub mod notify;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use guard::{TradeKind, TradeOperation, TradingGuard};
pub use kill_switch::{KillSwitchAction, KillSwitchStore, RuntimeState, Transition, reduce};
pub use notify::{Notification, NotificationKind, NotificationSink, RecordingNotifier, TracingNotifier};
pub use storage::{JsonFileStorage, MemoryStorage, SettingsStorage};

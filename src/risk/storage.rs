//! Persistence for [`TradersControlSettings`].
//!
//! Only settings are stored. Kill switch status and P&L are session state and
//! never reach a [`SettingsStorage`].

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::traders_control::TradersControlSettings;

pub trait SettingsStorage: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<TradersControlSettings>>;

    fn save(&self, settings: &TradersControlSettings) -> Result<()>;
}

/// On-disk layout, `{ "state": { "settings": {…} }, "version": 0 }`.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    state: PersistedSettings,
    #[serde(default)]
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedSettings {
    settings: TradersControlSettings,
}

const STORAGE_VERSION: u32 = 0;

/// JSON file storage.
///
/// Saves write a `.tmp` sibling and rename it over the target, so a crash
/// mid-write never leaves a truncated file. A file that fails to parse is
/// copied to a `.corrupt` sibling and reported as an error.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unparsable settings file is copied on load.
    pub fn backup_path(&self) -> PathBuf {
        self.sibling(".corrupt")
    }

    /// `<file name><suffix>` in the settings file's directory.
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(suffix);
        self.path.with_file_name(name)
    }
}

impl SettingsStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<TradersControlSettings>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<PersistedState>(&raw) {
            Ok(persisted) => Ok(Some(persisted.state.settings)),
            Err(e) => {
                let backup = self.backup_path();
                match fs::write(&backup, &raw) {
                    Ok(()) => tracing::warn!(
                        path = %self.path.display(),
                        backup = %backup.display(),
                        error = %e,
                        "unreadable trader's control settings; copy kept"
                    ),
                    Err(io) => tracing::warn!(
                        path = %self.path.display(),
                        error = %e,
                        backup_error = %io,
                        "unreadable trader's control settings; no copy kept"
                    ),
                }
                Err(e.into())
            }
        }
    }

    fn save(&self, settings: &TradersControlSettings) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let persisted = PersistedState {
            state: PersistedSettings {
                settings: settings.clone(),
            },
            version: STORAGE_VERSION,
        };
        let tmp = self.sibling(".tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&persisted)?)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "trader's control settings saved");
        Ok(())
    }
}

/// In-process storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    settings: Mutex<Option<TradersControlSettings>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with settings already "persisted" by an earlier session.
    pub fn with_settings(settings: TradersControlSettings) -> Self {
        Self {
            settings: Mutex::new(Some(settings)),
        }
    }

    /// What was last saved.
    pub fn saved(&self) -> Option<TradersControlSettings> {
        self.settings.lock().clone()
    }
}

impl SettingsStorage for MemoryStorage {
    fn load(&self) -> Result<Option<TradersControlSettings>> {
        Ok(self.settings.lock().clone())
    }

    fn save(&self, settings: &TradersControlSettings) -> Result<()> {
        *self.settings.lock() = Some(settings.clone());
        Ok(())
    }
}

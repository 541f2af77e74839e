//! Broker connection settings, read from the environment.
//!
//! Credentials never live in files; the dashboard process is started with
//! them exported:
//!
//! | Variable | Required | Default |
//! |---|---|---|
//! | `DHAN_CLIENT_ID` | yes | |
//! | `DHAN_ACCESS_TOKEN` | yes | |
//! | `DHAN_BASE_URL` | no | [`API_BASE_URL`] |
//! | `DHAN_HTTP_TIMEOUT_SECS` | no | [`DEFAULT_HTTP_TIMEOUT_SECS`] |
//! | `DHAN_SETTINGS_PATH` | no | `./traders-control-storage.json` |

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::constants::{API_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS, SETTINGS_STORAGE_KEY};
use crate::error::{DhanError, Result};

/// Connection settings for [`DhanClient`](crate::client::DhanClient).
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    /// The Dhan client ID.
    pub client_id: String,
    /// JWT access token.
    pub access_token: String,
    /// REST base URL, without trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Where the trader's-control settings file lives.
    pub settings_path: PathBuf,
}

impl BrokerConfig {
    /// Build a config for the production API with default timeout and
    /// settings path.
    pub fn new(client_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            access_token: access_token.into(),
            base_url: API_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            settings_path: default_settings_path(),
        }
    }

    /// Point the config at another base URL (sandbox, mock server).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }

    /// Load the config from `DHAN_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| DhanError::Config(format!("{key} is not set")))
        };

        let mut config = Self::new(required("DHAN_CLIENT_ID")?, required("DHAN_ACCESS_TOKEN")?);

        if let Some(base_url) = lookup("DHAN_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(&base_url)?;
        }

        if let Some(raw) = lookup("DHAN_HTTP_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    DhanError::Config(format!(
                        "DHAN_HTTP_TIMEOUT_SECS must be a positive integer, got {raw:?}"
                    ))
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(path) = lookup("DHAN_SETTINGS_PATH").filter(|v| !v.trim().is_empty()) {
            config.settings_path = PathBuf::from(path);
        }

        tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "broker config loaded");
        Ok(config)
    }
}

/// `./traders-control-storage.json`
pub fn default_settings_path() -> PathBuf {
    PathBuf::from(format!("{SETTINGS_STORAGE_KEY}.json"))
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url.as_str().trim_end_matches('/').to_owned()),
        other => Err(DhanError::Config(format!(
            "DHAN_BASE_URL must be http(s), got scheme {other:?}"
        ))),
    }
}

//! Persistent settings for the `elimu` command line driver.

mod persistence;

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use elimu_api::{ApiConfig, DEFAULT_TIMEOUT, PRODUCTION_API_URL};
use serde::{Deserialize, Serialize};

pub use persistence::{
    load_settings, load_settings_from, save_settings, save_settings_to, session_path,
    settings_path,
};

/// Host reported when none is configured. Anything other than `localhost`
/// selects the production backend.
pub const DEFAULT_HOST: &str = "elimu-online";

/// Origin of the development storefront, used to recognise same-origin links.
pub const DEFAULT_ORIGIN: &str = "http://localhost:5173";

/// Settings stored in `settings.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Host the storefront is served from; drives backend selection.
    pub host: String,
    /// Backend used for non-local hosts.
    pub production_url: String,
    /// Explicit backend, bypassing host detection.
    pub base_url: Option<String>,
    /// Origin used for link interception while browsing.
    pub origin: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            production_url: PRODUCTION_API_URL.to_string(),
            base_url: None,
            origin: DEFAULT_ORIGIN.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Settings {
    /// Resolve the backend configuration.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        let config = match self.base_url.as_deref().filter(|url| !url.trim().is_empty()) {
            Some(url) => ApiConfig::with_base_url(url),
            None => ApiConfig::for_host(&self.host, &self.production_url),
        };
        config.with_timeout(Duration::from_secs(self.timeout_secs))
    }

    /// Update one setting from its textual form.
    ///
    /// An empty value clears `base-url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty or not valid for the key.
    pub fn set(&mut self, key: SettingKey, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            SettingKey::BaseUrl => {
                self.base_url = (!value.is_empty()).then(|| value.to_string());
                return Ok(());
            }
            _ if value.is_empty() => bail!("{key} cannot be empty"),
            SettingKey::Host => self.host = value.to_string(),
            SettingKey::ProductionUrl => self.production_url = require_http(key, value)?,
            SettingKey::Origin => self.origin = require_http(key, value)?,
            SettingKey::TimeoutSecs => {
                let secs: u64 = value
                    .parse()
                    .with_context(|| format!("{key} must be a whole number of seconds"))?;
                if secs == 0 {
                    bail!("{key} must be at least 1");
                }
                self.timeout_secs = secs;
            }
        }
        Ok(())
    }

    /// Current value of one setting, as shown by `config show`.
    #[must_use]
    pub fn get(&self, key: SettingKey) -> String {
        match key {
            SettingKey::Host => self.host.clone(),
            SettingKey::ProductionUrl => self.production_url.clone(),
            SettingKey::BaseUrl => self.base_url.clone().unwrap_or_default(),
            SettingKey::Origin => self.origin.clone(),
            SettingKey::TimeoutSecs => self.timeout_secs.to_string(),
        }
    }
}

fn require_http(key: SettingKey, value: &str) -> Result<String> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value.trim_end_matches('/').to_string())
    } else {
        bail!("{key} must start with http:// or https://")
    }
}

/// Keys accepted by `elimu config set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SettingKey {
    /// Host the storefront is served from.
    Host,
    /// Backend used for non-local hosts.
    ProductionUrl,
    /// Explicit backend override.
    BaseUrl,
    /// Origin for same-origin link checks.
    Origin,
    /// Per-request timeout in seconds.
    TimeoutSecs,
}

impl SettingKey {
    /// All keys in display order.
    #[must_use]
    pub const fn all() -> &'static [SettingKey] {
        &[
            Self::Host,
            Self::ProductionUrl,
            Self::BaseUrl,
            Self::Origin,
            Self::TimeoutSecs,
        ]
    }

    /// Name used on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::ProductionUrl => "production-url",
            Self::BaseUrl => "base-url",
            Self::Origin => "origin",
            Self::TimeoutSecs => "timeout-secs",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

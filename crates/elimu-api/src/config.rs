//! Backend endpoint selection.

use std::fmt;
use std::time::Duration;

/// Backend used when running against a local development host.
pub const LOCAL_API_URL: &str = "http://127.0.0.1:8000/api";

/// Production backend.
pub const PRODUCTION_API_URL: &str = "https://elimu-backend-59739536402.europe-west1.run.app/api";

/// Default per-request timeout. A timeout is reported as a network failure.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Hosts treated as local development.
const LOCAL_HOSTS: &[&str] = &["localhost", "127.0.0.1"];

/// Resolved backend configuration.
///
/// Chosen once when a client is built and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    timeout: Duration,
}

impl ApiConfig {
    /// Select the backend for the host the app is served from.
    ///
    /// `localhost` and `127.0.0.1` use [`LOCAL_API_URL`]; any other host uses
    /// `production_url`.
    #[must_use]
    pub fn for_host(host: &str, production_url: &str) -> Self {
        let host = host.trim().to_ascii_lowercase();
        let base_url = if LOCAL_HOSTS.contains(&host.as_str()) {
            LOCAL_API_URL
        } else {
            production_url
        };
        tracing::info!("API base URL: {} (host: {})", base_url, host);
        Self::with_base_url(base_url)
    }

    /// Use an explicit base URL, bypassing host detection.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Join an endpoint path onto the base URL.
    ///
    /// The path's own trailing slash is preserved; the backend routes
    /// `/resources/` and `/resources` differently.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::with_base_url(PRODUCTION_API_URL)
    }
}

impl fmt::Display for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_url)
    }
}

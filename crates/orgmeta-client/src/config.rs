//! Client configuration.

use serde::{Deserialize, Serialize};

/// Org client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL for the API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Authentication token (sent as a bearer token when set).
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `ORGMETA_API_URL` | API base URL (default: `https://api.github.com`) |
    /// | `ORGMETA_TOKEN` | Authentication token (falls back to `GITHUB_TOKEN`) |
    /// | `ORGMETA_TIMEOUT` | Request timeout in seconds (default: 30) |
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("ORGMETA_API_URL").unwrap_or_else(|_| default_api_url()),
            token: std::env::var("ORGMETA_TOKEN")
                .or_else(|_| std::env::var("GITHUB_TOKEN"))
                .ok(),
            timeout_secs: std::env::var("ORGMETA_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
        }
    }

    /// Set the base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

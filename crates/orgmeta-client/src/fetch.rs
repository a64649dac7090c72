//! JSON fetch collaborator: trait seam plus the reqwest implementation.
//!
//! This is the ONLY place for status code handling. client.rs never
//! interprets status codes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

const USER_AGENT_VALUE: &str = concat!("orgmeta-client/", env!("CARGO_PKG_VERSION"));

/// The injected fetch capability: one GET, parsed JSON body back.
///
/// Tests substitute a fake implementation; production uses [`HttpFetcher`].
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// Perform a single GET of `url` and return the parsed JSON body
    /// unmodified.
    async fn get_json(&self, url: &str) -> ClientResult<Value>;
}

/// Production fetcher over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    token: Option<String>,
}

impl HttpFetcher {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| ClientError::Network {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            token: config.token.clone(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn get_json(&self, url: &str) -> ClientResult<Value> {
        debug!(url = %url, "GET json");

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await?;
        let status = response.status();

        match status.as_u16() {
            200..=299 => response
                .json()
                .await
                .map_err(|e| ClientError::InvalidResponse {
                    message: format!("failed to parse JSON body: {}", e),
                }),

            401 => Err(ClientError::Unauthorized {
                message: "invalid or expired token".to_string(),
            }),

            404 => Err(ClientError::NotFound {
                url: url.to_string(),
            }),

            429 => {
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .map(Duration::from_secs);

                Err(ClientError::RateLimited { retry_after })
            }

            _ => {
                let message = response.text().await.unwrap_or_else(|_| status.to_string());
                Err(ClientError::Network {
                    message: format!("HTTP {}: {}", status.as_u16(), message),
                })
            }
        }
    }
}

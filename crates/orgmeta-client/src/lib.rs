//! GitHub organization metadata client.
//!
//! This crate provides:
//!
//! - An HTTP JSON fetch seam ([`JsonFetcher`]) with a reqwest-backed
//!   production implementation and fake-friendly injection for tests
//! - An org client with memoized payload access and license filtering
//! - A nested JSON accessor with deterministic missing-key errors
//! - A per-instance memoization cell
//!
//! # Quick Start
//!
//! ```no_run
//! use orgmeta_client::{ClientConfig, OrgClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! // Create client from environment
//! let config = ClientConfig::from_env();
//! let client = OrgClient::new("google", config)?;
//!
//! // Fetch the org payload (memoized: one fetch per client)
//! let org = client.org().await?;
//! println!("org payload: {}", org);
//!
//! // List Apache-2.0 repos
//! let repos = client.public_repos(Some("apache-2.0")).await?;
//! println!("{} repos", repos.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `ORGMETA_API_URL` | API base URL (default: `https://api.github.com`) |
//! | `ORGMETA_TOKEN` | Authentication token (falls back to `GITHUB_TOKEN`) |
//! | `ORGMETA_TIMEOUT` | Request timeout in seconds (default: 30) |

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod memo;
pub mod nested;

// Re-export main types
pub use client::OrgClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use fetch::{HttpFetcher, JsonFetcher};
pub use memo::MemoCell;
pub use nested::access_nested;

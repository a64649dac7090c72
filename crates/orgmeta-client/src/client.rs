//! Org client: memoized access to an organization's metadata and repos.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in fetch.rs.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::fetch::{HttpFetcher, JsonFetcher};
use crate::memo::MemoCell;
use crate::nested::access_nested;

/// Client for a single organization's metadata.
///
/// Each remote payload is fetched at most once per client instance: the org
/// payload and the repos payload live in per-instance memo cells.
pub struct OrgClient {
    org_name: String,
    api_url: String,
    fetcher: Arc<dyn JsonFetcher>,
    org_payload: MemoCell<Value>,
    repos_payload: MemoCell<Value>,
}

impl OrgClient {
    pub fn new(org_name: impl Into<String>, config: ClientConfig) -> ClientResult<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(org_name, config.api_url, Arc::new(fetcher)))
    }

    pub fn from_env(org_name: impl Into<String>) -> ClientResult<Self> {
        Self::new(org_name, ClientConfig::from_env())
    }

    /// Build a client around an injected fetch capability.
    ///
    /// Tests use this to substitute a fake fetcher for the real HTTP one.
    pub fn with_fetcher(
        org_name: impl Into<String>,
        api_url: impl Into<String>,
        fetcher: Arc<dyn JsonFetcher>,
    ) -> Self {
        Self {
            org_name: org_name.into(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            fetcher,
            org_payload: MemoCell::new(),
            repos_payload: MemoCell::new(),
        }
    }

    /// The org payload, fetched from `{api_url}/orgs/{org_name}` on first
    /// read and returned unmodified. Later reads hit the memo cell.
    pub async fn org(&self) -> ClientResult<&Value> {
        self.org_payload
            .get_or_try_compute(|| async {
                let url = self.org_url();
                debug!(url = %url, org = %self.org_name, "fetching org payload");
                self.fetcher.get_json(&url).await
            })
            .await
    }

    /// The org's `repos_url` field.
    pub async fn public_repos_url(&self) -> ClientResult<&str> {
        let org = self.org().await?;
        access_nested(org, &["repos_url"])?
            .as_str()
            .ok_or_else(|| ClientError::InvalidResponse {
                message: "repos_url is not a string".to_string(),
            })
    }

    /// The repos payload, fetched from the org's `repos_url` on first read.
    pub async fn repos_payload(&self) -> ClientResult<&Value> {
        let url = self.public_repos_url().await?.to_string();
        self.repos_payload
            .get_or_try_compute(|| async {
                debug!(url = %url, org = %self.org_name, "fetching repos payload");
                self.fetcher.get_json(&url).await
            })
            .await
    }

    /// Names of the org's public repos, optionally restricted to repos whose
    /// `license.key` equals `license`.
    pub async fn public_repos(&self, license: Option<&str>) -> ClientResult<Vec<String>> {
        let payload = self.repos_payload().await?;
        let repos = payload
            .as_array()
            .ok_or_else(|| ClientError::InvalidResponse {
                message: "repos payload is not an array".to_string(),
            })?;

        let mut names = Vec::with_capacity(repos.len());
        for repo in repos {
            if let Some(key) = license {
                if !Self::has_license(repo, key) {
                    continue;
                }
            }
            let name = access_nested(repo, &["name"])?.as_str().ok_or_else(|| {
                ClientError::InvalidResponse {
                    message: "repo name is not a string".to_string(),
                }
            })?;
            names.push(name.to_string());
        }
        Ok(names)
    }

    /// Whether `repo` declares the given license key.
    ///
    /// A repo without a `license.key` path never matches.
    pub fn has_license(repo: &Value, license_key: &str) -> bool {
        access_nested(repo, &["license", "key"])
            .map(|v| v.as_str() == Some(license_key))
            .unwrap_or(false)
    }

    pub fn org_name(&self) -> &str {
        &self.org_name
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn org_url(&self) -> String {
        format!("{}/orgs/{}", self.api_url, self.org_name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;

    /// Fake fetch collaborator: canned responses keyed by URL, and a record
    /// of every call made.
    struct FakeFetcher {
        responses: HashMap<String, Value>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        fn new(responses: Vec<(&str, Value)>) -> Arc<Self> {
            Arc::new(Self {
                responses: responses
                    .into_iter()
                    .map(|(url, v)| (url.to_string(), v))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl JsonFetcher for FakeFetcher {
        async fn get_json(&self, url: &str) -> ClientResult<Value> {
            self.calls.lock().unwrap().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| ClientError::NotFound {
                    url: url.to_string(),
                })
        }
    }

    const API: &str = "https://api.github.com";

    #[tokio::test]
    async fn test_org_uses_url_template_and_fetches_once() {
        let payload = json!({"payload": true});
        let fetcher = FakeFetcher::new(vec![("https://api.github.com/orgs/google", payload.clone())]);
        let client = OrgClient::with_fetcher("google", API, fetcher.clone());

        let first = client.org().await.expect("org failed").clone();
        let second = client.org().await.expect("org failed").clone();

        assert_eq!(first, payload);
        assert_eq!(second, payload);
        assert_eq!(
            fetcher.calls(),
            vec!["https://api.github.com/orgs/google".to_string()],
            "org payload must be fetched exactly once"
        );
    }

    #[tokio::test]
    async fn test_org_payload_passed_through_unmodified() {
        let payload = json!({"payload": false, "login": "abc", "repos_url": null});
        let fetcher = FakeFetcher::new(vec![("https://api.github.com/orgs/abc", payload.clone())]);
        let client = OrgClient::with_fetcher("abc", API, fetcher);

        assert_eq!(client.org().await.unwrap(), &payload);
    }

    #[tokio::test]
    async fn test_org_fetch_error_propagates_and_does_not_poison() {
        let fetcher = FakeFetcher::new(vec![]);
        let client = OrgClient::with_fetcher("missing", API, fetcher.clone());

        let err = client.org().await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound { .. }));

        // A failed fetch is not cached: the next read tries again.
        let _ = client.org().await.unwrap_err();
        assert_eq!(fetcher.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_public_repos_url() {
        let org = json!({"repos_url": "https://api.github.com/orgs/google/repos"});
        let fetcher = FakeFetcher::new(vec![("https://api.github.com/orgs/google", org)]);
        let client = OrgClient::with_fetcher("google", API, fetcher);

        assert_eq!(
            client.public_repos_url().await.unwrap(),
            "https://api.github.com/orgs/google/repos"
        );
    }

    #[tokio::test]
    async fn test_public_repos_url_missing_field() {
        let fetcher = FakeFetcher::new(vec![("https://api.github.com/orgs/google", json!({}))]);
        let client = OrgClient::with_fetcher("google", API, fetcher);

        let err = client.public_repos_url().await.unwrap_err();
        assert!(matches!(err, ClientError::KeyNotFound { ref key } if key == "repos_url"));
    }

    #[tokio::test]
    async fn test_repos_payload_memoized() {
        let org = json!({"repos_url": "https://api.github.com/orgs/google/repos"});
        let repos = json!([{"name": "truth"}, {"name": "ruby-openid-apps-discovery"}]);
        let fetcher = FakeFetcher::new(vec![
            ("https://api.github.com/orgs/google", org),
            ("https://api.github.com/orgs/google/repos", repos.clone()),
        ]);
        let client = OrgClient::with_fetcher("google", API, fetcher.clone());

        assert_eq!(client.repos_payload().await.unwrap(), &repos);
        assert_eq!(client.repos_payload().await.unwrap(), &repos);

        // One org fetch + one repos fetch, in order, despite repeated reads.
        assert_eq!(
            fetcher.calls(),
            vec![
                "https://api.github.com/orgs/google".to_string(),
                "https://api.github.com/orgs/google/repos".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_public_repos_without_filter() {
        let org = json!({"repos_url": "https://api.github.com/orgs/google/repos"});
        let repos = json!([
            {"name": "truth", "license": {"key": "apache-2.0"}},
            {"name": "cpp-netlib", "license": {"key": "bsl-1.0"}},
            {"name": "unlicensed"}
        ]);
        let fetcher = FakeFetcher::new(vec![
            ("https://api.github.com/orgs/google", org),
            ("https://api.github.com/orgs/google/repos", repos),
        ]);
        let client = OrgClient::with_fetcher("google", API, fetcher);

        assert_eq!(
            client.public_repos(None).await.unwrap(),
            vec!["truth", "cpp-netlib", "unlicensed"]
        );
    }

    #[tokio::test]
    async fn test_public_repos_with_license_filter() {
        let org = json!({"repos_url": "https://api.github.com/orgs/google/repos"});
        let repos = json!([
            {"name": "truth", "license": {"key": "apache-2.0"}},
            {"name": "cpp-netlib", "license": {"key": "bsl-1.0"}},
            {"name": "unlicensed"}
        ]);
        let fetcher = FakeFetcher::new(vec![
            ("https://api.github.com/orgs/google", org),
            ("https://api.github.com/orgs/google/repos", repos),
        ]);
        let client = OrgClient::with_fetcher("google", API, fetcher);

        assert_eq!(
            client.public_repos(Some("apache-2.0")).await.unwrap(),
            vec!["truth"]
        );
    }

    #[tokio::test]
    async fn test_has_license() {
        let repo = json!({"license": {"key": "my_license"}});
        assert!(OrgClient::has_license(&repo, "my_license"));
        assert!(!OrgClient::has_license(&repo, "other_license"));

        let no_license = json!({"name": "bare"});
        assert!(!OrgClient::has_license(&no_license, "my_license"));

        let null_license = json!({"license": null});
        assert!(!OrgClient::has_license(&null_license, "my_license"));
    }

    #[tokio::test]
    async fn test_api_url_trailing_slash_trimmed() {
        let fetcher = FakeFetcher::new(vec![("https://api.github.com/orgs/google", json!({}))]);
        let client = OrgClient::with_fetcher("google", "https://api.github.com/", fetcher.clone());

        client.org().await.unwrap();
        assert_eq!(fetcher.calls()[0], "https://api.github.com/orgs/google");
    }
}

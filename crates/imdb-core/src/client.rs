//! HTTP client plumbing for imdb.com
//!
//! This module builds requests and owns the decorated transport stack.
//! The transport is assembled lazily, exactly once per client instance;
//! concurrent first callers all observe the same built transport.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderValue, USER_AGENT};
use reqwest::{Method, Request, Url};
use tokio::sync::OnceCell;

use crate::error::{ImdbError, Result};
use crate::transport::{CacheTransport, HttpTransport, LogTransport, Transport};

/// Base URL for imdb.com
const IMDB_BASE_URL: &str = "https://www.imdb.com";

/// Default User-Agent sent with every request
const DEFAULT_USER_AGENT: &str = "wget";

/// Default cache freshness window
const DEFAULT_CACHE_TTL_SECS: u64 = 24 * 60 * 60;

/// Configuration for the IMDb HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site base URL (default: `https://www.imdb.com`)
    pub base_url: String,
    /// User-Agent header value; an empty string sends no header
    pub user_agent: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Cache directory; `None` disables the disk cache
    pub cache_dir: Option<PathBuf>,
    /// Cache entry freshness in seconds (default: 24 hours)
    pub cache_ttl_secs: u64,
    /// Wrap the transport with request/response logging
    pub http_log: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: IMDB_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            cache_dir: None,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            http_log: false,
        }
    }
}

/// HTTP client for imdb.com
///
/// Holds the configuration and the lazily built transport. The transport
/// stack is, innermost first: the injected or default [`HttpTransport`],
/// an optional [`CacheTransport`], an optional [`LogTransport`].
pub struct ImdbClient {
    config: ClientConfig,
    base_transport: Option<Arc<dyn Transport>>,
    transport: OnceCell<Arc<dyn Transport>>,
}

impl ImdbClient {
    /// Create a client with default configuration.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            config,
            base_transport: None,
            transport: OnceCell::new(),
        }
    }

    /// Replace the base transport, keeping the configured decorators.
    ///
    /// Useful for testing or for supplying a pre-configured transport.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.base_transport = Some(transport);
        self
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The decorated transport, built exactly once on first use.
    async fn transport(&self) -> Result<&Arc<dyn Transport>> {
        self.transport
            .get_or_try_init(|| self.build_transport())
            .await
    }

    /// Assemble the transport stack from the configuration.
    async fn build_transport(&self) -> Result<Arc<dyn Transport>> {
        let mut transport: Arc<dyn Transport> = match &self.base_transport {
            Some(transport) => transport.clone(),
            None => Arc::new(HttpTransport::new(Duration::from_secs(
                self.config.timeout_secs,
            ))?),
        };
        if let Some(dir) = &self.config.cache_dir {
            transport = Arc::new(
                CacheTransport::new(
                    transport,
                    dir.clone(),
                    Duration::from_secs(self.config.cache_ttl_secs),
                )
                .await?,
            );
        }
        if self.config.http_log {
            transport = Arc::new(LogTransport::new(transport));
        }
        Ok(transport)
    }

    /// Build a request for the given URL and flat key/value parameter list.
    ///
    /// Supplied pairs fully replace any query string already present on
    /// `urlstr`.
    ///
    /// # Errors
    /// - `ImdbError::InvalidParams` if `params` has odd length
    /// - `ImdbError::InvalidUrl` if `urlstr` does not parse
    pub(crate) fn build_request(
        &self,
        method: Method,
        urlstr: &str,
        params: &[&str],
    ) -> Result<Request> {
        if params.len() % 2 != 0 {
            return Err(ImdbError::InvalidParams(params.len()));
        }
        let mut url = Url::parse(urlstr).map_err(|e| ImdbError::InvalidUrl(e.to_string()))?;
        if params.is_empty() {
            url.set_query(None);
        } else {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            for pair in params.chunks(2) {
                pairs.append_pair(pair[0], pair[1]);
            }
        }
        let mut request = Request::new(method, url);
        if !self.config.user_agent.is_empty() {
            if let Ok(value) = HeaderValue::from_str(&self.config.user_agent) {
                request.headers_mut().insert(USER_AGENT, value);
            }
        }
        Ok(request)
    }

    /// GET a site path and return the response body.
    ///
    /// # Errors
    /// - `ImdbError::InvalidParams` for an odd parameter list
    /// - `ImdbError::Http` for transport-level failures
    /// - `ImdbError::Status` for non-2xx responses
    pub(crate) async fn get(&self, path: &str, params: &[&str]) -> Result<String> {
        let transport = self.transport().await?;
        let url = format!("{}{}", self.config.base_url, path);
        let request = self.build_request(Method::GET, &url, params)?;
        let response = transport.execute(request).await?;
        if !response.is_success() {
            return Err(ImdbError::Status(response.status.as_u16()));
        }
        Ok(response.text())
    }
}

impl Default for ImdbClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_build_request_odd_params() {
        let client = ImdbClient::new();
        let result = client.build_request(Method::GET, "https://www.imdb.com/find", &["q"]);
        match result {
            Err(ImdbError::InvalidParams(n)) => assert_eq!(n, 1),
            _ => panic!("expected InvalidParams"),
        }

        let result =
            client.build_request(Method::GET, "https://www.imdb.com/find", &["a", "b", "c"]);
        match result {
            Err(ImdbError::InvalidParams(n)) => assert_eq!(n, 3),
            _ => panic!("expected InvalidParams"),
        }
    }

    #[test]
    fn test_build_request_encodes_query() {
        let client = ImdbClient::new();
        let request = client
            .build_request(
                Method::GET,
                "https://www.imdb.com/find",
                &["q", "bobs burgers", "s", "tt"],
            )
            .unwrap();
        assert_eq!(request.url().query(), Some("q=bobs+burgers&s=tt"));
    }

    #[test]
    fn test_build_request_replaces_existing_query() {
        let client = ImdbClient::new();
        let request = client
            .build_request(Method::GET, "https://www.imdb.com/find?stale=1", &["q", "x"])
            .unwrap();
        assert_eq!(request.url().query(), Some("q=x"));

        let request = client
            .build_request(Method::GET, "https://www.imdb.com/find?stale=1", &[])
            .unwrap();
        assert_eq!(request.url().query(), None);
    }

    #[test]
    fn test_build_request_user_agent() {
        let client = ImdbClient::new();
        let request = client
            .build_request(Method::GET, "https://www.imdb.com/find", &[])
            .unwrap();
        assert_eq!(request.headers().get(USER_AGENT).unwrap(), "wget");

        let client = ImdbClient::with_config(ClientConfig {
            user_agent: String::new(),
            ..ClientConfig::default()
        });
        let request = client
            .build_request(Method::GET, "https://www.imdb.com/find", &[])
            .unwrap();
        assert!(request.headers().get(USER_AGENT).is_none());
    }

    #[test]
    fn test_build_request_invalid_url() {
        let client = ImdbClient::new();
        let result = client.build_request(Method::GET, "not a url", &[]);
        assert!(matches!(result, Err(ImdbError::InvalidUrl(_))));
    }

    proptest! {
        /// InvalidParams is raised iff the flat parameter list has odd length.
        #[test]
        fn test_params_parity(
            pairs in proptest::collection::vec(("[a-z]{1,8}", "[a-z0-9 ]{0,8}"), 0..6)
        ) {
            let client = ImdbClient::new();
            let flat: Vec<&str> = pairs
                .iter()
                .flat_map(|(k, v)| [k.as_str(), v.as_str()])
                .collect();
            prop_assert!(client
                .build_request(Method::GET, "https://www.imdb.com/find", &flat)
                .is_ok());

            let mut odd = flat.clone();
            odd.push("dangling");
            prop_assert!(matches!(
                client.build_request(Method::GET, "https://www.imdb.com/find", &odd),
                Err(ImdbError::InvalidParams(n)) if n == odd.len()
            ));
        }
    }

    #[tokio::test]
    async fn test_transport_built_once_under_concurrency() {
        let client = Arc::new(ImdbClient::new());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let client = client.clone();
            handles.push(tokio::spawn(async move {
                client.transport().await.unwrap().clone()
            }));
        }

        let mut transports = Vec::new();
        for handle in handles {
            transports.push(handle.await.unwrap());
        }
        let first = &transports[0];
        assert!(transports.iter().all(|t| Arc::ptr_eq(first, t)));
    }

    #[tokio::test]
    async fn test_transport_reused_across_calls() {
        let client = ImdbClient::new();
        let first = client.transport().await.unwrap().clone();
        let second = client.transport().await.unwrap().clone();
        assert!(Arc::ptr_eq(&first, &second));
    }
}

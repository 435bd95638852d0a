//! Disk-backed response cache transport
//!
//! Wraps another [`Transport`] and persists successful responses under a
//! cache directory. Entries are keyed by a SHA-256 digest of the request
//! method and URL; each entry is a body file plus a JSON metadata sidecar
//! holding the status, an allow-listed subset of the response headers, and
//! the storage timestamp used for TTL freshness checks.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Request, StatusCode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::{Response, Transport};
use crate::error::Result;

/// Response headers persisted alongside the cached body.
const HEADER_ALLOWLIST: [&str; 4] = ["date", "set-cookie", "content-type", "location"];

/// Metadata sidecar stored next to the cached body.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    method: String,
    status: u16,
    headers: Vec<(String, String)>,
    /// Unix timestamp (seconds) of when the entry was written
    stored_at: u64,
}

/// Transport decorator that serves fresh cached responses from disk.
///
/// Only success responses are stored; error responses always pass through
/// uncached. Unreadable, corrupt or stale entries are treated as misses.
pub struct CacheTransport {
    inner: Arc<dyn Transport>,
    dir: PathBuf,
    ttl: Duration,
}

impl CacheTransport {
    /// Wrap `inner` with a cache rooted at `dir`, creating the directory if
    /// needed. Entries older than `ttl` are refetched.
    ///
    /// # Errors
    /// Returns an error if the cache directory cannot be created.
    pub async fn new(
        inner: Arc<dyn Transport>,
        dir: impl Into<PathBuf>,
        ttl: Duration,
    ) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { inner, dir, ttl })
    }

    /// Cache key for a request: hex SHA-256 of `<METHOD> <URL>`.
    fn cache_key(method: &str, url: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(method.as_bytes());
        hasher.update(b" ");
        hasher.update(url.as_bytes());
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    fn meta_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn body_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.body", key))
    }

    /// Load a fresh entry, or `None` on miss/stale/corrupt.
    async fn load(&self, key: &str) -> Option<Response> {
        let meta = tokio::fs::read(self.meta_path(key)).await.ok()?;
        let entry: CacheEntry = serde_json::from_slice(&meta).ok()?;
        let age = unix_now().checked_sub(entry.stored_at)?;
        if Duration::from_secs(age) >= self.ttl {
            return None;
        }
        let body = tokio::fs::read(self.body_path(key)).await.ok()?;
        let status = StatusCode::from_u16(entry.status).ok()?;
        let mut headers = HeaderMap::new();
        for (name, value) in &entry.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                headers.append(name, value);
            }
        }
        Some(Response {
            status,
            headers,
            body,
        })
    }

    /// Persist a response body and its metadata sidecar.
    async fn store(&self, key: &str, method: &str, url: &str, response: &Response) -> Result<()> {
        let headers = response
            .headers
            .iter()
            .filter(|(name, _)| HEADER_ALLOWLIST.contains(&name.as_str()))
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect();
        let entry = CacheEntry {
            url: url.to_string(),
            method: method.to_string(),
            status: response.status.as_u16(),
            headers,
            stored_at: unix_now(),
        };
        let meta = serde_json::to_vec(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        tokio::fs::write(self.body_path(key), &response.body).await?;
        tokio::fs::write(self.meta_path(key), meta).await?;
        Ok(())
    }
}

#[async_trait]
impl Transport for CacheTransport {
    async fn execute(&self, request: Request) -> Result<Response> {
        let method = request.method().to_string();
        let url = request.url().to_string();
        let key = Self::cache_key(&method, &url);
        if let Some(response) = self.load(&key).await {
            debug!(%url, "cache hit");
            return Ok(response);
        }
        let response = self.inner.execute(request).await?;
        if response.is_success() {
            self.store(&key, &method, &url, &response).await?;
        }
        Ok(response)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::CONTENT_TYPE;

    /// Inner transport that must never be reached.
    struct UnreachableTransport;

    #[async_trait]
    impl Transport for UnreachableTransport {
        async fn execute(&self, _request: Request) -> Result<Response> {
            unreachable!("cache should not delegate in this test")
        }
    }

    fn sample_response() -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
        headers.insert("x-secret", HeaderValue::from_static("drop-me"));
        Response {
            status: StatusCode::OK,
            headers,
            body: b"<html>cached</html>".to_vec(),
        }
    }

    #[test]
    fn test_cache_key_stable() {
        let a = CacheTransport::cache_key("GET", "https://www.imdb.com/find?q=x");
        let b = CacheTransport::cache_key("GET", "https://www.imdb.com/find?q=x");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_cache_key_varies_by_method_and_url() {
        let get = CacheTransport::cache_key("GET", "https://www.imdb.com/find");
        let head = CacheTransport::cache_key("HEAD", "https://www.imdb.com/find");
        let other = CacheTransport::cache_key("GET", "https://www.imdb.com/find?q=x");
        assert_ne!(get, head);
        assert_ne!(get, other);
    }

    #[tokio::test]
    async fn test_store_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheTransport::new(
            Arc::new(UnreachableTransport),
            dir.path(),
            Duration::from_secs(60),
        )
        .await
        .unwrap();

        let key = CacheTransport::cache_key("GET", "https://www.imdb.com/find?q=x");
        cache
            .store(&key, "GET", "https://www.imdb.com/find?q=x", &sample_response())
            .await
            .unwrap();

        let loaded = cache.load(&key).await.expect("fresh entry");
        assert_eq!(loaded.status, StatusCode::OK);
        assert_eq!(loaded.body, b"<html>cached</html>");
        // allow-listed header survives, others are dropped
        assert_eq!(loaded.headers.get(CONTENT_TYPE).unwrap(), "text/html");
        assert!(loaded.headers.get("x-secret").is_none());
    }

    #[tokio::test]
    async fn test_zero_ttl_is_always_stale() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheTransport::new(
            Arc::new(UnreachableTransport),
            dir.path(),
            Duration::from_secs(0),
        )
        .await
        .unwrap();

        let key = CacheTransport::cache_key("GET", "https://www.imdb.com/find");
        cache
            .store(&key, "GET", "https://www.imdb.com/find", &sample_response())
            .await
            .unwrap();

        assert!(cache.load(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_missing_entry_is_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheTransport::new(
            Arc::new(UnreachableTransport),
            dir.path(),
            Duration::from_secs(60),
        )
        .await
        .unwrap();

        assert!(cache.load("0000").await.is_none());
    }
}

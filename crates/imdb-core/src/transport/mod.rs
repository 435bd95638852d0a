//! HTTP transport layer
//!
//! The scraper talks to the network through the [`Transport`] trait so that
//! retrieval behavior can be layered: the base [`HttpTransport`] performs the
//! actual exchange, while [`CacheTransport`] and [`LogTransport`] wrap
//! another transport and delegate to it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Request, StatusCode};

use crate::error::Result;

pub mod cache;
pub mod log;

pub use cache::CacheTransport;
pub use log::LogTransport;

/// Abstract request execution boundary.
///
/// Implementations must be shareable across tasks; a single transport
/// instance serves every search issued by a client.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request and materialize the full response.
    async fn execute(&self, request: Request) -> Result<Response>;
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Vec<u8>,
}

impl Response {
    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Base transport backed by a [`reqwest::Client`].
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the given per-request timeout.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: Request) -> Result<Response> {
        let res = self.client.execute(request).await?;
        let status = res.status();
        let headers = res.headers().clone();
        let body = res.bytes().await?.to_vec();
        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_is_success() {
        let response = Response {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Vec::new(),
        };
        assert!(response.is_success());

        let response = Response {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            headers: HeaderMap::new(),
            body: Vec::new(),
        };
        assert!(!response.is_success());
    }

    #[test]
    fn test_response_text_lossy() {
        let response = Response {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: vec![b'o', b'k', 0xff],
        };
        assert_eq!(response.text(), "ok\u{fffd}");
    }

    #[test]
    fn test_http_transport_creation() {
        let transport = HttpTransport::new(Duration::from_secs(30));
        assert!(transport.is_ok());
    }
}

//! Request/response logging transport
//!
//! Wraps another [`Transport`] and emits `tracing` debug events for every
//! exchange. The core library itself never logs; all request observability
//! lives here.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::Request;
use tracing::debug;

use super::{Response, Transport};
use crate::error::Result;

/// Transport decorator that logs each request and its outcome.
pub struct LogTransport {
    inner: Arc<dyn Transport>,
}

impl LogTransport {
    /// Wrap `inner` with request/response logging.
    pub fn new(inner: Arc<dyn Transport>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Transport for LogTransport {
    async fn execute(&self, request: Request) -> Result<Response> {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending request");
        let start = Instant::now();
        match self.inner.execute(request).await {
            Ok(response) => {
                debug!(
                    %method,
                    %url,
                    status = %response.status,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    body_bytes = response.body.len(),
                    "received response"
                );
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "request failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderMap;
    use reqwest::{Method, StatusCode, Url};

    struct FixedTransport;

    #[async_trait]
    impl Transport for FixedTransport {
        async fn execute(&self, _request: Request) -> Result<Response> {
            Ok(Response {
                status: StatusCode::OK,
                headers: HeaderMap::new(),
                body: b"ok".to_vec(),
            })
        }
    }

    #[tokio::test]
    async fn test_log_transport_delegates() {
        let transport = LogTransport::new(Arc::new(FixedTransport));
        let request = Request::new(Method::GET, Url::parse("https://www.imdb.com/find").unwrap());
        let response = transport.execute(request).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, b"ok");
    }
}

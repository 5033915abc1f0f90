//! Plain HTTP GET transport.
//!
//! Wraps a `reqwest::Client` so registry code never deals with client
//! construction. Responses are returned for every status code: a registry
//! answering `404` with a JSON error document is still a successful exchange
//! from the transport's point of view.

use crate::error::{CoreError, Result};
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("types-probe/", env!("CARGO_PKG_VERSION"));

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl HttpResponse {
    /// Returns `true` if the server answered with a 2xx status.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Options for building an [`HttpClient`].
///
/// # Examples
///
/// ```
/// use types_probe_core::http::HttpOptions;
/// use std::time::Duration;
///
/// let options = HttpOptions {
///     user_agent: "my-agent/1.0".into(),
///     timeout: Some(Duration::from_secs(10)),
/// };
/// assert_eq!(options.user_agent, "my-agent/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub user_agent: String,
    /// Whole-request timeout. `None` leaves the exchange unbounded.
    pub timeout: Option<Duration>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

/// HTTP client issuing GET requests.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client with default options.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ClientBuild` if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self> {
        Self::with_options(&HttpOptions::default())
    }

    /// Creates a client with the given user agent and timeout.
    pub fn with_options(options: &HttpOptions) -> Result<Self> {
        let mut builder = Client::builder().user_agent(options.user_agent.as_str());
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(CoreError::ClientBuild)?;

        Ok(Self { client })
    }

    /// Issues a GET request and returns the status and body.
    ///
    /// Non-2xx statuses are returned as-is; callers decide what they mean.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Transport` if the request cannot be sent or the body
    /// cannot be read.
    pub async fn get(&self, url: &str) -> Result<HttpResponse> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CoreError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("HTTP {} for {}", status, url);
        }

        let body = response.bytes().await.map_err(|e| CoreError::Transport {
            url: url.to_string(),
            source: e,
        })?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = HttpOptions::default();
        assert!(options.user_agent.starts_with("types-probe/"));
        assert!(options.timeout.is_none());
    }

    #[tokio::test]
    async fn test_get_success() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/left-pad")
            .with_status(200)
            .with_body(r#"{"name":"left-pad"}"#)
            .create_async()
            .await;

        let client = HttpClient::new().unwrap();
        let response = client
            .get(&format!("{}/left-pad", server.url()))
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(&response.body[..], br#"{"name":"left-pad"}"#);
    }

    #[tokio::test]
    async fn test_get_returns_error_status_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body(r#"{"error":"Not found"}"#)
            .create_async()
            .await;

        let client = HttpClient::new().unwrap();
        let response = client
            .get(&format!("{}/missing", server.url()))
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert!(!response.is_success());
        assert_eq!(&response.body[..], br#"{"error":"Not found"}"#);
    }

    #[tokio::test]
    async fn test_get_sends_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/ua")
            .match_header("user-agent", "probe-test/0.0")
            .with_status(200)
            .create_async()
            .await;

        let client = HttpClient::with_options(&HttpOptions {
            user_agent: "probe-test/0.0".into(),
            timeout: Some(Duration::from_secs(5)),
        })
        .unwrap();
        client.get(&format!("{}/ua", server.url())).await.unwrap();

        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_network_error() {
        let client = HttpClient::new().unwrap();
        let result = client.get("http://invalid.localhost.test/data").await;

        match result {
            Err(CoreError::Transport { url, .. }) => {
                assert_eq!(url, "http://invalid.localhost.test/data");
            }
            other => panic!("Expected Transport error, got {:?}", other),
        }
    }
}

//! The network seam: one request in, one raw response (or transport error) out.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Status and body of a response that was actually received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// A request that did not produce a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection refused, DNS failure, timeout, connection reset.
    Transient(String),
    /// The request could not be built (invalid URL, bad header, ...).
    Request(String),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Transient(msg) => write!(f, "network error: {}", msg),
            TransportError::Request(msg) => write!(f, "invalid request: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            TransportError::Request(error.to_string())
        } else {
            TransportError::Transient(error.to_string())
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        timeout: Duration,
    ) -> Result<RawResponse, TransportError>;

    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError>;
}

/// `reqwest`-backed transport.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn read(response: reqwest::Response) -> Result<RawResponse, TransportError> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("Received {} ({} bytes)", status, body.len());
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[tracing::instrument(skip(self, query))]
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .timeout(timeout)
            .send()
            .await?;
        Self::read(response).await
    }

    #[tracing::instrument(skip(self, body))]
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .timeout(timeout)
            .send()
            .await?;
        Self::read(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::unreachable_url;
    use mockito::Matcher;
    use serde_json::json;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_get_returns_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/posts")
            .match_query(Matcher::UrlEncoded("userId".into(), "3".into()))
            .with_status(200)
            .with_body(r#"[{"title": "a"}]"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(Client::new());
        let response = transport
            .get(
                &format!("{}/posts", server.url()),
                &[("userId".to_string(), "3".to_string())],
                TIMEOUT,
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response, RawResponse::new(200, r#"[{"title": "a"}]"#));
    }

    #[tokio::test]
    async fn test_get_error_status_is_a_response() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body("{}")
            .create_async()
            .await;

        let transport = HttpTransport::new(Client::new());
        let response = transport
            .get(&format!("{}/missing", server.url()), &[], TIMEOUT)
            .await
            .unwrap();

        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_post_json_sends_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/posts")
            .match_body(Matcher::Json(json!({"title": "t", "body": "b"})))
            .with_status(201)
            .with_body(r#"{"id": 101}"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(Client::new());
        let response = transport
            .post_json(
                &format!("{}/posts", server.url()),
                &json!({"title": "t", "body": "b"}),
                TIMEOUT,
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 201);
    }

    #[tokio::test]
    async fn test_connection_refused_is_transient() {
        let transport = HttpTransport::new(Client::new());
        let err = transport
            .get(&unreachable_url(), &[], TIMEOUT)
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Transient(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_transient() {
        use std::io::Write as _;

        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/slow")
            .with_status(200)
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_millis(500));
                w.write_all(b"{}")
            })
            .create_async()
            .await;

        let transport = HttpTransport::new(Client::new());
        let err = transport
            .get(
                &format!("{}/slow", server.url()),
                &[],
                Duration::from_millis(100),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Transient(_)));
    }

    #[tokio::test]
    async fn test_invalid_url_is_request_error() {
        let transport = HttpTransport::new(Client::new());
        let err = transport
            .get("not a url", &[], TIMEOUT)
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Request(_)));
        assert!(err.to_string().starts_with("invalid request"));
    }
}

//! Health sources — where the dashboard gets its health document from.

use std::time::Duration;

use async_trait::async_trait;

use fnx_protocol::{HealthEndpoint, HealthResponse};

use crate::error::{FetchError, FetchResult};

// ── HealthSource trait ────────────────────────────────────────

/// Abstraction over a single health request.
///
/// Enables mocking in tests without a running backend.
#[async_trait]
pub trait HealthSource: Send + Sync {
    /// Issue one request to `endpoint` and parse the health document.
    async fn fetch(&self, endpoint: &HealthEndpoint) -> FetchResult<HealthResponse>;
}

// ── HttpHealthSource ──────────────────────────────────────────

/// Plain `GET` over HTTP. No headers, no body, no retries.
pub struct HttpHealthSource {
    client: reqwest::Client,
}

impl HttpHealthSource {
    /// Build a source. `timeout` of `None` never gives up on a slow backend.
    pub fn new(timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl HealthSource for HttpHealthSource {
    async fn fetch(&self, endpoint: &HealthEndpoint) -> FetchResult<HealthResponse> {
        let url = endpoint.url();
        tracing::debug!(url = %url, "requesting health document");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(format!("backend returned {status}")));
        }

        let body = response.bytes().await?;
        Ok(HealthResponse::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fnx_protocol::FieldValue;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Endpoint pointed at the mock server.
    fn endpoint_for(server: &MockServer) -> HealthEndpoint {
        let addr = server.address();
        HealthEndpoint::new(addr.ip().to_string()).with_port(addr.port())
    }

    #[tokio::test]
    async fn fetch_healthy_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "Healthy",
                "version": "1.0.0",
                "engine": "FastAPI",
                "orchestrator": "Kubernetes"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let source = HttpHealthSource::new(None).unwrap();
        let health = source.fetch(&endpoint_for(&server)).await.unwrap();

        assert_eq!(health.status(), FieldValue::Known("Healthy"));
        assert_eq!(health.engine(), FieldValue::Known("FastAPI"));
        assert_eq!(health.orchestrator(), FieldValue::Known("Kubernetes"));
    }

    #[tokio::test]
    async fn fetch_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
                "status": "degraded"
            })))
            .mount(&server)
            .await;

        let source = HttpHealthSource::new(None).unwrap();
        let err = source.fetch(&endpoint_for(&server)).await.unwrap_err();
        assert!(err.reason().contains("503"), "got: {err}");
    }

    #[tokio::test]
    async fn fetch_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>hello</html>"))
            .mount(&server)
            .await;

        let source = HttpHealthSource::new(None).unwrap();
        let err = source.fetch(&endpoint_for(&server)).await.unwrap_err();
        assert!(err.reason().starts_with("malformed health document"));
    }

    #[tokio::test]
    async fn fetch_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "ok"}))
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&server)
            .await;

        // Client timeout is 1s, mock delays 10s → timeout
        let source = HttpHealthSource::new(Some(Duration::from_secs(1))).unwrap();
        assert!(source.fetch(&endpoint_for(&server)).await.is_err());
    }

    #[tokio::test]
    async fn fetch_connection_refused() {
        // Grab a free port, then release it so nothing is listening.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let source = HttpHealthSource::new(None).unwrap();
        let endpoint = HealthEndpoint::new("127.0.0.1").with_port(port);
        assert!(source.fetch(&endpoint).await.is_err());
    }
}

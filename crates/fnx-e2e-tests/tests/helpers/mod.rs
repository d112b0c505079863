//! Shared test harness for E2E integration tests.
//!
//! Stands up a `wiremock` backend serving `/api/health` and wires a real
//! `HttpHealthSource` dashboard at it.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fnx_dashboard::config::{BackendConfig, ViewConfig};
use fnx_dashboard::{HealthDashboard, HttpHealthSource};
use fnx_protocol::{HEALTH_PATH, HealthEndpoint};

/// The document the orchestrator backend serves in production.
pub fn orchestrator_health() -> serde_json::Value {
    serde_json::json!({
        "status": "Healthy",
        "version": "1.0.0",
        "engine": "FastAPI",
        "orchestrator": "Kubernetes"
    })
}

/// End-to-end harness: one mock backend, any number of dashboards.
pub struct TestHarness {
    pub server: MockServer,
}

impl TestHarness {
    /// Backend answering every health request with `response`.
    pub async fn with_response(response: ResponseTemplate) -> Self {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(HEALTH_PATH))
            .respond_with(response)
            .mount(&server)
            .await;
        Self { server }
    }

    /// Backend answering `200 OK` with `body` as JSON.
    pub async fn healthy(body: serde_json::Value) -> Self {
        Self::with_response(ResponseTemplate::new(200).set_body_json(body)).await
    }

    /// Backend config pointed at the mock server by literal host.
    pub fn backend_config(&self) -> BackendConfig {
        let addr = self.server.address();
        BackendConfig {
            host: Some(addr.ip().to_string()),
            port: addr.port(),
            ..Default::default()
        }
    }

    pub fn endpoint(&self) -> HealthEndpoint {
        self.backend_config().endpoint().unwrap()
    }

    /// Dashboard using the real HTTP source against the mock backend.
    pub fn dashboard(&self, view: ViewConfig) -> HealthDashboard {
        dashboard_for(self.endpoint(), view, None)
    }

    /// Health requests the backend has seen so far.
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }
}

/// Dashboard over HTTP for an arbitrary endpoint.
pub fn dashboard_for(
    endpoint: HealthEndpoint,
    view: ViewConfig,
    timeout: Option<Duration>,
) -> HealthDashboard {
    let source = HttpHealthSource::new(timeout).unwrap();
    HealthDashboard::new(endpoint, view, Arc::new(source))
}

/// An endpoint on localhost where nothing is listening.
pub fn refused_endpoint() -> HealthEndpoint {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    HealthEndpoint::new("127.0.0.1").with_port(port)
}

//! Location of the backend health endpoint.

/// Port the orchestrator backend listens on.
pub const DEFAULT_PORT: u16 = 30001;

/// Route serving the health document.
pub const HEALTH_PATH: &str = "/api/health";

/// Fully resolved health endpoint (`http://{host}:{port}{path}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthEndpoint {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl HealthEndpoint {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            path: HEALTH_PATH.to_string(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Request URL. IPv6 literals are bracketed and the path always starts
    /// with `/`.
    pub fn url(&self) -> String {
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        let slash = if self.path.starts_with('/') { "" } else { "/" };
        format!("http://{host}:{}{slash}{}", self.port, self.path)
    }
}

impl std::fmt::Display for HealthEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url())
    }
}

//! Dashboard configuration, loadable from TOML.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use fnx_protocol::{DEFAULT_PORT, HEALTH_PATH, HealthEndpoint};

use crate::error::ConfigError;
use crate::host::{HostSource, resolve_host};

/// Top-level configuration for the dashboard.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardConfig {
    /// Where the backend health endpoint lives.
    #[serde(default)]
    pub backend: BackendConfig,
    /// How the view renders.
    #[serde(default)]
    pub view: ViewConfig,
    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Log output format for the binary's tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl DashboardConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}

/// Backend endpoint settings.
///
/// Exactly one of `host` and `page_url` must be set.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Literal backend host (e.g. "192.168.1.229").
    #[serde(default)]
    pub host: Option<String>,
    /// URL of the page serving the dashboard; its hostname is used.
    #[serde(default)]
    pub page_url: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_path")]
    pub path: String,
    /// Request timeout in seconds. None waits for as long as the
    /// connection stays open.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_path() -> String {
    HEALTH_PATH.into()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: None,
            page_url: None,
            port: default_port(),
            path: default_path(),
            timeout_secs: None,
        }
    }
}

impl BackendConfig {
    pub fn host_source(&self) -> Result<HostSource, ConfigError> {
        match (&self.host, &self.page_url) {
            (Some(host), None) => Ok(HostSource::Literal(host.clone())),
            (None, Some(page)) => Ok(HostSource::PageUrl(page.clone())),
            (Some(_), Some(_)) => Err(ConfigError::ConflictingHost),
            (None, None) => Err(ConfigError::MissingHost),
        }
    }

    /// Resolve the full health endpoint.
    pub fn endpoint(&self) -> Result<HealthEndpoint, ConfigError> {
        let host = resolve_host(&self.host_source()?)?;
        Ok(HealthEndpoint::new(host)
            .with_port(self.port)
            .with_path(self.path.clone()))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Body layout once the health document has arrived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Status, engine and version as labelled lines.
    #[default]
    Fields,
    /// The whole document as indented JSON.
    RawJson,
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fields" => Ok(Layout::Fields),
            "raw_json" | "raw-json" | "json" => Ok(Layout::RawJson),
            other => Err(format!(
                "unknown layout {other:?} (expected `fields` or `raw_json`)"
            )),
        }
    }
}

/// Placeholder wording used by the different dashboard deployments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// "Connecting to FastAPI..." until data arrives, and forever on failure.
    Fastapi,
    /// "Waiting for Orchestrator..." until data arrives, and forever on failure.
    Orchestrator,
    /// "Connecting to FastAPI..." until data arrives, "Offline" after a failure.
    #[default]
    Offline,
}

impl Preset {
    /// Text shown while the request is in flight.
    pub fn connecting_text(self) -> &'static str {
        match self {
            Preset::Fastapi | Preset::Offline => "Connecting to FastAPI...",
            Preset::Orchestrator => "Waiting for Orchestrator...",
        }
    }

    /// Text shown once the request has failed.
    pub fn offline_text(self) -> &'static str {
        match self {
            Preset::Fastapi => "Connecting to FastAPI...",
            Preset::Orchestrator => "Waiting for Orchestrator...",
            Preset::Offline => "Offline",
        }
    }
}

/// View rendering settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub preset: Preset,
    #[serde(default)]
    pub layout: Layout,
    /// Overrides the preset text shown while the request is in flight.
    #[serde(default)]
    pub connecting_text: Option<String>,
    /// Overrides the preset text shown after a failed request.
    #[serde(default)]
    pub offline_text: Option<String>,
    /// Shown for fields the backend did not report.
    #[serde(default)]
    pub unknown_text: String,
}

fn default_title() -> String {
    "POC Dashboard".into()
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            preset: Preset::default(),
            layout: Layout::default(),
            connecting_text: None,
            offline_text: None,
            unknown_text: String::new(),
        }
    }
}

impl ViewConfig {
    pub fn connecting_text(&self) -> &str {
        self.connecting_text
            .as_deref()
            .unwrap_or(self.preset.connecting_text())
    }

    pub fn offline_text(&self) -> &str {
        self.offline_text
            .as_deref()
            .unwrap_or(self.preset.offline_text())
    }
}

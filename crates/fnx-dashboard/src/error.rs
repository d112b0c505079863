//! Dashboard error types.

use thiserror::Error;

/// The single failure kind of a health check.
///
/// Unreachable backends, non-2xx responses and malformed bodies all end up
/// here; only the reason text tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("health check failed: {reason}")]
pub struct FetchError {
    reason: String,
}

impl FetchError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("malformed health document: {e}"))
    }
}

/// Errors raised while loading or resolving dashboard configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no backend host configured (set `backend.host` or `backend.page_url`)")]
    MissingHost,

    #[error("`backend.host` and `backend.page_url` are mutually exclusive")]
    ConflictingHost,

    #[error("backend host is empty")]
    EmptyHost,

    #[error("page URL {url:?} is invalid: {reason}")]
    InvalidPageUrl { url: String, reason: String },

    #[error("page URL {0:?} has no hostname")]
    PageUrlWithoutHost(String),
}

/// Convenience alias for fetch results.
pub type FetchResult<T> = Result<T, FetchError>;

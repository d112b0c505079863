//! Backend host resolution.
//!
//! The backend is either addressed directly, or assumed to live on the same
//! host that serves the dashboard page. Both are explicit configuration;
//! nothing is inferred from the environment.

use reqwest::Url;

use crate::error::ConfigError;

/// Where the backend host comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostSource {
    /// A hostname or IP address used as-is.
    Literal(String),
    /// The hostname portion of the page the dashboard is served from.
    PageUrl(String),
}

/// Resolve a [`HostSource`] to the host used in the health endpoint URL.
pub fn resolve_host(source: &HostSource) -> Result<String, ConfigError> {
    match source {
        HostSource::Literal(host) => {
            let host = host.trim();
            if host.is_empty() {
                return Err(ConfigError::EmptyHost);
            }
            Ok(host.to_string())
        }
        HostSource::PageUrl(page) => {
            let url = Url::parse(page.trim()).map_err(|e| ConfigError::InvalidPageUrl {
                url: page.clone(),
                reason: e.to_string(),
            })?;
            match url.host_str() {
                Some(host) if !host.is_empty() => Ok(host.to_string()),
                _ => Err(ConfigError::PageUrlWithoutHost(page.clone())),
            }
        }
    }
}

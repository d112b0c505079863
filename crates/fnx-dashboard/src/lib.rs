//! FastNext health dashboard — library crate for the health view.
//!
//! Mounting a [`HealthDashboard`] issues exactly one request to the backend
//! health endpoint and publishes the outcome as [`ViewState`]:
//! - `HealthSource` trait for fetching (mockable in tests)
//! - `HttpHealthSource` over reqwest for production
//! - `MockHealthSource` for tests without a backend
//! - `MountedView` handle that owns the in-flight request
//! - text renderer for the `fields` and `raw_json` layouts

pub mod config;
pub mod console;
pub mod error;
pub mod host;
pub mod mock;
pub mod render;
pub mod source;
pub mod view;

// Re-exports for convenience.
pub use config::{BackendConfig, DashboardConfig, Layout, LogFormat, Preset, ViewConfig};
pub use console::{Console, Diagnostic};
pub use error::{ConfigError, FetchError};
pub use host::{HostSource, resolve_host};
pub use mock::MockHealthSource;
pub use render::{render, render_body};
pub use source::{HealthSource, HttpHealthSource};
pub use view::{HealthDashboard, MountedView, ViewState};

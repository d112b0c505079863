//! Diagnostics console.
//!
//! Failed health checks are logged through `tracing` and kept here so the
//! dashboard (and tests) can inspect what went wrong.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::FetchError;

/// One recorded failure.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Mount that issued the failed request.
    pub mount_id: Uuid,
    pub message: String,
    pub recorded_at: DateTime<Utc>,
}

/// Shared, append-only diagnostics log.
#[derive(Debug, Clone, Default)]
pub struct Console {
    entries: Arc<Mutex<Vec<Diagnostic>>>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed health check.
    pub fn error(&self, mount_id: Uuid, error: &FetchError) {
        tracing::error!(mount_id = %mount_id, error = %error, "error fetching health");
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).push(Diagnostic {
            mount_id,
            message: error.to_string(),
            recorded_at: Utc::now(),
        });
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

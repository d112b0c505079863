//! Health dashboard view and its mount lifecycle.
//!
//! Each [`HealthDashboard::mount`] spawns one fetch task and returns a
//! [`MountedView`] that owns it. The task publishes exactly one state
//! transition through a `watch` channel, unless the view was unmounted
//! first, in which case the response is dropped unseen.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use fnx_protocol::{HealthEndpoint, HealthResponse};

use crate::config::ViewConfig;
use crate::console::Console;
use crate::error::FetchError;
use crate::render;
use crate::source::HealthSource;

/// What the view currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Request in flight.
    Connecting,
    /// Backend answered with a health document.
    Ready(HealthResponse),
    /// Request failed; the placeholder stays until the next mount.
    Offline(FetchError),
}

impl ViewState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, ViewState::Connecting)
    }

    pub fn health(&self) -> Option<&HealthResponse> {
        match self {
            ViewState::Ready(health) => Some(health),
            _ => None,
        }
    }
}

/// The dashboard: one endpoint, one source, one diagnostics console.
pub struct HealthDashboard {
    endpoint: HealthEndpoint,
    view: ViewConfig,
    source: Arc<dyn HealthSource>,
    console: Console,
}

impl HealthDashboard {
    pub fn new(endpoint: HealthEndpoint, view: ViewConfig, source: Arc<dyn HealthSource>) -> Self {
        Self {
            endpoint,
            view,
            source,
            console: Console::new(),
        }
    }

    pub fn endpoint(&self) -> &HealthEndpoint {
        &self.endpoint
    }

    pub fn view_config(&self) -> &ViewConfig {
        &self.view
    }

    /// Diagnostics recorded by every mount of this dashboard.
    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Display the view and fire its single health request.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn mount(&self) -> MountedView {
        let mount_id = Uuid::now_v7();
        let (tx, rx) = watch::channel(ViewState::Connecting);
        let mounted = Arc::new(Mutex::new(true));

        let source = Arc::clone(&self.source);
        let endpoint = self.endpoint.clone();
        let console = self.console.clone();
        let still_mounted = Arc::clone(&mounted);

        tracing::info!(mount_id = %mount_id, url = %endpoint, "dashboard mounted");

        let task = tokio::spawn(async move {
            let outcome = source.fetch(&endpoint).await;

            // Held until the new state is published so unmount cannot interleave.
            let mounted = still_mounted.lock().unwrap_or_else(|e| e.into_inner());
            if !*mounted {
                tracing::debug!(mount_id = %mount_id, "response arrived after unmount, dropped");
                return;
            }

            let next = match outcome {
                Ok(health) => {
                    tracing::info!(
                        mount_id = %mount_id,
                        status = health.status().or_placeholder("<missing>"),
                        "health document received"
                    );
                    ViewState::Ready(health)
                }
                Err(e) => {
                    console.error(mount_id, &e);
                    ViewState::Offline(e)
                }
            };
            tx.send_replace(next);
        });

        MountedView {
            mount_id,
            state: rx,
            mounted,
            task,
            view: self.view.clone(),
        }
    }
}

/// A displayed dashboard. Dropping it unmounts the view and cancels the
/// request if it is still in flight.
pub struct MountedView {
    mount_id: Uuid,
    state: watch::Receiver<ViewState>,
    mounted: Arc<Mutex<bool>>,
    task: JoinHandle<()>,
    view: ViewConfig,
}

impl MountedView {
    pub fn mount_id(&self) -> Uuid {
        self.mount_id
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Observe state changes, e.g. to re-render elsewhere.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.clone()
    }

    /// Wait for the next state change and return the new state.
    ///
    /// Returns the current state immediately if the fetch task is gone.
    pub async fn changed(&mut self) -> ViewState {
        // Err means the sender was dropped: the state is final.
        let _ = self.state.changed().await;
        self.state()
    }

    /// Wait until the request has resolved one way or the other.
    pub async fn settled(&mut self) -> ViewState {
        let settled = self
            .state
            .wait_for(ViewState::is_settled)
            .await
            .map(|state| (*state).clone())
            .ok();
        settled.unwrap_or_else(|| self.state())
    }

    /// Full view: title, heading and body.
    pub fn render(&self) -> String {
        render::render(&self.state.borrow(), &self.view)
    }

    /// Just the response area.
    pub fn render_body(&self) -> String {
        render::render_body(&self.state.borrow(), &self.view)
    }

    /// Remove the view. Equivalent to dropping the handle.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for MountedView {
    fn drop(&mut self) {
        *self.mounted.lock().unwrap_or_else(|e| e.into_inner()) = false;
        self.task.abort();
        tracing::debug!(mount_id = %self.mount_id, "dashboard unmounted");
    }
}

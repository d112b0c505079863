//! Plain-text rendering of the dashboard view.

use fnx_protocol::{FieldValue, HealthResponse};

use crate::config::{Layout, ViewConfig};
use crate::view::ViewState;

const RESPONSE_HEADING: &str = "Backend Response:";

/// Render the whole view: title, heading and response area.
pub fn render(state: &ViewState, view: &ViewConfig) -> String {
    format!(
        "{}\n\n{RESPONSE_HEADING}\n{}\n",
        view.title,
        render_body(state, view)
    )
}

/// Render only the response area.
pub fn render_body(state: &ViewState, view: &ViewConfig) -> String {
    match state {
        ViewState::Connecting => view.connecting_text().to_string(),
        ViewState::Offline(_) => view.offline_text().to_string(),
        ViewState::Ready(health) => match view.layout {
            Layout::RawJson => health.to_pretty_json(),
            Layout::Fields => render_fields(health, &view.unknown_text),
        },
    }
}

fn render_fields(health: &HealthResponse, unknown: &str) -> String {
    let mut lines = vec![
        field_line("Status", health.status().or_placeholder(unknown)),
        field_line("Engine", health.engine().or_placeholder(unknown)),
        field_line("Version", health.version().or_placeholder(unknown)),
    ];
    // Only newer backends report an orchestrator; older ones get no line.
    if let FieldValue::Known(orchestrator) = health.orchestrator() {
        lines.push(field_line("Orchestrator", orchestrator));
    }
    lines.join("\n")
}

fn field_line(label: &str, value: &str) -> String {
    if value.is_empty() {
        format!("{label}:")
    } else {
        format!("{label}: {value}")
    }
}

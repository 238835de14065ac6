//! Fire-and-forget usage events.
//!
//! Events are plain log records on the [`TARGET`] target, so they can be
//! routed or silenced with `RUST_LOG` like anything else. Nothing here can
//! fail the caller.

use serde_json::{json, Value};
use sillytext_core::ToolId;

pub const TARGET: &str = "sillytext::analytics";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventName {
    PageView,
    ToolUsed,
    ShareClicked,
}

impl EventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::PageView => "page_view",
            EventName::ToolUsed => "tool_used",
            EventName::ShareClicked => "share_clicked",
        }
    }
}

/// Properties attached to every event: the tool plus free-form params.
pub fn event_properties(tool: ToolId, params: Value) -> Value {
    json!({ "tool": tool.as_str(), "params": params })
}

pub fn track_event(name: EventName, tool: ToolId, params: Value) {
    log::info!(
        target: TARGET,
        "Event: {} {}",
        name.as_str(),
        event_properties(tool, params)
    );
}

pub fn report_error(error: &dyn std::error::Error, tool: Option<ToolId>) {
    log::error!(
        target: TARGET,
        "Caught an exception: {error} (tool: {})",
        tool.map_or("none", |t| t.as_str())
    );
}

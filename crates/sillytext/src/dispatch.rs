use serde_json::{json, Value};
use sillytext_core::activation::{resolve_activation, Resolution};
use sillytext_core::{Registry, ToolId, TransformResult};

use crate::analytics::{self, EventName};
use crate::error::Error;
use crate::widgets::WidgetLoader;

/// Validates `raw_id` and hands back the (not yet loaded) widget loader.
///
/// Emits `page_view` when the tool exists.
pub fn activate(registry: &Registry, raw_id: &str) -> Result<WidgetLoader, Error> {
    match resolve_activation(registry, raw_id, WidgetLoader::new) {
        Resolution::Found { loader, .. } => {
            analytics::track_event(EventName::PageView, loader.tool(), json!({}));
            Ok(loader)
        }
        Resolution::NotFound { requested } => Err(Error::ToolNotFound(requested)),
    }
}

/// Runs the widget once. Emits `tool_used` on success and reports failures.
pub fn invoke(loader: &WidgetLoader, arguments: Value) -> Result<TransformResult, Error> {
    let tool = loader.tool();
    let widget = loader.load();
    let params = redact_inputs(&arguments, widget.primary_input);

    match widget.invoke(arguments) {
        Ok(result) => {
            analytics::track_event(EventName::ToolUsed, tool, params);
            Ok(result)
        }
        Err(e) => {
            analytics::report_error(&e, Some(tool));
            Err(e)
        }
    }
}

/// [`activate`] then [`invoke`].
pub fn dispatch(
    registry: &Registry,
    raw_id: &str,
    arguments: Value,
) -> Result<(ToolId, TransformResult), Error> {
    let loader = activate(registry, raw_id)?;
    let result = invoke(&loader, arguments)?;
    Ok((loader.tool(), result))
}

/// Options worth recording: everything except the free text itself.
fn redact_inputs(arguments: &Value, primary: Option<&str>) -> Value {
    match arguments {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| Some(key.as_str()) != primary && !is_text_field(key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        _ => json!({}),
    }
}

fn is_text_field(key: &str) -> bool {
    matches!(key, "text" | "left" | "right" | "find" | "replace")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_is_not_found() {
        let registry = Registry::builtin();
        let err = dispatch(&registry, "nope", json!({})).unwrap_err();
        assert!(matches!(err, Error::ToolNotFound(ref id) if id == "nope"));
    }

    #[test]
    fn test_dispatch_runs_the_widget() {
        let registry = Registry::builtin();
        let (tool, result) = dispatch(
            &registry,
            "duplicate-remover",
            json!({ "text": "b\na\nb\nc" }),
        )
        .unwrap();
        assert_eq!(tool, ToolId::DuplicateRemover);
        assert_eq!(result.to_plain_text(), "b\na\nc");
        assert_eq!(result.status.as_deref(), Some("1 duplicate line(s) removed."));
    }

    #[test]
    fn test_activation_does_not_load_the_widget() {
        let registry = Registry::builtin();
        let loader = activate(&registry, "counter").unwrap();
        assert!(!loader.is_loaded());

        invoke(&loader, json!({ "text": "two words" })).unwrap();
        assert!(loader.is_loaded());
    }

    #[test]
    fn test_redact_inputs_keeps_only_options() {
        let params = redact_inputs(
            &json!({ "text": "secret", "find": "x", "regex": true, "whole_word": false }),
            Some("text"),
        );
        assert_eq!(params, json!({ "regex": true, "whole_word": false }));
    }
}

use serde::{Deserialize, Serialize};
use sillytext_core::{Output, Registry};

use crate::dispatch;
use crate::error::Error;
use crate::prelude::eprintln;
use crate::widgets::WidgetLoader;

pub use super::{JsonRpcError, Server, Tool};

const PROTOCOL_VERSION: &str = "2024-11-05";

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

fn to_json<T: Serialize>(value: T) -> Result<serde_json::Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
}

/// Advertises the tools capability only; this server has no resources or prompts.
pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    Ok(serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        },
    }))
}

/// One MCP tool per registry entry, in display order.
pub fn handle_tools_list(registry: &Registry) -> Result<serde_json::Value, JsonRpcError> {
    let tools = registry
        .list_all()
        .iter()
        .map(|descriptor| Tool {
            name: descriptor.id.as_str().to_string(),
            description: format!("{} {}", descriptor.description, descriptor.seo_description),
            input_schema: WidgetLoader::new(descriptor.id).load().input_schema.clone(),
        })
        .collect();

    to_json(ToolsList { tools })
}

/// Runs a tool. Unknown tools and malformed arguments are protocol errors;
/// a failed transformation is an `isError` result carrying its message.
pub fn handle_tools_call(
    params: Option<serde_json::Value>,
    server: &Server,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {e}")))?;

    if server.global.verbose {
        eprintln!("Calling {}: {:?}", params.name, params.arguments);
    }

    let arguments = params.arguments.unwrap_or(serde_json::Value::Null);
    let result = match dispatch::dispatch(&server.registry, &params.name, arguments) {
        Ok((_, result)) => CallToolResult {
            content: render(&result),
            is_error: None,
        },
        Err(Error::ToolNotFound(name)) => {
            return Err(JsonRpcError::invalid_params(format!("Unknown tool: {name}")))
        }
        Err(Error::InvalidArguments(message)) => {
            return Err(JsonRpcError::invalid_params(format!(
                "Invalid arguments: {message}"
            )))
        }
        Err(e) => CallToolResult {
            content: vec![Content::Text {
                text: e.to_string(),
            }],
            is_error: Some(true),
        },
    };

    to_json(result)
}

/// Text payloads go out verbatim; structured payloads are sent as JSON, with
/// the status line as a second content block when there is one.
fn render(result: &sillytext_core::TransformResult) -> Vec<Content> {
    let body = match &result.output {
        Output::Text { text } => text.clone(),
        Output::List { items } => items.join("\n"),
        structured => serde_json::to_string_pretty(structured)
            .unwrap_or_else(|_| result.to_plain_text()),
    };

    let mut content = vec![Content::Text { text: body }];
    if let Some(status) = &result.status {
        content.push(Content::Text {
            text: status.clone(),
        });
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use sillytext_core::TransformResult;

    #[test]
    fn test_initialize_names_the_server() {
        let value = handle_initialize().unwrap();
        assert_eq!(value["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(value["serverInfo"]["name"], "sillytext");
        assert!(value["capabilities"]["tools"].is_object());
    }

    #[test]
    fn test_render_text_with_status() {
        let result = TransformResult::text("out").with_status("3 character(s) removed.");
        let content = serde_json::to_value(render(&result)).unwrap();
        assert_eq!(
            content,
            serde_json::json!([
                { "type": "text", "text": "out" },
                { "type": "text", "text": "3 character(s) removed." }
            ])
        );
    }

    #[test]
    fn test_render_stats_as_json() {
        let result = sillytext_core::counter::apply(&sillytext_core::counter::CounterRequest {
            text: "one two".to_string(),
        });
        let content = render(&result);
        let Content::Text { text } = &content[0];
        let parsed: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed["kind"], "stats");
        assert_eq!(parsed["words"], 2);
    }
}

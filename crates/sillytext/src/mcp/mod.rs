mod cli;
mod sse;
mod stdio;
mod tools;

pub use cli::App;

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sillytext_core::Registry;

const JSONRPC_VERSION: &str = "2.0";

const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    params: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: &'static str,
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn new(id: Option<Value>, outcome: std::result::Result<Value, JsonRpcError>) -> Self {
        let (result, error) = match outcome {
            Ok(value) => (Some(value), None),
            Err(error) => (None, Some(error)),
        };
        JsonRpcResponse {
            jsonrpc: JSONRPC_VERSION,
            id,
            result,
            error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    fn new(code: i32, message: impl Into<String>) -> Self {
        JsonRpcError {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }
}

/// A tool as advertised by `tools/list`.
#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Everything a transport needs to answer requests.
#[derive(Debug)]
pub struct Server {
    pub registry: Registry,
    pub global: crate::Global,
}

impl Server {
    pub fn new(global: crate::Global) -> Self {
        Server {
            registry: Registry::builtin(),
            global,
        }
    }
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let server = Server::new(global);
    match app.command {
        cli::Commands::Stdio => stdio::run_stdio(server).await,
        cli::Commands::Sse(options) => sse::run_sse(options, server).await,
    }
}

/// Answers one raw JSON-RPC message. Malformed JSON yields a parse error
/// with a null id; every other failure echoes the request id.
///
/// Notifications (requests without an id) never get a reply.
pub async fn handle_request(request_str: &str, server: &Server) -> Option<JsonRpcResponse> {
    let request: JsonRpcRequest = match serde_json::from_str(request_str) {
        Ok(request) => request,
        Err(e) => {
            return Some(JsonRpcResponse::new(
                None,
                Err(JsonRpcError::new(PARSE_ERROR, format!("Parse error: {e}"))),
            ))
        }
    };

    let Some(id) = request.id else {
        log::debug!("Received notification `{}`", request.method);
        return None;
    };

    let outcome = match request.method.as_str() {
        "initialize" => tools::handle_initialize(),
        "tools/list" => tools::handle_tools_list(&server.registry),
        "tools/call" => tools::handle_tools_call(request.params, server),
        method => Err(JsonRpcError::new(
            METHOD_NOT_FOUND,
            format!("Method not found: {method}"),
        )),
    };

    Some(JsonRpcResponse::new(Some(id), outcome))
}

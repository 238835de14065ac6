//! HTTP navigation over the registry.
//!
//! `GET /` lists tools (filtered with `?q=`), `GET /{tool}` navigates to one
//! and describes it, and `POST /{tool}` runs it with a JSON arguments body.
//! Navigation goes through one [`Activation`], so when page loads overlap
//! only the newest one becomes the active tool.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sillytext_core::activation::Activation;
use sillytext_core::Registry;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

use crate::dispatch;
use crate::prelude::{eprintln, *};

#[derive(Debug, clap::Args, Clone)]
pub struct ServeOptions {
    /// Port to listen on
    #[arg(short, long, env = "SILLYTEXT_PORT", default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "SILLYTEXT_HOST", default_value = "127.0.0.1")]
    pub host: String,
}

#[derive(Debug)]
pub struct WebState {
    registry: Registry,
    navigation: Mutex<Activation>,
}

impl WebState {
    pub fn new(registry: Registry) -> Self {
        WebState {
            registry,
            navigation: Mutex::new(Activation::new()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

/// Any origin may read the directory or call a tool.
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn router(state: Arc<WebState>) -> Router {
    Router::new()
        .route("/", get(list_handler))
        .route("/{tool}", get(tool_handler).post(run_handler))
        .layer(cors())
        .with_state(state)
}

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    let addr = format!("{}:{}", options.host, options.port);
    let app_router = router(Arc::new(WebState::new(Registry::builtin())));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    if global.verbose {
        eprintln!("Serving tools on http://{addr}");
    }

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

async fn list_handler(
    State(state): State<Arc<WebState>>,
    Query(params): Query<SearchParams>,
) -> Json<Value> {
    let tools = state.registry.search(params.q.as_deref().unwrap_or_default());
    let active = state.navigation.lock().await.current();
    Json(json!({ "tools": tools, "active": active }))
}

async fn tool_handler(
    State(state): State<Arc<WebState>>,
    Path(tool): Path<String>,
) -> Response {
    let meta = state.registry.page_metadata(&tool);
    let ticket = state.navigation.lock().await.request(&state.registry, &tool);

    let (ticket, loader) = match (ticket, dispatch::activate(&state.registry, &tool)) {
        (Some(ticket), Ok(loader)) => (ticket, loader),
        _ => return (StatusCode::NOT_FOUND, Json(json!({ "meta": meta }))).into_response(),
    };

    let input_schema = loader.load().input_schema.clone();
    let active = state.navigation.lock().await.complete(ticket);

    Json(json!({
        "tool": state.registry.get(loader.tool()),
        "meta": meta,
        "inputSchema": input_schema,
        "active": active,
    }))
    .into_response()
}

async fn run_handler(
    State(state): State<Arc<WebState>>,
    Path(tool): Path<String>,
    Json(arguments): Json<Value>,
) -> Response {
    match dispatch::dispatch(&state.registry, &tool, arguments) {
        Ok((_, result)) => Json(json!({ "result": result })).into_response(),
        Err(e @ Error::ToolNotFound(_)) => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": e.to_string() }))).into_response()
        }
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> State<Arc<WebState>> {
        State(Arc::new(WebState::new(Registry::builtin())))
    }

    async fn active_tool(state: &State<Arc<WebState>>) -> Value {
        let Json(body) = list_handler(state.clone(), Query(SearchParams { q: None })).await;
        body["active"].clone()
    }

    #[tokio::test]
    async fn test_known_tool_page() {
        let response = tool_handler(state(), Path("counter".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_tool_page_is_not_found() {
        let response = tool_handler(state(), Path("missing".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_navigation_tracks_the_newest_tool() {
        let state = state();
        assert_eq!(active_tool(&state).await, Value::Null);

        tool_handler(state.clone(), Path("counter".to_string())).await;
        assert_eq!(active_tool(&state).await, "counter");

        tool_handler(state.clone(), Path("csv-tool".to_string())).await;
        assert_eq!(active_tool(&state).await, "csv-tool");

        let missing = tool_handler(state.clone(), Path("missing".to_string())).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(active_tool(&state).await, Value::Null);
    }

    #[tokio::test]
    async fn test_list_filters_by_query() {
        let Json(body) = list_handler(
            state(),
            Query(SearchParams {
                q: Some("uuid".to_string()),
            }),
        )
        .await;
        let tools = body["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["id"], "uuid-generator");
    }

    #[tokio::test]
    async fn test_run_reports_transform_failures() {
        let ok = run_handler(
            state(),
            Path("reverser".to_string()),
            Json(json!({ "text": "abc", "mode": "text" })),
        )
        .await;
        assert_eq!(ok.status(), StatusCode::OK);

        let bad = run_handler(
            state(),
            Path("json-xml-formatter".to_string()),
            Json(json!({ "text": "{" })),
        )
        .await;
        assert_eq!(bad.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let missing = run_handler(state(), Path("nope".to_string()), Json(json!({}))).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}

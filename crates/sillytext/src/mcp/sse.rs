use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use futures::stream::{self, Stream};
use serde_json::Value;

use super::Server;
use crate::prelude::{eprintln, *};

/// Path clients POST their JSON-RPC messages to.
const MESSAGE_PATH: &str = "/message";

pub fn router(server: Arc<Server>) -> Router {
    Router::new()
        .route("/sse", get(sse_handler))
        .route(MESSAGE_PATH, post(message_handler))
        .layer(crate::web::cors())
        .with_state(server)
}

pub async fn run_sse(options: super::cli::SseOptions, server: Server) -> Result<()> {
    let addr = format!("{}:{}", options.host, options.port);
    let verbose = server.global.verbose;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind MCP server to {addr}"))?;

    if verbose {
        eprintln!("MCP server listening on http://{addr}");
        eprintln!("  events:   http://{addr}/sse");
        eprintln!("  messages: http://{addr}{MESSAGE_PATH}");
    }

    axum::serve(listener, router(Arc::new(server)))
        .await
        .map_err(|e| eyre!("MCP server error: {e}"))?;

    Ok(())
}

/// Announces the message endpoint, then keeps the connection open.
async fn sse_handler(
    State(_server): State<Arc<Server>>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let endpoint = Event::default().event("endpoint").data(MESSAGE_PATH);
    Sse::new(stream::once(async move { Ok(endpoint) })).keep_alive(KeepAlive::default())
}

/// Notifications are acknowledged with `202 Accepted` and an empty body.
async fn message_handler(
    State(server): State<Arc<Server>>,
    Json(request): Json<Value>,
) -> Response {
    let raw = request.to_string();
    if server.global.verbose {
        eprintln!("<- {raw}");
    }

    match super::handle_request(&raw, &server).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

//! REST adapter over the shared tool registry.
//!
//! Every body is JSON. Tool failures serialize as
//! `{ "ok": false, "error": { "code": "<code>", "message": "<message>" } }`.
use std::{future::Future, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{
    lib::errors::{
        InvocationError, RegistryError, ValidationError, INVALID_PAYLOAD_ERROR,
    },
    server::runtime::invoke_traced,
    tools::{ServerIdentity, ToolDescriptor, ToolListing, ToolRegistry},
};

/// Shared state for all routes.
#[derive(Clone)]
pub struct HttpState {
    identity: Arc<ServerIdentity>,
    registry: Arc<ToolRegistry>,
}

impl HttpState {
    pub fn new(identity: ServerIdentity, registry: Arc<ToolRegistry>) -> Self {
        Self {
            identity: Arc::new(identity),
            registry,
        }
    }

    pub fn base_path(&self) -> &str {
        &self.identity.base_path
    }
}

/// Body of `GET {base}/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub server: String,
    pub version: String,
    pub tools: usize,
}

/// Body of a successful `POST {base}/tools/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallResponse {
    pub ok: bool,
    pub tool: String,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Error half of every handler.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                ok: false,
                error: ErrorBody {
                    code: code.into(),
                    message: message.into(),
                },
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<InvocationError> for ApiError {
    fn from(err: InvocationError) -> Self {
        Self::new(status_for(&err), err.code(), err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// HTTP status for a failed invocation.
pub fn status_for(err: &InvocationError) -> StatusCode {
    match err {
        InvocationError::Registry(RegistryError::ToolNotFound { .. }) => StatusCode::NOT_FOUND,
        InvocationError::Registry(RegistryError::DuplicateToolName { .. }) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        InvocationError::Validation(ValidationError::InvalidPayload { .. }) => {
            StatusCode::BAD_REQUEST
        }
        InvocationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

/// Build the router, nested under `base_path` unless it is `/`.
pub fn build_router(state: HttpState) -> Router {
    let base_path = state.base_path().to_string();
    let routes = Router::new()
        .route("/health", get(health_handler))
        .route("/tools", get(list_tools_handler))
        .route("/tools/:name", get(describe_tool_handler).post(call_tool_handler))
        .with_state(state);

    let router = if base_path == "/" {
        routes
    } else {
        Router::new().nest(&base_path, routes)
    };
    router.layer(TraceLayer::new_for_http())
}

/// Serve until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: HttpState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let local_addr = listener.local_addr()?;
    info!(
        target: "hello_mcp::http",
        transport = "http",
        bind_addr = %local_addr,
        base_path = state.base_path(),
        "Started listening in HTTP mode"
    );
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!(target: "hello_mcp::http", "HTTP server stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(
            target: "hello_mcp::http",
            error = %err,
            "Failed to listen for Ctrl-C; shutting down"
        );
        return;
    }
    info!(target: "hello_mcp::http", "Received Ctrl-C; shutting down");
}

async fn health_handler(State(state): State<HttpState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        server: state.identity.name.clone(),
        version: state.identity.version.to_string(),
        tools: state.registry.len(),
    })
}

async fn list_tools_handler(State(state): State<HttpState>) -> Json<ToolListing> {
    Json(state.registry.listing(&state.identity.name))
}

async fn describe_tool_handler(
    State(state): State<HttpState>,
    Path(name): Path<String>,
) -> Result<Json<ToolDescriptor>, ApiError> {
    let tool = state
        .registry
        .lookup(&name)
        .map_err(InvocationError::from)?;
    Ok(Json(tool.descriptor()))
}

async fn call_tool_handler(
    State(state): State<HttpState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<ToolCallResponse>, ApiError> {
    let payload = parse_body(&body)?;
    let result = invoke_traced(&state.registry, &name, &payload, "http")?;
    Ok(Json(ToolCallResponse {
        ok: true,
        tool: name,
        result,
    }))
}

/// Empty (or whitespace-only) bodies count as `{}`.
fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body).map_err(|err| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            INVALID_PAYLOAD_ERROR.code,
            format!("request body is not valid JSON: {err}"),
        )
    })
}

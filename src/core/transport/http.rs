//! HTTP transport implementation.
//!
//! Plain request/response JSON over HTTP. Protected routes take the
//! [`Authenticated`] extractor, so the auth gate runs before any body is read
//! and the tool dispatcher is never reached for rejected requests.

use std::any::Any;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{SecondsFormat, Utc};
use rmcp::model::{CallToolResult, JsonObject};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, instrument, warn};

use super::{ApiError, HttpConfig, TransportError, TransportResult};
use crate::core::McpServer;
use crate::core::security::Authenticated;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Run the HTTP transport.
    ///
    /// This method blocks until the server shuts down.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let name = server.name().to_string();
        let app = build_router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("{} ready - listening on {} (CORS {})", name, addr, cors_status);
        info!("Available endpoints:");
        info!("  GET  /health          - Health check");
        info!("  GET  /mcp/tools       - List available tools");
        info!("  POST /mcp/tools/call  - Execute a tool");
        info!("Authentication required: Bearer token in Authorization header");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the router with all routes, fallbacks and layers.
pub fn build_router(server: McpServer) -> Router {
    let enable_cors = server.config().transport.enable_cors;

    let mut app = Router::new()
        .route("/health", get(health_check))
        .route("/mcp/tools", get(list_tools))
        .route("/mcp/tools/call", post(call_tool))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(server);

    if enable_cors {
        let cors_layer = CorsLayer::new()
            .allow_origin(cors::Any)
            .allow_methods(cors::Any)
            .allow_headers(cors::Any);
        app = app.layer(cors_layer);
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(handle_panic)),
    )
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }))
}

/// List tools endpoint.
async fn list_tools(_auth: Authenticated, State(server): State<McpServer>) -> impl IntoResponse {
    Json(json!({ "tools": server.list_tools() }))
}

/// Call tool endpoint.
#[instrument(skip_all)]
async fn call_tool(
    _auth: Authenticated,
    State(server): State<McpServer>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, ApiError> {
    let body = body.map_err(|rejection| {
        warn!("Failed to read call request body: {}", rejection.body_text());
        ApiError::internal(rejection.body_text())
    })?;
    let (name, arguments) = parse_call_body(&body)?;

    info!("API call - Tool: {}", name);

    let result = server.call_tool(&name, arguments).await?;

    Ok(Json(call_result_json(&result)))
}

/// Fallback for unmatched paths and methods.
async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Extract the tool name and arguments from a call request body.
///
/// An empty body or any non-object JSON value counts as `{}`. Missing or
/// non-object arguments become an empty map so the tool itself reports what
/// is missing.
fn parse_call_body(body: &[u8]) -> Result<(String, JsonObject), ApiError> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        JsonObject::new()
    } else {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            warn!("Malformed call request body: {}", e);
            ApiError::internal(e.to_string())
        })?;
        match value {
            Value::Object(map) => map,
            _ => JsonObject::new(),
        }
    };

    let name = match request.get("name") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        None => return Err(ApiError::bad_request("Tool name is required")),
        Some(value) if is_falsy(value) => {
            return Err(ApiError::bad_request("Tool name is required"));
        }
        Some(other) => return Err(ApiError::UnknownTool(other.to_string())),
    };

    let arguments = match request.get("arguments") {
        Some(Value::Object(map)) => map.clone(),
        _ => JsonObject::new(),
    };

    Ok((name, arguments))
}

/// Whether a JSON value counts as "no value" for a required field.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Bool(true) | Value::Array(_) | Value::Object(_) => false,
    }
}

/// Render a tool result as the `{content, isError}` envelope.
fn call_result_json(result: &CallToolResult) -> Value {
    json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    })
}

/// Top-level fault handler for panics outside tool execution.
fn handle_panic(_payload: Box<dyn Any + Send + 'static>) -> Response {
    error!("Unhandled panic while processing request");
    ApiError::Internal { details: None }.into_response()
}

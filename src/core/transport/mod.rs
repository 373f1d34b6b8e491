//! Transport layer for the MCP server.
//!
//! The gateway speaks plain request/response JSON over HTTP:
//! - `GET /health` - liveness, no authentication
//! - `GET /mcp/tools` - list tools (Bearer)
//! - `POST /mcp/tools/call` - execute a tool (Bearer)

mod config;
mod error;
pub mod http;

pub use config::{DEFAULT_PORT, HttpConfig};
pub use error::{
    ApiError, INTERNAL_ERROR_MESSAGE, TransportError, TransportResult, UNAUTHORIZED_MESSAGE,
};
pub use http::{HttpTransport, build_router};

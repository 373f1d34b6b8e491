//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including error handling, configuration, authentication, the server
//! handle and the HTTP transport.

pub mod config;
pub mod error;
pub mod security;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use security::{AuthError, AuthGate, Authenticated};
pub use server::McpServer;
pub use transport::{ApiError, HttpConfig, HttpTransport};

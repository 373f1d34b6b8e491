//! Math MCP Server Library
//!
//! This crate provides a minimal HTTP gateway that exposes MCP-style tools
//! behind a static bearer-token check.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling,
//!   authentication, the server handle and the HTTP transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Tools that can be executed by authenticated clients
//!
//! # Example
//!
//! ```rust,no_run
//! use math_mcp_server::core::{Config, HttpTransport, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::with_api_key("change-me");
//!     let transport = HttpTransport::new(config.transport.clone());
//!     transport.run(McpServer::new(config)).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};

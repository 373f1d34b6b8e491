//! Domains module containing business logic organized by bounded contexts.
//!
//! Each subdomain represents a specific area of functionality within the MCP
//! server. The gateway currently exposes a single domain: tools.

pub mod tools;

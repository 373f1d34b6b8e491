//! MCP Server implementation.
//!
//! [`McpServer`] bundles the immutable, process-wide pieces every request
//! needs: the configuration, the auth gate built from the configured secret
//! and the tool registry. It is cheap to clone and is used directly as the
//! HTTP router state.

use std::sync::Arc;

use axum::extract::FromRef;
use rmcp::model::{CallToolResult, JsonObject};
use tracing::instrument;

use super::config::Config;
use super::security::AuthGate;
use crate::domains::tools::{ToolError, ToolRegistry};

/// The main MCP server handle shared by all request handlers.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Bearer token gate for protected endpoints.
    auth: AuthGate,

    /// Registry of callable tools.
    tools: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server with the built-in tools.
    pub fn new(config: Config) -> Self {
        Self::with_registry(config, ToolRegistry::builtin())
    }

    /// Create a new MCP server with a custom tool registry.
    pub fn with_registry(config: Config, tools: ToolRegistry) -> Self {
        let auth = AuthGate::new(config.auth.api_key.clone());

        Self {
            config: Arc::new(config),
            auth,
            tools: Arc::new(tools),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the auth gate.
    pub fn auth(&self) -> &AuthGate {
        &self.auth
    }

    /// Get the tool registry.
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// List all available tools as JSON descriptors.
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tools
            .list()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallToolResult, ToolError> {
        self.tools.call(name, arguments).await
    }
}

impl FromRef<McpServer> for AuthGate {
    fn from_ref(server: &McpServer) -> Self {
        server.auth.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_server() -> McpServer {
        McpServer::new(Config::with_api_key("test-secret"))
    }

    #[test]
    fn test_list_tools_shape() {
        let tools = test_server().list_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "add_numbers");
        assert_eq!(tools[0]["description"], "Add two numbers together");
        assert_eq!(tools[0]["inputSchema"]["type"], "object");
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["a", "b"]));
    }

    #[test]
    fn test_auth_gate_uses_configured_secret() {
        let server = test_server();
        assert!(server.auth().check(Some("Bearer test-secret")).is_ok());
        assert!(server.auth().check(Some("Bearer other")).is_err());
    }

    #[test]
    fn test_custom_registry() {
        let server =
            McpServer::with_registry(Config::with_api_key("k"), ToolRegistry::new());
        assert!(server.list_tools().is_empty());
    }

    #[tokio::test]
    async fn test_call_tool() {
        let args = json!({ "a": 1, "b": 1 }).as_object().cloned().unwrap();
        let result = test_server().call_tool("add_numbers", args).await.unwrap();
        assert_ne!(result.is_error, Some(true));
    }
}

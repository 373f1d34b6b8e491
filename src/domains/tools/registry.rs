//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools, keyed by name
//! - Dispatch of tool calls to the bound [`ToolHandler`]
//! - Tool metadata for listing

use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::model::{CallToolResult, Content, JsonObject, RawContent, Tool};
use tracing::{error, info, instrument, warn};

use super::definitions::AddNumbersTool;
use super::{ToolError, ToolHandler};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// The registry is populated once at start-up and is read-only afterwards,
/// so it can be shared between requests behind an `Arc` without locking.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Create an empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry containing every built-in tool.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        if let Err(e) = registry.register(AddNumbersTool) {
            error!("Failed to register built-in tool: {}", e);
        }
        registry
    }

    /// Register a tool handler.
    ///
    /// Fails if a tool with the same name is already present.
    pub fn register(&mut self, handler: impl ToolHandler + 'static) -> Result<(), ToolError> {
        let name = handler.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::AlreadyRegistered(name));
        }
        self.tools.insert(name, Arc::new(handler));
        Ok(())
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Check whether a tool is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get all tools as Tool models (metadata), ordered by name.
    pub fn list(&self) -> Vec<Tool> {
        self.tools.values().map(|t| t.descriptor()).collect()
    }

    /// Dispatch a tool call to the appropriate handler.
    ///
    /// Only an unknown tool name is reported as `Err`. Whatever happens
    /// inside the handler (an error result or a panic) comes back as an
    /// `isError` envelope.
    #[instrument(skip(self, arguments))]
    pub async fn call(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallToolResult, ToolError> {
        let Some(handler) = self.tools.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };

        info!(
            "Tool call - {}: {}",
            name,
            serde_json::Value::Object(arguments.clone())
        );

        let result = match AssertUnwindSafe(handler.execute(arguments))
            .catch_unwind()
            .await
        {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                warn!("Tool {} failed: {}", name, e);
                e.into_call_result()
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Tool {} panicked: {}", name, message);
                CallToolResult::error(vec![Content::text(format!("Error: {message}"))])
            }
        };

        info!(
            "Tool result - {}: is_error={}, content={:?}",
            name,
            result.is_error.unwrap_or(false),
            content_text(&result)
        );

        Ok(result)
    }
}

/// Text entries of a result envelope, for logging.
fn content_text(result: &CallToolResult) -> Vec<&str> {
    result
        .content
        .iter()
        .filter_map(|c| match &c.raw {
            RawContent::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
        .collect()
}

/// Extract a readable message from a panic payload.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown error".to_string()
    }
}

//! Tool handler abstraction.
//!
//! Every tool the gateway can dispatch to implements [`ToolHandler`]. The
//! registry only knows about this trait, so adding a tool never requires
//! touching the dispatcher.

use rmcp::model::{CallToolResult, JsonObject, Tool};

use super::ToolError;

/// Result type returned by tool handlers.
///
/// `Ok` carries the envelope to send back verbatim, `Err` is a handler-level
/// failure that the registry turns into an `isError` envelope.
pub type ToolResult = Result<CallToolResult, ToolError>;

/// Trait for implementing tool handlers.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Get the name of this tool.
    fn name(&self) -> &str;

    /// Get the descriptor advertised to clients (name, description, input schema).
    fn descriptor(&self) -> Tool;

    /// Execute the tool with the given arguments.
    async fn execute(&self, arguments: JsonObject) -> ToolResult;
}

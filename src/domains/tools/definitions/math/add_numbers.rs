//! Add numbers tool definition.
//!
//! A tool that returns the sum of two numeric arguments `a` and `b`.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde_json::{Number, Value, json};
use tracing::{debug, instrument, warn};

use crate::domains::tools::{ToolError, ToolHandler, ToolResult};

// ============================================================================
// Tool Definition
// ============================================================================

/// Add numbers tool - adds two numbers together.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddNumbersTool;

impl AddNumbersTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "add_numbers";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Add two numbers together";

    /// Execute the tool logic.
    ///
    /// Both `a` and `b` must be JSON numbers. Integer inputs are summed as
    /// integers while the result fits; anything else falls back to `f64`.
    #[instrument(skip_all)]
    pub fn add(arguments: &JsonObject) -> ToolResult {
        let a = arguments.get("a");
        let b = arguments.get("b");

        let (Some(Value::Number(a)), Some(Value::Number(b))) = (a, b) else {
            warn!("add_numbers called with non-numeric arguments");
            return Err(ToolError::invalid_arguments(format!(
                "Both parameters a and b must be numbers (got a: {}, b: {})",
                kind_of(a),
                kind_of(b)
            )));
        };

        let sum = sum(a, b)?;
        debug!("{} + {} = {}", a, b, sum);

        let text = serde_json::to_string(&json!({ "result": sum }))
            .map_err(|e| ToolError::internal(e.to_string()))?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: Arc::new(input_schema()),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

#[async_trait::async_trait]
impl ToolHandler for AddNumbersTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn descriptor(&self) -> Tool {
        Self::to_tool()
    }

    async fn execute(&self, arguments: JsonObject) -> ToolResult {
        Self::add(&arguments)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// JSON schema for the tool input: two required numbers.
fn input_schema() -> JsonObject {
    let mut schema = JsonObject::new();
    schema.insert("type".into(), json!("object"));
    schema.insert(
        "properties".into(),
        json!({
            "a": { "type": "number", "description": "First number to add" },
            "b": { "type": "number", "description": "Second number to add" }
        }),
    );
    schema.insert("required".into(), json!(["a", "b"]));
    schema
}

/// Largest integer an `f64` represents exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Add two JSON numbers, preferring exact integer arithmetic.
fn sum(a: &Number, b: &Number) -> Result<Number, ToolError> {
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        if let Some(sum) = a.checked_add(b) {
            return Ok(sum.into());
        }
    }

    if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
        if let Some(sum) = a.checked_add(b) {
            return Ok(sum.into());
        }
    }

    let (Some(a), Some(b)) = (a.as_f64(), b.as_f64()) else {
        return Err(ToolError::internal("number is not representable as f64"));
    };

    let sum = a + b;
    if !sum.is_finite() {
        return Err(ToolError::execution_failed("sum is not a finite number"));
    }

    // Whole numbers render without a fractional part, like integer inputs.
    if sum.fract() == 0.0 && sum.abs() <= MAX_SAFE_INTEGER {
        return Ok((sum as i64).into());
    }

    Number::from_f64(sum)
        .ok_or_else(|| ToolError::execution_failed("sum is not a finite number"))
}

/// Short description of a JSON value's type, for error messages.
fn kind_of(value: Option<&Value>) -> &'static str {
    match value {
        None => "missing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn args(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => panic!("Expected JSON object"),
        }
    }

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    fn result_value(result: &CallToolResult) -> Value {
        let parsed: Value = serde_json::from_str(text_of(result)).unwrap();
        parsed["result"].clone()
    }

    #[tokio::test]
    async fn test_add_integers() {
        let result = AddNumbersTool
            .execute(args(json!({ "a": 2, "b": 3 })))
            .await
            .unwrap();

        assert_ne!(result.is_error, Some(true));
        assert_eq!(text_of(&result), r#"{"result":5}"#);
    }

    #[test]
    fn test_add_negative_and_zero() {
        let result = AddNumbersTool::add(&args(json!({ "a": -7, "b": 0 }))).unwrap();
        assert_eq!(result_value(&result), json!(-7));
    }

    #[test]
    fn test_add_floats() {
        let result = AddNumbersTool::add(&args(json!({ "a": 0.1, "b": 0.2 }))).unwrap();
        assert_eq!(result_value(&result).as_f64(), Some(0.1 + 0.2));
    }

    #[test]
    fn test_whole_float_sum_renders_as_integer() {
        let result = AddNumbersTool::add(&args(json!({ "a": 2.5, "b": 2.5 }))).unwrap();
        assert_eq!(text_of(&result), r#"{"result":5}"#);

        let parsed: Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(parsed, json!({ "result": 5 }));
    }

    #[test]
    fn test_add_mixed_integer_and_float() {
        let result = AddNumbersTool::add(&args(json!({ "a": 1, "b": 2.5 }))).unwrap();
        assert_eq!(result_value(&result).as_f64(), Some(3.5));
    }

    #[test]
    fn test_add_large_unsigned() {
        let result =
            AddNumbersTool::add(&args(json!({ "a": u64::MAX - 1, "b": 1 }))).unwrap();
        assert_eq!(result_value(&result), json!(u64::MAX));
    }

    #[test]
    fn test_integer_overflow_falls_back_to_float() {
        let result = AddNumbersTool::add(&args(json!({ "a": i64::MAX, "b": i64::MAX }))).unwrap();
        let expected = i64::MAX as f64 * 2.0;
        assert_eq!(result_value(&result).as_f64(), Some(expected));
    }

    #[test]
    fn test_float_overflow_is_error() {
        let err = AddNumbersTool::add(&args(json!({ "a": f64::MAX, "b": f64::MAX }))).unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }

    #[test]
    fn test_string_argument_rejected() {
        let err = AddNumbersTool::add(&args(json!({ "a": "2", "b": 3 }))).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Both parameters a and b must be numbers"));
        assert!(msg.contains("a: string"));
    }

    #[test]
    fn test_null_and_missing_arguments_rejected() {
        let err = AddNumbersTool::add(&args(json!({ "a": null }))).unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert!(msg.contains("a: null"));
        assert!(msg.contains("b: missing"));
    }

    #[test]
    fn test_empty_arguments_rejected() {
        let err = AddNumbersTool::add(&JsonObject::new()).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let input = args(json!({ "a": 40, "b": 2 }));
        let first = AddNumbersTool::add(&input).unwrap();
        let second = AddNumbersTool::add(&input).unwrap();
        assert_eq!(text_of(&first), text_of(&second));
    }

    #[test]
    fn test_to_tool_schema() {
        let tool = AddNumbersTool::to_tool();
        assert_eq!(tool.name, "add_numbers");
        assert_eq!(tool.description.as_deref(), Some("Add two numbers together"));

        let schema = Value::Object((*tool.input_schema).clone());
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["a"]["type"], "number");
        assert_eq!(schema["properties"]["b"]["description"], "Second number to add");
        assert_eq!(schema["required"], json!(["a", "b"]));
    }
}

//! Tool descriptors, schema translation, and the executor capability.
//!
//! A [`Tool`] describes one caller-supplied function: name, description,
//! JSON Schema for its parameters, and optional default argument values.
//! [`definitions`] translates a tool set into the shape sent to the
//! backend. The actual execution is an opaque capability behind the
//! [`ToolExecutor`] trait, injected by the caller so the loop stays
//! testable with deterministic stubs.

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

/// A caller-supplied tool the model may request. Read-only to the loop.
#[derive(Debug, Clone)]
pub struct Tool {
    /// Unique name the LLM uses to call this tool.
    pub name: String,
    /// Human-readable description sent to the LLM.
    pub description: String,
    /// JSON Schema describing the tool's input parameters.
    pub parameters: Value,
    /// Default argument values, merged under the model-supplied arguments
    /// before execution.
    pub defaults: Option<Value>,
}

impl Tool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            defaults: None,
        }
    }

    /// Sets default argument values for this tool.
    pub fn with_defaults(mut self, defaults: Value) -> Self {
        self.defaults = Some(defaults);
        self
    }
}

/// Definition sent to the backend so the model knows what tools are available.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema for the accepted arguments.
    pub parameters: Value,
}

/// Translates a tool set into backend function declarations.
///
/// Returns `None` for an empty set: the completion request must then omit
/// tool calling entirely. An empty-but-present list and an absent list are
/// not equivalent at the backend boundary.
pub fn definitions(tools: &[Tool]) -> Option<Vec<ToolDefinition>> {
    if tools.is_empty() {
        return None;
    }
    Some(
        tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.name.clone(),
                description: t.description.clone(),
                parameters: t.parameters.clone(),
            })
            .collect(),
    )
}

/// Merges a tool's default arguments with the model-supplied ones.
///
/// Model-supplied values win on key conflict. When the supplied payload is
/// not a JSON object it is returned as-is; defaults only apply to object
/// payloads.
pub fn merge_arguments(defaults: Option<&Value>, supplied: &Value) -> Value {
    let Some(Value::Object(base)) = defaults else {
        return supplied.clone();
    };
    let Value::Object(overrides) = supplied else {
        return supplied.clone();
    };
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    Value::Object(merged)
}

/// The opaque tool-execution capability.
///
/// Given a tool name and merged arguments, produce the raw output or an
/// opaque failure. `raw_output` asks the implementation for the tool's
/// unprocessed result rather than a user-facing summary.
#[async_trait::async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn run(&self, name: &str, arguments: Value, raw_output: bool) -> Result<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_tool_set_has_no_definitions() {
        assert!(definitions(&[]).is_none());
    }

    #[test]
    fn definitions_carry_name_description_schema() {
        let tools = vec![Tool::new(
            "search",
            "Search the web",
            json!({"type": "object", "properties": {"query": {"type": "string"}}}),
        )];
        let defs = definitions(&tools).unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "search");
        assert_eq!(defs[0].parameters["type"], "object");
    }

    #[test]
    fn merge_model_values_win() {
        let defaults = json!({"x": 1, "y": 2});
        let supplied = json!({"y": 9});
        let merged = merge_arguments(Some(&defaults), &supplied);
        assert_eq!(merged, json!({"x": 1, "y": 9}));
    }

    #[test]
    fn merge_without_defaults_passes_through() {
        let supplied = json!({"q": "rust"});
        assert_eq!(merge_arguments(None, &supplied), supplied);
    }

    #[test]
    fn merge_non_object_payload_passes_through() {
        let defaults = json!({"x": 1});
        let supplied = json!([1, 2, 3]);
        assert_eq!(merge_arguments(Some(&defaults), &supplied), supplied);
    }
}

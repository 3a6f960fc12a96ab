//! Per-call tool execution.
//!
//! Resolves one requested tool call against the request's tool set and
//! invokes the opaque [`ToolExecutor`] capability. Every failure path —
//! malformed argument payload, unknown tool name, executor failure — is
//! dropped at this single-call granularity: the call is skipped, nothing
//! is appended to the conversation, and the loop continues. Skips are
//! logged but never surfaced to the caller.

use serde_json::Value;
use tracing::{debug, warn};

use crate::message::ToolCall;
use crate::tool::{merge_arguments, Tool, ToolExecutor};

/// A successfully executed tool call and its raw output.
#[derive(Debug, Clone)]
pub(crate) struct ExecutedCall {
    pub call: ToolCall,
    pub output: Value,
}

/// Normalizes the raw argument payload into structured data.
///
/// Backends deliver arguments as a JSON object, as a string still to be
/// parsed, or as `null` (normalized to an empty object). Anything else,
/// or a string that does not parse, is malformed.
fn parse_arguments(raw: &Value) -> Option<Value> {
    match raw {
        Value::Object(_) => Some(raw.clone()),
        Value::Null => Some(Value::Object(serde_json::Map::new())),
        Value::String(text) => serde_json::from_str(text).ok(),
        _ => None,
    }
}

/// Executes one requested tool call against the request's tool set.
///
/// Returns `None` when the call is skipped for any reason; the caller
/// appends nothing for skipped calls.
pub(crate) async fn execute_call(
    call: &ToolCall,
    tools: &[Tool],
    executor: &dyn ToolExecutor,
) -> Option<ExecutedCall> {
    let Some(arguments) = parse_arguments(&call.arguments) else {
        warn!(tool = %call.name, id = %call.id, "malformed tool arguments, skipping call");
        return None;
    };

    let Some(tool) = tools.iter().find(|t| t.name == call.name) else {
        warn!(tool = %call.name, id = %call.id, "unknown tool, skipping call");
        return None;
    };

    let merged = merge_arguments(tool.defaults.as_ref(), &arguments);
    debug!(tool = %call.name, id = %call.id, "executing tool call");

    match executor.run(&call.name, merged, true).await {
        Ok(output) => Some(ExecutedCall {
            call: call.clone(),
            output,
        }),
        Err(err) => {
            warn!(tool = %call.name, id = %call.id, error = %err, "tool execution failed, skipping call");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{bail, Result};
    use serde_json::json;

    /// Echoes the merged arguments back, or fails for the tool named "broken".
    struct EchoExecutor;

    #[async_trait::async_trait]
    impl ToolExecutor for EchoExecutor {
        async fn run(&self, name: &str, arguments: Value, _raw_output: bool) -> Result<Value> {
            if name == "broken" {
                bail!("executor failure");
            }
            Ok(arguments)
        }
    }

    fn tool_set() -> Vec<Tool> {
        vec![
            Tool::new("echo", "Echo arguments", json!({"type": "object"}))
                .with_defaults(json!({"x": 1, "y": 2})),
            Tool::new("broken", "Always fails", json!({"type": "object"})),
        ]
    }

    fn call(name: &str, arguments: Value) -> ToolCall {
        ToolCall {
            id: format!("call_{name}"),
            name: name.into(),
            arguments,
        }
    }

    #[tokio::test]
    async fn merges_defaults_under_model_arguments() {
        let executed = execute_call(&call("echo", json!({"y": 9})), &tool_set(), &EchoExecutor)
            .await
            .unwrap();
        assert_eq!(executed.output, json!({"x": 1, "y": 9}));
    }

    #[tokio::test]
    async fn string_payload_is_parsed() {
        let executed = execute_call(
            &call("echo", json!("{\"y\": 3}")),
            &tool_set(),
            &EchoExecutor,
        )
        .await
        .unwrap();
        assert_eq!(executed.output, json!({"x": 1, "y": 3}));
    }

    #[tokio::test]
    async fn null_payload_normalizes_to_defaults() {
        let executed = execute_call(&call("echo", Value::Null), &tool_set(), &EchoExecutor)
            .await
            .unwrap();
        assert_eq!(executed.output, json!({"x": 1, "y": 2}));
    }

    #[tokio::test]
    async fn malformed_payload_skips_call() {
        let result = execute_call(&call("echo", json!("not json")), &tool_set(), &EchoExecutor).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn unknown_tool_skips_call() {
        let result = execute_call(&call("missing", json!({})), &tool_set(), &EchoExecutor).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn executor_failure_skips_call() {
        let result = execute_call(&call("broken", json!({})), &tool_set(), &EchoExecutor).await;
        assert!(result.is_none());
    }
}

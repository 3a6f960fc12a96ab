//! End-to-end loop tests against the public API, using deterministic
//! stub capabilities in place of a live backend.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::Result;
use serde_json::{json, Value};

use kairo::{
    agent_loop, ChatRequest, Completion, CompletionBackend, CompletionParams, ExecutionMode,
    LoopConfig, Message, Tool, ToolCall, ToolDefinition, ToolExecutor, TokenUsage,
};

/// Replays a scripted sequence of completions.
struct ScriptedBackend {
    responses: Mutex<VecDeque<Completion>>,
}

impl ScriptedBackend {
    fn new(responses: Vec<Completion>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait::async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(
        &self,
        _messages: &[Message],
        _tools: Option<&[ToolDefinition]>,
        _params: &CompletionParams,
    ) -> Result<Completion, kairo::Error> {
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("backend invoked more times than scripted"))
    }
}

/// A calculator: adds the two numbers in the merged arguments.
struct Calculator;

#[async_trait::async_trait]
impl ToolExecutor for Calculator {
    async fn run(&self, _name: &str, arguments: Value, _raw_output: bool) -> Result<Value> {
        let a = arguments["a"].as_f64().unwrap_or(0.0);
        let b = arguments["b"].as_f64().unwrap_or(0.0);
        Ok(json!(a + b))
    }
}

fn add_tool() -> Tool {
    Tool::new(
        "add",
        "Add two numbers and return the sum",
        json!({
            "type": "object",
            "properties": {
                "a": { "type": "number" },
                "b": { "type": "number" }
            },
            "required": ["a"]
        }),
    )
    .with_defaults(json!({"b": 10.0}))
}

#[tokio::test]
async fn full_request_runs_tools_and_aggregates() {
    let backend = ScriptedBackend::new(vec![
        Completion {
            text: None,
            tool_calls: vec![ToolCall {
                id: "call_1".into(),
                name: "add".into(),
                arguments: json!({"a": 32.0}),
            }],
            usage: TokenUsage::new(100, 20, 120),
        },
        Completion {
            text: Some("The sum is 42.".into()),
            tool_calls: Vec::new(),
            usage: TokenUsage::new(150, 10, 160),
        },
    ]);

    let request = ChatRequest::new("test-model", "sk-test")
        .system_prompt("You are a calculator assistant.")
        .context("The user prefers short answers.")
        .message(Message::user("What is 32 plus ten?"))
        .tool(add_tool());

    let response = agent_loop(&request, &backend, &Calculator, &LoopConfig::default())
        .await
        .unwrap();

    assert_eq!(response.content, "The sum is 42.");
    assert_eq!(response.model, "test-model");
    assert_eq!(response.usage, TokenUsage::new(250, 30, 280));

    // Default b=10 merged under the model-supplied a=32.
    assert_eq!(response.tool_results.unwrap(), vec![json!(42.0)]);

    let requested = response.tool_calls.unwrap();
    assert_eq!(requested.len(), 1);
    assert_eq!(requested[0].name, "add");
}

#[tokio::test]
async fn parameters_only_reports_without_running() {
    let backend = ScriptedBackend::new(vec![Completion {
        text: None,
        tool_calls: vec![ToolCall {
            id: "call_1".into(),
            name: "add".into(),
            arguments: json!({"a": 1.0, "b": 2.0}),
        }],
        usage: TokenUsage::new(50, 5, 55),
    }]);

    let request = ChatRequest::new("test-model", "sk-test")
        .message(Message::user("add 1 and 2"))
        .tool(add_tool())
        .mode(ExecutionMode::ParametersOnly);

    let response = agent_loop(&request, &backend, &Calculator, &LoopConfig::default())
        .await
        .unwrap();

    assert!(response.tool_results.is_none());
    let requested = response.tool_calls.unwrap();
    assert_eq!(requested[0].arguments, json!({"a": 1.0, "b": 2.0}));
}

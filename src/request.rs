//! The inbound request and outbound response contract.
//!
//! [`ChatRequest`] is the immutable input to one loop run; builder
//! methods let callers assemble it fluently. [`ChatResponse`] is the
//! aggregated result: final text, cumulative token counts, and —
//! when the model used tools — what it asked for and what was produced.

use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::message::Message;
use crate::tool::Tool;
use crate::usage::TokenUsage;

/// Policy choosing whether requested tool calls are actually run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Execute requested tools and feed results back until the model
    /// stops asking or the iteration cap is reached.
    #[default]
    Sync,
    /// Return the model's requested tool calls to the caller without
    /// running them. The backend is invoked exactly once.
    ParametersOnly,
}

/// One request to the loop. Immutable once built.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Optional system prompt, placed first in the conversation.
    pub system_prompt: Option<String>,
    /// Optional context, carried as a user message before the history.
    pub context: Option<String>,
    /// Prior messages in their original order.
    pub messages: Vec<Message>,
    /// Model identifier, echoed back in the response.
    pub model: String,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u64>,
    /// Request structured (JSON) output from the backend.
    pub json_output: bool,
    /// Tools the model may call. Empty means tool calling is omitted
    /// from the backend request entirely.
    pub tools: Vec<Tool>,
    pub mode: ExecutionMode,
    /// API credential. Required; an empty key fails the request before
    /// any backend call.
    pub api_key: String,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            system_prompt: None,
            context: None,
            messages: Vec::new(),
            model: model.into(),
            temperature: None,
            max_tokens: None,
            json_output: false,
            tools: Vec::new(),
            mode: ExecutionMode::default(),
            api_key: api_key.into(),
        }
    }

    /// Seeds a request from loaded configuration. The credential still
    /// comes from the caller.
    pub fn from_config(config: &Config, api_key: impl Into<String>) -> Self {
        let mut request = Self::new(config.model.clone(), api_key);
        request.system_prompt = config.system_prompt.clone();
        request.temperature = config.temperature;
        request.max_tokens = config.max_tokens;
        request
    }

    pub fn system_prompt(mut self, text: impl Into<String>) -> Self {
        self.system_prompt = Some(text.into());
        self
    }

    pub fn context(mut self, text: impl Into<String>) -> Self {
        self.context = Some(text.into());
        self
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    pub fn tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u64) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn json_output(mut self, json_output: bool) -> Self {
        self.json_output = json_output;
        self
    }

    pub fn mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }
}

/// A tool call as reported back to the caller: what the model asked for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestedCall {
    pub name: String,
    pub arguments: Value,
}

/// The aggregated result of one loop run.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    /// The latest completion's text, falling back to the first
    /// completion's text when later turns returned none.
    pub content: String,
    /// The model identifier the caller requested (not necessarily what
    /// the backend reports).
    pub model: String,
    /// Token counts summed over every backend invocation for this request.
    pub usage: TokenUsage,
    /// Every tool call requested in the *first* completion, if any.
    /// Later iterations' requests are not repeated here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<RequestedCall>>,
    /// Outputs of every tool actually executed, across all iterations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_results: Option<Vec<Value>>,
}

//! The completion backend capability.
//!
//! The loop treats the language model as a black box behind the
//! [`CompletionBackend`] trait: submit a conversation, get back text
//! and/or tool-call requests plus usage counts. Implementations own all
//! marshaling to a concrete provider's wire format (and its SDK
//! authentication); none of that leaks into the loop.

use crate::error::Error;
use crate::message::{Message, ToolCall};
use crate::tool::ToolDefinition;
use crate::usage::TokenUsage;

/// Per-request parameters forwarded to the backend on every invocation.
#[derive(Debug, Clone)]
pub struct CompletionParams {
    /// Model identifier.
    pub model: String,
    /// Sampling temperature, if the caller set one.
    pub temperature: Option<f64>,
    /// Maximum output tokens, if the caller set one.
    pub max_tokens: Option<u64>,
    /// Ask the backend for structured (JSON) output.
    pub json_output: bool,
}

/// One response from the backend for a given conversation.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    /// Textual content, absent when the model only requested tools.
    pub text: Option<String>,
    /// Tool invocations the model requested this turn.
    pub tool_calls: Vec<ToolCall>,
    /// Token counts for this invocation alone.
    pub usage: TokenUsage,
}

/// The opaque completion capability.
///
/// `tools` is `None` when the request has no tool set; implementations
/// must then omit tool calling from the outgoing request entirely rather
/// than sending an empty list. When `tools` is `Some`, the backend may
/// autonomously choose to call them.
#[async_trait::async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Submits the conversation and returns one completion.
    ///
    /// # Errors
    ///
    /// Any failure here (network, auth, malformed response) is fatal to
    /// the whole request and aborts the loop.
    async fn complete(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
        params: &CompletionParams,
    ) -> Result<Completion, Error>;
}

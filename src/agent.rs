//! The tool-use iteration loop.
//!
//! [`agent_loop`] drives a request end to end: assemble the conversation,
//! invoke the backend, and — in [`Sync`](ExecutionMode::Sync) mode — keep
//! executing requested tools and feeding results back until the model
//! stops asking or the iteration cap is reached. All mutable loop state
//! lives in a single [`LoopState`] accumulator threaded through each
//! iteration, so every step is independently testable.
//!
//! Reaching the iteration cap is a normal exit, not an error: the caller
//! receives whatever has accumulated so far. Only a backend failure or a
//! missing credential aborts the request.

use futures::{stream, StreamExt};
use tracing::{debug, warn};

use crate::backend::{Completion, CompletionBackend, CompletionParams};
use crate::constants::DEFAULT_MAX_ITERATIONS;
use crate::conversation;
use crate::error::Error;
use crate::executor::{execute_call, ExecutedCall};
use crate::message::{Message, ToolCall};
use crate::request::{ChatRequest, ChatResponse, ExecutionMode, RequestedCall};
use crate::tool::{self, Tool, ToolExecutor};
use crate::usage::TokenUsage;

/// Tunables for the iteration loop.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Maximum tool-calling round-trips after the first completion.
    /// Reaching it terminates the loop normally.
    pub max_iterations: usize,
    /// Execute tool calls of one batch concurrently. All calls still
    /// complete before the next completion is issued.
    pub parallel_tools: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            parallel_tools: false,
        }
    }
}

/// Accumulator threaded through loop iterations.
///
/// Owns the conversation state for the lifetime of one request. The
/// conversation grows by exactly two entries per executed tool call:
/// an assistant message recording the call and a tool message recording
/// its result.
struct LoopState {
    messages: Vec<Message>,
    usage: TokenUsage,
    /// Text of the first completion, the fallback when later completions
    /// return none.
    first_text: Option<String>,
    /// Text of the most recent completion.
    last_text: Option<String>,
    /// Tool calls requested by the first completion, reported once in
    /// the response regardless of how many iterations follow.
    first_calls: Vec<ToolCall>,
    /// Outputs of every tool executed, across all iterations.
    tool_results: Vec<serde_json::Value>,
    iterations: usize,
}

impl LoopState {
    fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            usage: TokenUsage::default(),
            first_text: None,
            last_text: None,
            first_calls: Vec::new(),
            tool_results: Vec::new(),
            iterations: 0,
        }
    }

    /// Folds one completion's usage and text into the accumulator.
    fn absorb(&mut self, completion: &Completion) {
        self.usage += &completion.usage;
        if self.first_text.is_none() && self.iterations == 0 {
            self.first_text = completion.text.clone();
        }
        self.last_text = completion.text.clone();
    }

    /// Appends the call-record and result-record messages for each
    /// executed call; skipped calls append nothing.
    fn record_batch(&mut self, executed: Vec<Option<ExecutedCall>>) {
        for call in executed.into_iter().flatten() {
            self.messages.push(Message::tool_use(call.call.clone()));
            self.messages
                .push(Message::tool_result(call.call.id, call.output.clone()));
            self.tool_results.push(call.output);
        }
    }

    /// Merges the accumulated state into the outward response contract.
    fn into_response(self, request: &ChatRequest) -> ChatResponse {
        let tool_calls = if self.first_calls.is_empty() {
            None
        } else {
            Some(
                self.first_calls
                    .into_iter()
                    .map(|call| RequestedCall {
                        name: call.name,
                        arguments: call.arguments,
                    })
                    .collect(),
            )
        };
        let tool_results = if self.tool_results.is_empty() {
            None
        } else {
            Some(self.tool_results)
        };
        ChatResponse {
            content: self.last_text.or(self.first_text).unwrap_or_default(),
            model: request.model.clone(),
            usage: self.usage,
            tool_calls,
            tool_results,
        }
    }
}

/// Runs one request through the tool-use loop.
///
/// In [`ParametersOnly`](ExecutionMode::ParametersOnly) mode, or when the
/// request carries no tools, the backend is invoked exactly once and no
/// tool ever executes. Otherwise tools run batch by batch until a
/// completion requests none or the cap in `config` is reached.
///
/// # Errors
///
/// Fails immediately with [`Error::MissingApiKey`] when the request has
/// no credential; propagates any [`Error::Backend`] from the completion
/// capability without a partial response. Individual tool failures are
/// never errors.
pub async fn agent_loop(
    request: &ChatRequest,
    backend: &dyn CompletionBackend,
    executor: &dyn ToolExecutor,
    config: &LoopConfig,
) -> Result<ChatResponse, Error> {
    if request.api_key.trim().is_empty() {
        return Err(Error::MissingApiKey);
    }

    let params = CompletionParams {
        model: request.model.clone(),
        temperature: request.temperature,
        max_tokens: request.max_tokens,
        json_output: request.json_output,
    };
    let schema = tool::definitions(&request.tools);

    let mut state = LoopState::new(conversation::build(
        request.system_prompt.as_deref(),
        request.context.as_deref(),
        &request.messages,
    ));

    let completion = backend
        .complete(&state.messages, schema.as_deref(), &params)
        .await?;
    state.absorb(&completion);
    state.first_calls = completion.tool_calls.clone();

    // Parameters-only returns the requested calls without running them.
    // An absent tool schema means the backend was never offered tools,
    // so any calls it claims are ignored.
    if request.mode == ExecutionMode::ParametersOnly
        || schema.is_none()
        || completion.tool_calls.is_empty()
    {
        return Ok(state.into_response(request));
    }

    let mut calls = completion.tool_calls;
    loop {
        if state.iterations >= config.max_iterations {
            warn!(
                iterations = state.iterations,
                max = config.max_iterations,
                "iteration cap reached, returning accumulated response"
            );
            break;
        }

        debug!(
            iteration = state.iterations,
            batch = calls.len(),
            "executing tool batch"
        );
        let executed = execute_batch(&calls, &request.tools, executor, config.parallel_tools).await;
        state.record_batch(executed);

        let completion = backend
            .complete(&state.messages, schema.as_deref(), &params)
            .await?;
        state.iterations += 1;
        state.absorb(&completion);
        calls = completion.tool_calls;

        if calls.is_empty() {
            debug!(iterations = state.iterations, "model stopped requesting tools");
            break;
        }
    }

    Ok(state.into_response(request))
}

/// Executes one batch of tool calls, preserving call order in the output.
///
/// Calls within a batch have no ordering dependency, so `parallel` fans
/// them out concurrently; either way all calls finish before the caller
/// issues the next completion.
async fn execute_batch(
    calls: &[ToolCall],
    tools: &[Tool],
    executor: &dyn ToolExecutor,
    parallel: bool,
) -> Vec<Option<ExecutedCall>> {
    let run = |call| execute_call(call, tools, executor);
    if parallel && calls.len() > 1 {
        stream::iter(calls)
            .map(run)
            .buffered(calls.len())
            .collect()
            .await
    } else {
        stream::iter(calls).then(run).collect().await
    }
}

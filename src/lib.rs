//! kairo — a bounded tool-calling completion loop for conversational
//! LLM APIs.
//!
//! kairo adapts a chat-style language-model API into a uniform
//! request/response contract and drives the multi-turn tool-use loop:
//! when the model requests caller-supplied functions, kairo executes
//! them, feeds the results back, and repeats until the model stops
//! asking or the iteration cap is hit.
//!
//! The two external capabilities are injected as traits, so the loop
//! runs against any backend and stays testable with deterministic stubs:
//!
//! - [`CompletionBackend`] — submit a conversation, get back text
//!   and/or tool-call requests plus token counts.
//! - [`ToolExecutor`] — given a tool name and merged arguments, produce
//!   a result or an opaque failure.
//!
//! Requests are assembled with builder methods:
//!
//! ```
//! use kairo::{ChatRequest, ExecutionMode, Message, Tool};
//! use serde_json::json;
//!
//! let request = ChatRequest::new("claude-sonnet-4-6", "sk-my-key")
//!     .system_prompt("Be concise.")
//!     .message(Message::user("What's the weather in Kyoto?"))
//!     .tool(
//!         Tool::new(
//!             "weather",
//!             "Look up current weather for a city",
//!             json!({"type": "object", "properties": {"city": {"type": "string"}}}),
//!         )
//!         .with_defaults(json!({"units": "metric"})),
//!     )
//!     .mode(ExecutionMode::Sync);
//! ```
//!
//! and run with [`agent_loop`], which returns the aggregated
//! [`ChatResponse`] or a single fatal [`Error`]. Individual tool-call
//! failures are dropped silently per call; callers never see them.

pub mod agent;
pub mod backend;
pub mod config;
pub mod constants;
pub mod conversation;
pub mod error;
mod executor;
pub mod message;
pub mod request;
pub mod tool;
pub mod usage;

pub use agent::{agent_loop, LoopConfig};
pub use backend::{Completion, CompletionBackend, CompletionParams};
pub use config::Config;
pub use error::Error;
pub use message::{Message, ToolCall};
pub use request::{ChatRequest, ChatResponse, ExecutionMode, RequestedCall};
pub use tool::{Tool, ToolDefinition, ToolExecutor};
pub use usage::TokenUsage;

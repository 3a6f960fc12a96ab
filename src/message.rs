//! Message types for kairo's conversation state.
//!
//! A conversation is an ordered, append-only `Vec<Message>`. The
//! [`Message`] enum tags each entry by role so the differing payload
//! shapes (plain text, tool-call records, tool results) stay typed.
//! These are kairo's internal types; a [`CompletionBackend`]
//! implementation converts them to its wire format when sending.
//!
//! [`CompletionBackend`]: crate::backend::CompletionBackend

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool invocation requested by the LLM inside one completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Opaque identifier for this call, used to correlate the eventual
    /// result message on the next turn.
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// Raw JSON argument payload supplied by the model.
    pub arguments: Value,
}

/// A single message in a conversation.
///
/// The serde representation tags each variant with its `role` so the
/// serialized form matches the usual chat-API shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System {
        content: String,
    },
    User {
        content: String,
    },
    Assistant {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
    },
    /// The result of an executed tool call, fed back to the LLM.
    #[serde(rename = "tool")]
    ToolResult {
        tool_call_id: String,
        content: Value,
    },
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self::System {
            content: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::User {
            content: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::Assistant {
            content: Some(text.into()),
            tool_calls: Vec::new(),
        }
    }

    /// Creates an assistant message recording a tool call the model requested.
    pub fn tool_use(call: ToolCall) -> Self {
        Self::Assistant {
            content: None,
            tool_calls: vec![call],
        }
    }

    /// Creates a tool result message to feed back to the LLM, keyed by the
    /// originating call's identifier.
    pub fn tool_result(tool_call_id: impl Into<String>, content: Value) -> Self {
        Self::ToolResult {
            tool_call_id: tool_call_id.into(),
            content,
        }
    }

    /// Returns the textual content, if this message carries any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::System { content } | Self::User { content } => Some(content.as_str()),
            Self::Assistant { content, .. } => content.as_deref(),
            Self::ToolResult { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_role_tag() {
        let msg = Message::user("hello");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({"role": "user", "content": "hello"}));
    }

    #[test]
    fn tool_result_round_trips() {
        let msg = Message::tool_result("call_1", json!({"temp": 21}));
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["role"], "tool");
        assert_eq!(value["tool_call_id"], "call_1");
        let back: Message = serde_json::from_value(value).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn tool_use_has_no_text() {
        let msg = Message::tool_use(ToolCall {
            id: "c1".into(),
            name: "search".into(),
            arguments: json!({}),
        });
        assert_eq!(msg.text(), None);
    }
}

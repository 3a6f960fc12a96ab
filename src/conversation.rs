//! Conversation assembly.
//!
//! Builds the ordered message sequence a request starts from: system
//! prompt first, then a user message carrying the context, then the
//! caller's prior messages in their original relative order. Pure
//! construction — no deduplication, no truncation, no token budgeting.

use crate::message::Message;

/// Assembles the initial conversation for a request.
pub fn build(
    system_prompt: Option<&str>,
    context: Option<&str>,
    history: &[Message],
) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    if let Some(system) = system_prompt {
        messages.push(Message::system(system));
    }
    if let Some(context) = context {
        messages.push(Message::user(context));
    }
    messages.extend(history.iter().cloned());
    messages
}

//! Token usage accounting.
//!
//! Every completion carries a [`TokenUsage`] record. The iteration loop
//! sums these across every backend invocation made for one request, so
//! the counts in a [`ChatResponse`](crate::request::ChatResponse) are
//! cumulative and monotonically non-decreasing across iterations.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Token counts for one completion, or the running sum across a request.
///
/// Fields default to 0 when the backend omits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt (messages, system prompt, tool schema).
    #[serde(default)]
    pub prompt_tokens: u64,
    /// Tokens produced by the model's response.
    #[serde(default)]
    pub completion_tokens: u64,
    /// Total tokens as reported by the backend.
    #[serde(default)]
    pub total_tokens: u64,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u64, completion_tokens: u64, total_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens,
        }
    }
}

impl Add for TokenUsage {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += &rhs;
        self
    }
}

impl AddAssign for TokenUsage {
    fn add_assign(&mut self, rhs: Self) {
        *self += &rhs;
    }
}

impl AddAssign<&TokenUsage> for TokenUsage {
    /// Adds another `TokenUsage` in-place, saturating on overflow.
    fn add_assign(&mut self, rhs: &Self) {
        self.prompt_tokens = self.prompt_tokens.saturating_add(rhs.prompt_tokens);
        self.completion_tokens = self.completion_tokens.saturating_add(rhs.completion_tokens);
        self.total_tokens = self.total_tokens.saturating_add(rhs.total_tokens);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_field_wise() {
        let mut total = TokenUsage::default();
        for _ in 0..3 {
            total += TokenUsage::new(10, 5, 15);
        }
        assert_eq!(total, TokenUsage::new(30, 15, 45));
    }

    #[test]
    fn add_saturates() {
        let a = TokenUsage::new(u64::MAX, 1, 1);
        let b = TokenUsage::new(1, 1, 1);
        assert_eq!((a + b).prompt_tokens, u64::MAX);
    }

    #[test]
    fn missing_fields_deserialize_to_zero() {
        let usage: TokenUsage = serde_json::from_str("{}").unwrap();
        assert_eq!(usage, TokenUsage::default());
    }
}

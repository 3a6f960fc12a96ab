//! The crate error type.
//!
//! Only two failures are ever surfaced to callers: a missing credential
//! (caught before any backend call) and a failure of the completion
//! backend itself. Per-call tool problems — malformed arguments, unknown
//! tool names, executor failures — are dropped at the single-call
//! granularity and never appear here.

/// Fatal errors propagated to the caller of [`agent_loop`](crate::agent_loop).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The request carried no API credential. Checked before any backend
    /// call is attempted.
    #[error("No API key set on the request")]
    MissingApiKey,

    /// The completion backend failed (network, auth, malformed response).
    /// Aborts the in-flight loop; no partial response is returned.
    #[error("Completion backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

//! Oracle abstraction: the language model the agent delegates to
//!
//! The oracle is an opaque capability: given a system prompt and user text it
//! returns a completion string. Nothing about the shape of that string is
//! trusted here; callers parse it defensively.

pub mod http;
#[cfg(test)]
pub(crate) mod mock;

use std::sync::Arc;

use async_trait::async_trait;

pub use http::ChatCompletionsOracle;

use crate::protocol::error::A2AResult;

/// A single completion call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Instructions the model must follow
    pub system_prompt: String,

    /// The caller's text, passed through verbatim
    pub user_text: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Upper bound on generated tokens
    pub max_output_tokens: u32,
}

/// Core oracle trait
///
/// Implementations must be safe to share between concurrent requests; the
/// agent builds one at start-up and hands out references for its lifetime.
#[async_trait]
pub trait Oracle: Send + Sync + 'static {
    /// Run one completion and return the raw text the model produced
    async fn complete(&self, request: CompletionRequest) -> A2AResult<String>;
}

/// Implement Oracle for shared oracles, including `Arc<dyn Oracle>`
#[async_trait]
impl<T: Oracle + ?Sized> Oracle for Arc<T> {
    async fn complete(&self, request: CompletionRequest) -> A2AResult<String> {
        (**self).complete(request).await
    }
}

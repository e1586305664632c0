use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;

use crate::{
    oracle::{CompletionRequest, Oracle},
    protocol::error::A2AResult,
};

/// Mock oracle for internal testing
///
/// Answers every completion with a closure so tests can script model replies
/// without a network connection. Counts calls so tests can assert whether the
/// oracle was consulted at all.
#[derive(Clone)]
pub(crate) struct MockOracle {
    handler: Arc<dyn Fn(CompletionRequest) -> A2AResult<String> + Send + Sync>,
    calls: Arc<AtomicUsize>,
}

impl MockOracle {
    /// Create a new mock oracle with a custom completion handler
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(CompletionRequest) -> A2AResult<String> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock oracle that always replies with `reply`
    pub fn replying(reply: impl Into<String>) -> Self {
        let reply = reply.into();
        Self::new(move |_| Ok(reply.clone()))
    }

    /// Number of completions requested so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Oracle for MockOracle {
    async fn complete(&self, request: CompletionRequest) -> A2AResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.handler)(request)
    }
}

impl std::fmt::Debug for MockOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockOracle").finish()
    }
}

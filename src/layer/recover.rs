//! Recovery layer: turns every failure into a failed task
//!
//! Callers are agents that key off `status.state`, so nothing below this layer
//! may surface as a transport error. Errors returned by the inner service and
//! panics raised while it runs both become a failed [`Task`].

use std::{
    any::Any,
    convert::Infallible,
    future::Future,
    panic::AssertUnwindSafe,
    pin::Pin,
    task::{Context, Poll},
};

use futures::FutureExt;
use tower::ServiceExt;
use tower_layer::Layer;
use tower_service::Service;
use tracing::{error, warn};

use crate::{
    protocol::{error::A2AError, Task},
    service::A2ARequest,
};

/// Layer that converts errors from the inner service into failed tasks
#[derive(Clone, Debug, Default)]
pub struct RecoverLayer;

impl RecoverLayer {
    /// Create a new recovery layer
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RecoverLayer {
    type Service = RecoverService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RecoverService { inner }
    }
}

/// Recovery service that wraps an inner service
#[derive(Clone, Debug)]
pub struct RecoverService<S> {
    inner: S,
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        format!("Internal error: {msg}")
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        format!("Internal error: {msg}")
    } else {
        "Internal error".to_string()
    }
}

impl<S> Service<A2ARequest> for RecoverService<S>
where
    S: Service<A2ARequest, Response = Task, Error = A2AError> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Task;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // Readiness of the inner service is awaited per call, so a failure
        // there is answered like any other error
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: A2ARequest) -> Self::Future {
        let inner = self.inner.clone();
        let request_id = req.id.clone();

        Box::pin(async move {
            let outcome = AssertUnwindSafe(inner.oneshot(req)).catch_unwind().await;

            let task = match outcome {
                Ok(Ok(task)) => task,
                Ok(Err(err)) => {
                    warn!(request_id = %request_id, error = %err, "request failed");
                    Task::failed(err.user_message())
                }
                Err(panic) => {
                    let err = A2AError::Other(panic_message(panic.as_ref()));
                    error!(request_id = %request_id, error = %err, "request panicked");
                    Task::failed(err.user_message())
                }
            };

            Ok(task)
        })
    }
}

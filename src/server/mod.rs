//! HTTP binding: the A2A endpoint and a health probe
//!
//! Every POST to the A2A endpoint is answered with HTTP 200 and a JSON-RPC
//! response wrapping a task; the task's state carries the outcome.

use std::{convert::Infallible, sync::Arc};

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower::{ServiceBuilder, ServiceExt};
use tower_http::trace::TraceLayer;
use tower_service::Service;
use tracing::{error, warn};

use crate::{
    codec::{Codec, JsonRpcCodec, Rejection, RpcResponse},
    config::Config,
    layer::RecoverLayer,
    oracle::ChatCompletionsOracle,
    protocol::{
        error::{A2AError, A2AResult},
        Task,
    },
    service::{A2ARequest, TranslationService},
    translate::{OracleTranslator, Translator},
};

/// Path of the A2A JSON-RPC endpoint
pub const A2A_PATH: &str = "/a2a/agent/translate";

/// Path of the health probe
pub const HEALTH_PATH: &str = "/health";

/// Name the agent reports about itself
pub const AGENT_NAME: &str = "lingoflow";

/// Largest request body read from the A2A endpoint
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Body of the health probe response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Health {
    /// Always `healthy` while the process serves requests
    pub status: String,

    /// Name of the agent, [`AGENT_NAME`]
    pub agent: String,
}

struct AppState<S> {
    codec: Arc<dyn Codec>,
    service: S,
}

impl<S: Clone> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            codec: self.codec.clone(),
            service: self.service.clone(),
        }
    }
}

/// Build the application for a configuration, talking to the configured oracle
pub fn build_app(config: &Config) -> A2AResult<Router> {
    let oracle = ChatCompletionsOracle::from_config(&config.oracle)?;
    let translator = OracleTranslator::new(oracle)
        .with_temperature(config.oracle.temperature)
        .with_max_output_tokens(config.oracle.max_output_tokens);

    Ok(app(translator, config.fail_on_oracle_fallback))
}

/// Build the application around any translator
pub fn app<T: Translator>(translator: T, fail_on_oracle_fallback: bool) -> Router {
    let service = ServiceBuilder::new()
        .layer(RecoverLayer::new())
        .service(TranslationService::new(translator).fail_on_oracle_fallback(fail_on_oracle_fallback));

    router(service)
}

/// Route requests to an already assembled service stack
pub fn router<S>(service: S) -> Router
where
    S: Service<A2ARequest, Response = Task, Error = Infallible> + Clone + Send + Sync + 'static,
    S::Future: Send,
{
    let state = AppState {
        codec: Arc::new(JsonRpcCodec::new()),
        service,
    };

    Router::new()
        .route(A2A_PATH, post(a2a_endpoint::<S>))
        .route(HEALTH_PATH, get(health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn a2a_endpoint<S>(
    State(state): State<AppState<S>>,
    body: Result<Bytes, BytesRejection>,
) -> Response
where
    S: Service<A2ARequest, Response = Task, Error = Infallible> + Clone + Send + Sync + 'static,
    S::Future: Send,
{
    // Unreadable bodies, oversized ones included, are answered like malformed JSON
    let decoded = match body {
        Ok(body) => state.codec.decode_request(&body),
        Err(err) => {
            warn!(error = %err, "failed to read request body");
            Err(Rejection::anonymous(A2AError::InvalidBody))
        }
    };

    let response = match decoded {
        Ok(request) => {
            let id = request.id.clone();
            let task = match state.service.oneshot(request).await {
                Ok(task) => task,
                Err(never) => match never {},
            };
            RpcResponse::new(id, task)
        }
        Err(rejection) => {
            warn!(request_id = %rejection.id, error = %rejection.error, "request rejected");
            rejection.into_response()
        }
    };

    match state.codec.encode_response(&response) {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, state.codec.content_type())],
            bytes,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "failed to encode response");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "healthy".to_string(),
        agent: AGENT_NAME.to_string(),
    })
}

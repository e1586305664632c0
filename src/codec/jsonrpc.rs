//! JSON-RPC 2.0 codec for A2A protocol
//!
//! Inbound bodies are validated in stages: JSON syntax, non-empty value,
//! envelope fields, then the strict request schema. Each stage failing maps to
//! its own [`A2AError`] so the caller gets a specific explanation.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{
    codec::Codec,
    protocol::{error::A2AError, operation::A2AOperation, RpcMethod, Task},
    service::A2ARequest,
};

/// The only protocol version accepted and emitted
pub const JSONRPC_VERSION: &str = "2.0";

/// Opaque JSON-RPC request identifier, echoed back verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// String identifier
    Str(String),

    /// Integer identifier
    Num(i64),
}

impl Default for RequestId {
    /// Substituted when the request id cannot be determined
    fn default() -> Self {
        RequestId::Str(String::new())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestId::Str(s) => f.write_str(s),
            RequestId::Num(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        RequestId::Str(s.to_string())
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        RequestId::Str(s)
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        RequestId::Num(n)
    }
}

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Deserialize)]
#[allow(unused)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: RequestId,
    method: RpcMethod,
    params: Value,
}

/// JSON-RPC 2.0 response envelope; the result is always a task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcResponse {
    /// Always `2.0`
    pub jsonrpc: String,

    /// The request id, or `""` when it could not be read
    pub id: RequestId,

    /// The task describing the outcome
    pub result: Task,
}

impl RpcResponse {
    /// Wrap a task for the given request id
    pub fn new(id: RequestId, result: Task) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result,
        }
    }
}

/// A request body that failed validation
///
/// Carries the request id when one could be read so the failed task can still
/// be matched to its request.
#[derive(Debug)]
pub struct Rejection {
    /// Id to echo back
    pub id: RequestId,

    /// Why the body was rejected
    pub error: A2AError,
}

impl Rejection {
    /// Create a rejection for a known request id
    pub fn new(id: RequestId, error: A2AError) -> Self {
        Self { id, error }
    }

    /// Create a rejection whose id could not be determined
    pub fn anonymous(error: A2AError) -> Self {
        Self::new(RequestId::default(), error)
    }

    /// The failed-task response this rejection is answered with
    pub fn into_response(self) -> RpcResponse {
        RpcResponse::new(self.id, Task::failed(self.error.user_message()))
    }
}

/// JSON-RPC 2.0 codec for the A2A binding
#[derive(Debug, Clone, Default)]
pub struct JsonRpcCodec;

impl JsonRpcCodec {
    /// Create a new JSON-RPC codec
    pub fn new() -> Self {
        Self
    }
}

/// JSON values a caller could send that carry nothing
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

impl Codec for JsonRpcCodec {
    fn decode_request(&self, body: &[u8]) -> Result<A2ARequest, Rejection> {
        let value: Value = serde_json::from_slice(body).map_err(|err| {
            debug!(error = %err, "request body is not JSON");
            Rejection::anonymous(A2AError::InvalidBody)
        })?;

        if is_falsy(&value) {
            return Err(Rejection::anonymous(A2AError::InvalidBody));
        }

        let id = value
            .get("id")
            .and_then(|id| RequestId::deserialize(id).ok())
            .unwrap_or_default();

        let version = value.get("jsonrpc").and_then(Value::as_str);
        if version != Some(JSONRPC_VERSION) || value.get("id").is_none() {
            return Err(Rejection::new(id, A2AError::InvalidRequest));
        }

        let envelope: JsonRpcRequest = serde_json::from_value(value)
            .map_err(|err| Rejection::new(id.clone(), A2AError::Schema(err.to_string())))?;

        let operation = A2AOperation::from_params(envelope.method, envelope.params)
            .map_err(|err| Rejection::new(id, A2AError::Schema(err.to_string())))?;

        Ok(A2ARequest::new(envelope.id, operation))
    }

    fn encode_response(&self, response: &RpcResponse) -> Result<Bytes, A2AError> {
        let bytes = serde_json::to_vec(response)?;
        Ok(Bytes::from(bytes))
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}

//! A2A service request types

use crate::{codec::RequestId, protocol::operation::A2AOperation};

/// A decoded request to the translation service
///
/// This pairs the normalized operation with the JSON-RPC id it must be
/// answered under.
#[derive(Debug, Clone, PartialEq)]
pub struct A2ARequest {
    /// JSON-RPC id to echo in the response
    pub id: RequestId,

    /// The A2A operation to execute
    pub operation: A2AOperation,
}

impl A2ARequest {
    /// Create a new A2A request
    pub fn new(id: impl Into<RequestId>, operation: A2AOperation) -> Self {
        Self {
            id: id.into(),
            operation,
        }
    }
}

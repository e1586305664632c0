//! Serialization codecs for the protocol binding

pub mod jsonrpc;

pub use jsonrpc::{JsonRpcCodec, Rejection, RequestId, RpcResponse};

use bytes::Bytes;

use crate::{protocol::error::A2AError, service::A2ARequest};

/// Codec trait for decoding inbound requests and encoding task responses
///
/// Decoding is where envelope validation happens: anything that is not a
/// well-formed request for a known method becomes a [`Rejection`].
pub trait Codec: Send + Sync {
    /// Validate and decode a raw request body
    ///
    /// # Arguments
    ///
    /// * `body` - The request body bytes, possibly empty or not JSON at all
    ///
    /// # Returns
    ///
    /// The decoded request, or the rejection to answer with
    fn decode_request(&self, body: &[u8]) -> Result<A2ARequest, Rejection>;

    /// Serialize a response envelope for transport
    fn encode_response(&self, response: &RpcResponse) -> Result<Bytes, A2AError>;

    /// Get the content type for this codec
    fn content_type(&self) -> &'static str;
}

//! A2A protocol operations

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::message::{Message, INVALID_TEXT};

/// JSON-RPC methods the agent answers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RpcMethod {
    /// Single message, A2A style
    #[serde(rename = "message/send")]
    MessageSend,

    /// Batch of messages with optional caller-supplied ids
    #[serde(rename = "execute")]
    Execute,
}

impl RpcMethod {
    /// Wire name of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcMethod::MessageSend => "message/send",
            RpcMethod::Execute => "execute",
        }
    }
}

/// Delivery preferences sent with `message/send`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageConfiguration {
    /// Whether the caller waits for the finished task
    #[serde(default = "default_blocking")]
    pub blocking: bool,

    /// Output MIME types the caller accepts
    #[serde(default = "default_output_modes")]
    pub accepted_output_modes: Vec<String>,
}

fn default_blocking() -> bool {
    true
}

fn default_output_modes() -> Vec<String> {
    vec!["text/plain".to_string()]
}

impl Default for MessageConfiguration {
    fn default() -> Self {
        Self {
            blocking: default_blocking(),
            accepted_output_modes: default_output_modes(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SendMessageParams {
    message: Message,
    #[serde(default)]
    configuration: MessageConfiguration,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteParams {
    messages: Vec<Message>,
    context_id: Option<String>,
    task_id: Option<String>,
}

/// A2A protocol operations
///
/// The method-specific shape of a decoded request, normalized so the rest of
/// the pipeline sees a message list plus optional identifiers.
#[derive(Debug, Clone, PartialEq)]
pub enum A2AOperation {
    /// Translate one message
    SendMessage {
        /// The message to translate
        message: Message,

        /// Delivery preferences
        configuration: MessageConfiguration,
    },

    /// Translate the last of a list of messages
    Execute {
        /// Conversation so far, oldest first
        messages: Vec<Message>,

        /// Optional context ID for multi-turn conversations
        context_id: Option<String>,

        /// Optional task ID to continue from
        task_id: Option<String>,
    },
}

impl A2AOperation {
    /// Strictly decode `params` for the given method
    pub fn from_params(method: RpcMethod, params: Value) -> Result<Self, serde_json::Error> {
        Ok(match method {
            RpcMethod::MessageSend => {
                let SendMessageParams {
                    message,
                    configuration,
                } = serde_json::from_value(params)?;
                A2AOperation::SendMessage {
                    message,
                    configuration,
                }
            }
            RpcMethod::Execute => {
                let ExecuteParams {
                    messages,
                    context_id,
                    task_id,
                } = serde_json::from_value(params)?;
                A2AOperation::Execute {
                    messages,
                    context_id,
                    task_id,
                }
            }
        })
    }

    /// The method this operation was decoded from
    pub fn method(&self) -> RpcMethod {
        match self {
            A2AOperation::SendMessage { .. } => RpcMethod::MessageSend,
            A2AOperation::Execute { .. } => RpcMethod::Execute,
        }
    }

    /// Input messages, oldest first
    pub fn messages(&self) -> &[Message] {
        match self {
            A2AOperation::SendMessage { message, .. } => std::slice::from_ref(message),
            A2AOperation::Execute { messages, .. } => messages,
        }
    }

    /// The single string this request asks to translate
    ///
    /// Taken from the last message; [`INVALID_TEXT`] when there is none.
    pub fn canonical_text(&self) -> &str {
        self.messages()
            .last()
            .map_or(INVALID_TEXT, Message::canonical_text)
    }

    /// Split into the message list and the caller-supplied context and task ids
    ///
    /// Only `execute` carries ids; a `message/send` task is always fresh.
    pub fn into_parts(self) -> (Vec<Message>, Option<String>, Option<String>) {
        match self {
            A2AOperation::SendMessage { message, .. } => (vec![message], None, None),
            A2AOperation::Execute {
                messages,
                context_id,
                task_id,
            } => (messages, context_id, task_id),
        }
    }
}

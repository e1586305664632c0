//! Core A2A protocol types and definitions

use serde::{Deserialize, Serialize};

pub mod error;
pub mod message;
pub mod operation;
pub mod task;

pub use error::{A2AError, A2AResult};
pub use message::{Message, MessagePart, Role};
pub use operation::{A2AOperation, MessageConfiguration, RpcMethod};
pub use task::{Task, TaskState, TaskStatus};

/// Artifact holding the translated text
pub const TRANSLATION_ARTIFACT: &str = "translation";

/// Artifact holding the extracted text and language codes
pub const METADATA_ARTIFACT: &str = "metadata";

/// Artifact holding the agent's reply on failed tasks
pub const ASSISTANT_RESPONSE_ARTIFACT: &str = "assistantResponse";

/// Artifacts represent task outputs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Unique identifier of the Artifact
    pub artifact_id: String,

    /// A human readable name for the Artifact
    pub name: String,

    /// Contents of the Artifact
    pub parts: Vec<MessagePart>,
}

impl Artifact {
    /// Create an artifact with a fresh identifier
    pub fn new(name: impl Into<String>, parts: Vec<MessagePart>) -> Self {
        Self {
            artifact_id: task::new_id(),
            name: name.into(),
            parts,
        }
    }
}

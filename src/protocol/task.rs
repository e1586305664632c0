//! A2A task types and status taxonomy

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{message::Message, Artifact, MessagePart, ASSISTANT_RESPONSE_ARTIFACT};

/// A task in the A2A protocol
///
/// One task is produced per request. It carries the outcome state, the
/// artifacts built from the translation and the message history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task
    pub id: String,

    /// Context ID grouping related tasks/messages
    pub context_id: String,

    /// Current status of the task
    pub status: TaskStatus,

    /// Outputs of the task
    #[serde(default)]
    pub artifacts: Vec<Artifact>,

    /// Input messages followed by the agent's reply
    #[serde(default)]
    pub history: Vec<Message>,

    /// Discriminator, always `task`
    #[serde(default)]
    pub kind: TaskKind,
}

impl Task {
    /// Create a new task in the `working` placeholder state
    pub fn new(id: impl Into<String>, context_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            context_id: context_id.into(),
            status: TaskStatus::new(TaskState::Working),
            artifacts: Vec::new(),
            history: Vec::new(),
            kind: TaskKind::Task,
        }
    }

    /// Build the failed task every error is reported as
    ///
    /// The task gets fresh identifiers, an empty history and a single
    /// `assistantResponse` artifact repeating `text`.
    pub fn failed(text: impl Into<String>) -> Self {
        let text = text.into();
        let message = Message::agent(text.clone());

        Self::new(new_id(), new_id())
            .with_status(TaskStatus::new(TaskState::Failed).with_message(message))
            .with_artifact(Artifact::new(
                ASSISTANT_RESPONSE_ARTIFACT,
                vec![MessagePart::text(text)],
            ))
    }

    /// Replace the task status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Add an artifact to the task
    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.push(artifact);
        self
    }

    /// Append a message to the task history
    pub fn with_history_message(mut self, message: Message) -> Self {
        self.history.push(message);
        self
    }
}

/// Fresh identifier for tasks and contexts
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

/// Discriminator for tasks on the wire
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    #[default]
    Task,
}

/// Status of a task at the moment the response was assembled
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStatus {
    /// The current state
    pub state: TaskState,

    /// When the state was set, UTC with second precision
    pub timestamp: DateTime<Utc>,

    /// Agent message explaining the state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

impl TaskStatus {
    /// Create a status stamped with the current time
    pub fn new(state: TaskState) -> Self {
        Self {
            state,
            timestamp: Utc::now().trunc_subsecs(0),
            message: None,
        }
    }

    /// Attach the agent message explaining the state
    pub fn with_message(mut self, message: Message) -> Self {
        self.message = Some(message);
        self
    }
}

/// Task state in the A2A protocol
///
/// `working` only exists before assembly decides the outcome; a synchronous
/// request always ends in one of the other three.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    /// Task is currently being processed
    Working,

    /// Task completed successfully
    Completed,

    /// Task requires additional input from the client
    InputRequired,

    /// Task failed with an error
    Failed,
}

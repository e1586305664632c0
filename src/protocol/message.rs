//! A2A message types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Canonical text used when a message carries neither a data nor a text part
pub const INVALID_TEXT: &str = "Invalid Text";

/// A message in the A2A protocol
///
/// Messages are the primary unit of communication between agents.
/// Each message has a role, one or more parts (text, file, or data),
/// and optional task/context identifiers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message identifier, generated when the sender omits it
    #[serde(default = "new_message_id")]
    pub message_id: String,

    /// Role of the message sender
    pub role: Role,

    /// Message content parts, in the order the sender supplied them
    pub parts: Vec<MessagePart>,

    /// Discriminator, always `message`
    #[serde(default)]
    pub kind: MessageKind,

    /// Optional task identifier (for associating message with a task)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,

    /// Optional context identifier (for multi-turn conversations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,

    /// Optional metadata for the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

fn new_message_id() -> String {
    Uuid::now_v7().to_string()
}

impl Message {
    /// Create a new message with text content
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            message_id: new_message_id(),
            role,
            parts: vec![MessagePart::text(text)],
            kind: MessageKind::Message,
            task_id: None,
            context_id: None,
            metadata: None,
        }
    }

    /// Create a user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create an agent message with text content
    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Role::Agent, text)
    }

    /// Create a new message builder
    pub fn builder() -> MessageBuilder {
        MessageBuilder::new()
    }

    /// Tag the message with a task identifier
    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    /// Tag the message with a context identifier
    pub fn with_context_id(mut self, context_id: impl Into<String>) -> Self {
        self.context_id = Some(context_id.into());
        self
    }

    /// Extract the single input string this message stands for
    ///
    /// The first data part wins if it embeds text, then the first text part,
    /// then [`INVALID_TEXT`].
    pub fn canonical_text(&self) -> &str {
        self.parts
            .iter()
            .find_map(MessagePart::as_data)
            .and_then(embedded_text)
            .or_else(|| self.parts.iter().find_map(MessagePart::as_text))
            .unwrap_or(INVALID_TEXT)
    }
}

/// Text carried by a data payload.
///
/// Chat clients send the running conversation as a list of parts, so the most
/// recent entry is the one to translate.
fn embedded_text(data: &Value) -> Option<&str> {
    match data {
        Value::Array(items) => items.last()?.get("text")?.as_str(),
        Value::Object(_) => data.get("text")?.as_str(),
        _ => None,
    }
}

/// Builder for constructing Message instances
#[derive(Debug, Default)]
pub struct MessageBuilder {
    role: Option<Role>,
    parts: Vec<MessagePart>,
    message_id: Option<String>,
    task_id: Option<String>,
    context_id: Option<String>,
}

impl MessageBuilder {
    /// Create a new message builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the role of the message
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Add a single part to the message
    pub fn part(mut self, part: MessagePart) -> Self {
        self.parts.push(part);
        self
    }

    /// Set the message ID
    pub fn message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = Some(id.into());
        self
    }

    /// Set the task ID
    pub fn task_id(mut self, id: impl Into<String>) -> Self {
        self.task_id = Some(id.into());
        self
    }

    /// Set the context ID
    pub fn context_id(mut self, id: impl Into<String>) -> Self {
        self.context_id = Some(id.into());
        self
    }

    /// Build the message
    ///
    /// # Panics
    ///
    /// Panics if role is not set
    pub fn build(self) -> Message {
        let role = self.role.expect("Message role is required");

        Message {
            message_id: self.message_id.unwrap_or_else(new_message_id),
            role,
            parts: self.parts,
            kind: MessageKind::Message,
            task_id: self.task_id,
            context_id: self.context_id,
            metadata: None,
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message from a user
    User,

    /// Message from an AI agent
    Agent,

    /// Instructions injected by the calling platform
    System,
}

/// Discriminator for messages on the wire
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Message,
}

/// A part of a message or artifact, discriminated by `kind`
///
/// Payloads may be missing on input; such parts are carried along but never
/// supply canonical text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MessagePart {
    /// Text content
    Text {
        /// The text content
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },

    /// File reference; accepted on input, never inspected
    File {
        /// File content as sent by the caller
        #[serde(default)]
        file: Value,
    },

    /// Structured data
    Data {
        /// The structured data
        #[serde(default)]
        data: Value,
    },
}

impl MessagePart {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: Some(text.into()),
        }
    }

    /// Create a data part
    pub fn data(data: Value) -> Self {
        Self::Data { data }
    }

    /// The text of a text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessagePart::Text { text } => text.as_deref(),
            MessagePart::File { .. } | MessagePart::Data { .. } => None,
        }
    }

    /// The payload of a data part
    pub fn as_data(&self) -> Option<&Value> {
        match self {
            MessagePart::Data { data } => Some(data),
            MessagePart::Text { .. } | MessagePart::File { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello, agent!");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.parts.len(), 1);
        assert!(!msg.message_id.is_empty());

        match &msg.parts[0] {
            MessagePart::Text { text } => assert_eq!(text.as_deref(), Some("Hello, agent!")),
            _ => panic!("Expected text part"),
        }
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::user("Test message").with_task_id("task-1");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("\"kind\":\"message\""));
        assert!(json.contains("\"kind\":\"text\""));
        assert!(json.contains("\"taskId\":\"task-1\""));

        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(msg, deserialized);
    }

    #[test]
    fn test_message_defaults_on_deserialize() {
        let msg: Message = serde_json::from_value(json!({
            "role": "system",
            "parts": [{"kind": "text", "text": "hola"}]
        }))
        .unwrap();

        assert_eq!(msg.role, Role::System);
        assert_eq!(msg.kind, MessageKind::Message);
        assert!(!msg.message_id.is_empty());
    }

    #[test]
    fn test_unknown_part_kind_rejected() {
        let result: Result<Message, _> = serde_json::from_value(json!({
            "role": "user",
            "parts": [{"kind": "video", "url": "x"}]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_canonical_text_prefers_data_part() {
        let msg = Message::builder()
            .role(Role::User)
            .part(MessagePart::text("ignored"))
            .part(MessagePart::data(json!([
                {"kind": "text", "text": "earlier turn"},
                {"kind": "text", "text": "good night to German"}
            ])))
            .build();

        assert_eq!(msg.canonical_text(), "good night to German");
    }

    #[test]
    fn test_canonical_text_data_object() {
        let msg = Message::builder()
            .role(Role::User)
            .part(MessagePart::data(json!({"text": "thank you in Yoruba"})))
            .build();

        assert_eq!(msg.canonical_text(), "thank you in Yoruba");
    }

    #[test]
    fn test_canonical_text_falls_back_to_text_part() {
        let msg = Message::builder()
            .role(Role::User)
            .part(MessagePart::data(json!([{"kind": "data", "value": 1}])))
            .part(MessagePart::text("first"))
            .part(MessagePart::text("second"))
            .build();

        assert_eq!(msg.canonical_text(), "first");
    }

    #[test]
    fn test_parts_without_payload_are_skipped() {
        let msg: Message = serde_json::from_value(json!({
            "role": "user",
            "parts": [
                {"kind": "text"},
                {"kind": "file"},
                {"kind": "text", "text": "good evening to Igbo"}
            ]
        }))
        .unwrap();

        assert_eq!(msg.parts.len(), 3);
        assert_eq!(msg.parts[0].as_text(), None);
        assert_eq!(msg.canonical_text(), "good evening to Igbo");

        let json = serde_json::to_value(&msg.parts[0]).unwrap();
        assert_eq!(json, json!({"kind": "text"}));
    }

    #[test]
    fn test_empty_text_part_alone_gives_sentinel() {
        let msg: Message = serde_json::from_value(json!({
            "role": "user",
            "parts": [{"kind": "text"}]
        }))
        .unwrap();

        assert_eq!(msg.canonical_text(), INVALID_TEXT);
    }

    #[test]
    fn test_canonical_text_sentinel() {
        let msg = Message::builder()
            .role(Role::User)
            .part(MessagePart::File {
                file: json!({"uri": "https://example.com/a.txt"}),
            })
            .build();
        assert_eq!(msg.canonical_text(), INVALID_TEXT);

        let empty = Message::builder().role(Role::User).build();
        assert_eq!(empty.canonical_text(), INVALID_TEXT);
    }

    #[test]
    fn test_message_builder() {
        let msg = Message::builder()
            .role(Role::Agent)
            .part(MessagePart::text("Hello"))
            .message_id("msg-123")
            .task_id("task-456")
            .context_id("ctx-789")
            .build();

        assert_eq!(msg.role, Role::Agent);
        assert_eq!(msg.parts.len(), 1);
        assert_eq!(msg.message_id, "msg-123");
        assert_eq!(msg.task_id, Some("task-456".to_string()));
        assert_eq!(msg.context_id, Some("ctx-789".to_string()));
    }

    #[test]
    #[should_panic(expected = "Message role is required")]
    fn test_message_builder_missing_role() {
        Message::builder().part(MessagePart::text("Hello")).build();
    }
}

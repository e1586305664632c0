//! Task assembly: turns a translation into the task returned to the caller

use serde_json::json;

use crate::{
    protocol::{
        task::new_id, Artifact, Message, MessagePart, Task, TaskState, TaskStatus,
        METADATA_ARTIFACT, TRANSLATION_ARTIFACT,
    },
    translate::Translation,
};

/// Identifiers a task is assembled under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskIds {
    /// Task identifier
    pub task_id: String,

    /// Context identifier
    pub context_id: String,
}

impl TaskIds {
    /// Use the caller's ids where given, fresh ones otherwise
    pub fn resolve(task_id: Option<String>, context_id: Option<String>) -> Self {
        Self {
            task_id: task_id.unwrap_or_else(new_id),
            context_id: context_id.unwrap_or_else(new_id),
        }
    }
}

/// Builds tasks from translations
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskAssembler {
    fail_on_oracle_fallback: bool,
}

impl TaskAssembler {
    /// Create an assembler that reports fallback translations as completed
    pub fn new() -> Self {
        Self::default()
    }

    /// Report tasks whose translation used fallback values as failed
    pub fn fail_on_oracle_fallback(mut self, enabled: bool) -> Self {
        self.fail_on_oracle_fallback = enabled;
        self
    }

    /// Decide the final state of a task
    ///
    /// No input messages means the caller still owes us input; otherwise a
    /// non-empty translation is a completed task.
    pub fn resolve_state(&self, messages: &[Message], translation: &Translation) -> TaskState {
        if messages.is_empty() {
            TaskState::InputRequired
        } else if translation.translation.is_empty()
            || (self.fail_on_oracle_fallback && translation.is_fallback())
        {
            TaskState::Failed
        } else {
            TaskState::Completed
        }
    }

    /// Build the task for a processed request
    ///
    /// `messages` become the history, followed by the agent's reply.
    pub fn assemble(&self, ids: TaskIds, messages: Vec<Message>, translation: &Translation) -> Task {
        let state = self.resolve_state(&messages, translation);

        let response = Message::agent(translation.translation.clone())
            .with_task_id(ids.task_id.clone())
            .with_context_id(ids.context_id.clone());

        let metadata = json!({
            "text_to_translate": translation.text_to_translate,
            "source_lang": translation.source_lang,
            "target_lang": translation.target_lang,
        });

        let mut task = Task::new(ids.task_id, ids.context_id)
            .with_status(TaskStatus::new(state).with_message(response.clone()))
            .with_artifact(Artifact::new(
                TRANSLATION_ARTIFACT,
                vec![MessagePart::text(translation.translation.clone())],
            ))
            .with_artifact(Artifact::new(
                METADATA_ARTIFACT,
                vec![MessagePart::data(metadata)],
            ));

        task.history = messages;
        task.with_history_message(response)
    }
}

#[cfg(test)]
mod tests {
    use crate::{protocol::Role, translate::TranslationOutcome};

    use super::*;

    fn translation(text: &str) -> Translation {
        Translation {
            text_to_translate: "good morning".into(),
            source_lang: "en".into(),
            target_lang: "fr".into(),
            translation: text.into(),
            outcome: TranslationOutcome::Parsed,
        }
    }

    #[test]
    fn test_completed_task() {
        let ids = TaskIds::resolve(Some("task-1".into()), Some("ctx-1".into()));
        let task = TaskAssembler::new().assemble(
            ids,
            vec![Message::user("good morning to French")],
            &translation("bonjour"),
        );

        assert_eq!(task.id, "task-1");
        assert_eq!(task.context_id, "ctx-1");
        assert_eq!(task.status.state, TaskState::Completed);

        let reply = task.status.message.as_ref().unwrap();
        assert_eq!(reply.role, Role::Agent);
        assert_eq!(reply.task_id.as_deref(), Some("task-1"));
        assert_eq!(reply.parts[0].as_text(), Some("bonjour"));

        assert_eq!(task.artifacts.len(), 2);
        assert_eq!(task.artifacts[0].name, TRANSLATION_ARTIFACT);
        assert_eq!(task.artifacts[0].parts[0].as_text(), Some("bonjour"));
        assert_eq!(task.artifacts[1].name, METADATA_ARTIFACT);
        let metadata = task.artifacts[1].parts[0].as_data().unwrap();
        assert_eq!(metadata["text_to_translate"], "good morning");
        assert_eq!(metadata["target_lang"], "fr");
        assert!(metadata.get("translation").is_none());
    }

    #[test]
    fn test_history_is_input_plus_reply() {
        let messages = vec![Message::user("one"), Message::user("two to German")];
        let task =
            TaskAssembler::new().assemble(TaskIds::resolve(None, None), messages, &translation("zwei"));

        assert_eq!(task.history.len(), 3);
        assert_eq!(task.history[0].parts[0].as_text(), Some("one"));
        assert_eq!(task.history[2].role, Role::Agent);
        assert_eq!(task.history[2], *task.status.message.as_ref().unwrap());
    }

    #[test]
    fn test_empty_translation_fails() {
        let task = TaskAssembler::new().assemble(
            TaskIds::resolve(None, None),
            vec![Message::user("hi")],
            &translation(""),
        );
        assert_eq!(task.status.state, TaskState::Failed);
    }

    #[test]
    fn test_no_messages_requires_input() {
        let assembler = TaskAssembler::new();
        let task = assembler.assemble(
            TaskIds::resolve(None, None),
            Vec::new(),
            &Translation::missing_input(),
        );

        assert_eq!(task.status.state, TaskState::InputRequired);
        assert_eq!(task.history.len(), 1);

        // takes precedence over an empty translation
        assert_eq!(
            assembler.resolve_state(&[], &translation("")),
            TaskState::InputRequired
        );
    }

    #[test]
    fn test_fallback_translation_state() {
        let messages = vec![Message::user("???")];
        let fallback = Translation::fallback();

        assert_eq!(
            TaskAssembler::new().resolve_state(&messages, &fallback),
            TaskState::Completed
        );
        assert_eq!(
            TaskAssembler::new()
                .fail_on_oracle_fallback(true)
                .resolve_state(&messages, &fallback),
            TaskState::Failed
        );
    }

    #[test]
    fn test_fresh_ids_when_not_supplied() {
        let ids = TaskIds::resolve(None, Some("ctx-1".into()));
        assert!(!ids.task_id.is_empty());
        assert_eq!(ids.context_id, "ctx-1");
        assert_ne!(TaskIds::resolve(None, None), TaskIds::resolve(None, None));
    }
}

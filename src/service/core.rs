//! Core translation service implementation

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use tower_service::Service;
use tracing::{debug, info};

use crate::{
    protocol::{error::A2AError, Task},
    service::{
        assemble::{TaskAssembler, TaskIds},
        A2ARequest,
    },
    translate::{is_help_command, Translation, Translator, HELP_GUIDE},
};

/// Core A2A translation service that wraps a translator
///
/// This service implements the Tower `Service` trait and runs one decoded
/// request through normalization, translation and task assembly. It holds no
/// per-request state, so clones can serve requests concurrently.
pub struct TranslationService<T> {
    translator: Arc<T>,
    assembler: TaskAssembler,
}

impl<T> TranslationService<T>
where
    T: Translator,
{
    /// Create a new translation service
    ///
    /// # Arguments
    ///
    /// * `translator` - Performs extraction and translation for each request
    pub fn new(translator: T) -> Self {
        Self {
            translator: Arc::new(translator),
            assembler: TaskAssembler::new(),
        }
    }

    /// Report tasks whose translation used fallback values as failed
    pub fn fail_on_oracle_fallback(mut self, enabled: bool) -> Self {
        self.assembler = self.assembler.fail_on_oracle_fallback(enabled);
        self
    }

    /// Process one request into a task
    async fn process(
        translator: &T,
        assembler: TaskAssembler,
        req: A2ARequest,
    ) -> Result<Task, A2AError> {
        let A2ARequest { id, operation } = req;
        let text = operation.canonical_text().to_owned();

        debug!(
            request_id = %id,
            method = operation.method().as_str(),
            messages = operation.messages().len(),
            "normalized request"
        );

        if is_help_command(&text) {
            debug!(request_id = %id, "help requested");
            return Ok(Task::failed(HELP_GUIDE));
        }

        let (messages, context_id, task_id) = operation.into_parts();
        let ids = TaskIds::resolve(task_id, context_id);

        let translation = if messages.is_empty() {
            Translation::missing_input()
        } else {
            translator.infer(&text).await?
        };

        let task = assembler.assemble(ids, messages, &translation);

        info!(
            request_id = %id,
            task_id = %task.id,
            state = ?task.status.state,
            target_lang = %translation.target_lang,
            "task assembled"
        );

        Ok(task)
    }
}

impl<T> Service<A2ARequest> for TranslationService<T>
where
    T: Translator,
{
    type Response = Task;
    type Error = A2AError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // No shared resources to wait on
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: A2ARequest) -> Self::Future {
        let translator = self.translator.clone();
        let assembler = self.assembler;

        Box::pin(async move { Self::process(translator.as_ref(), assembler, req).await })
    }
}

impl<T> Clone for TranslationService<T> {
    fn clone(&self) -> Self {
        Self {
            translator: self.translator.clone(),
            assembler: self.assembler,
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::assert_ready_ok;

    use crate::{
        protocol::{
            operation::A2AOperation, Message, MessageConfiguration, RpcMethod, TaskState,
            ASSISTANT_RESPONSE_ARTIFACT,
        },
        translate::{MockTranslator, TranslationOutcome, NO_INPUT_PROMPT},
    };

    use super::*;

    fn send(text: &str) -> A2ARequest {
        let operation = A2AOperation::SendMessage {
            message: Message::user(text),
            configuration: MessageConfiguration::default(),
        };
        A2ARequest::new("req-1", operation)
    }

    fn french(text: &str) -> Translation {
        Translation {
            text_to_translate: text.to_string(),
            source_lang: "en".to_string(),
            target_lang: "fr".to_string(),
            translation: "bonjour".to_string(),
            outcome: TranslationOutcome::Parsed,
        }
    }

    #[tokio::test]
    async fn test_service_translates_message() {
        let mut translator = MockTranslator::new();
        translator
            .expect_infer()
            .withf(|text: &str| text == "good morning to French")
            .times(1)
            .returning(|_| Ok(french("good morning")));

        let mut service = TranslationService::new(translator);
        let task = service.call(send("good morning to French")).await.unwrap();

        assert_eq!(task.status.state, TaskState::Completed);
        assert_eq!(task.history.len(), 2);
        assert_eq!(task.artifacts[0].parts[0].as_text(), Some("bonjour"));
    }

    #[tokio::test]
    async fn test_service_help_skips_translator() {
        let mut translator = MockTranslator::new();
        translator.expect_infer().never();

        let mut service = TranslationService::new(translator);
        let task = service.call(send("  Help ")).await.unwrap();

        assert_eq!(task.status.state, TaskState::Failed);
        assert_eq!(task.artifacts.len(), 1);
        assert_eq!(task.artifacts[0].name, ASSISTANT_RESPONSE_ARTIFACT);
        assert_eq!(task.artifacts[0].parts[0].as_text(), Some(HELP_GUIDE));
    }

    #[tokio::test]
    async fn test_service_empty_execute_requires_input() {
        let mut translator = MockTranslator::new();
        translator.expect_infer().never();

        let operation =
            A2AOperation::from_params(RpcMethod::Execute, serde_json::json!({"messages": []}))
                .unwrap();
        let mut service = TranslationService::new(translator);
        let task = service.call(A2ARequest::new("req-2", operation)).await.unwrap();

        assert_eq!(task.status.state, TaskState::InputRequired);
        assert_eq!(task.history.len(), 1);
        assert_eq!(
            task.status.message.unwrap().parts[0].as_text(),
            Some(NO_INPUT_PROMPT)
        );
    }

    #[tokio::test]
    async fn test_service_keeps_caller_ids() {
        let mut translator = MockTranslator::new();
        translator
            .expect_infer()
            .returning(|text| Ok(french(text)));

        let operation = A2AOperation::Execute {
            messages: vec![Message::user("hello to French")],
            context_id: Some("ctx-7".into()),
            task_id: Some("task-7".into()),
        };
        let mut service = TranslationService::new(translator);
        let task = service.call(A2ARequest::new(7i64, operation)).await.unwrap();

        assert_eq!(task.id, "task-7");
        assert_eq!(task.context_id, "ctx-7");
        assert_eq!(task.history[1].task_id.as_deref(), Some("task-7"));
    }

    #[tokio::test]
    async fn test_service_strict_fallback() {
        let mut translator = MockTranslator::new();
        translator
            .expect_infer()
            .returning(|_| Ok(Translation::fallback()));

        let mut service = TranslationService::new(translator).fail_on_oracle_fallback(true);
        let task = service.call(send("???")).await.unwrap();

        assert_eq!(task.status.state, TaskState::Failed);
    }

    #[tokio::test]
    async fn test_service_propagates_translator_errors() {
        let mut translator = MockTranslator::new();
        translator
            .expect_infer()
            .returning(|_| Err(A2AError::Other("translator offline".into())));

        let mut service = TranslationService::new(translator);
        let result = service.call(send("hello to French")).await;

        assert!(matches!(result, Err(A2AError::Other(_))));
    }

    #[test]
    fn test_service_always_ready() {
        let mut service = TranslationService::new(MockTranslator::new());
        let mut task = tokio_test::task::spawn(());
        assert_ready_ok!(task.enter(|cx, _| service.poll_ready(cx)));
    }
}

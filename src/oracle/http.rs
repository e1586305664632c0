//! OpenAI-compatible chat completions oracle
//!
//! Works against any provider exposing `POST {base_url}/chat/completions`
//! with bearer authentication (Groq by default).

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::{
    config::OracleConfig,
    protocol::error::{A2AError, A2AResult},
};

use super::{CompletionRequest, Oracle};

/// Oracle implementation using reqwest
#[derive(Clone)]
pub struct ChatCompletionsOracle {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
    model: String,
}

impl ChatCompletionsOracle {
    /// Create a new oracle with a default HTTP client
    ///
    /// # Arguments
    ///
    /// * `base_url` - API root, e.g. `https://api.groq.com/openai/v1/`
    /// * `api_key` - Bearer token for the provider
    /// * `model` - Model name sent with every request
    pub fn new(base_url: Url, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_client(base_url, api_key, model, reqwest::Client::new())
    }

    /// Create a new oracle with a custom reqwest client
    pub fn with_client(
        base_url: Url,
        api_key: impl Into<String>,
        model: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Build an oracle whose requests are bounded by the configured timeout
    pub fn from_config(config: &OracleConfig) -> A2AResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self::with_client(
            config.base_url.clone(),
            config.api_key.clone(),
            config.model.clone(),
            client,
        ))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.base_url.as_str().trim_end_matches('/')
        )
    }
}

impl fmt::Debug for ChatCompletionsOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionsOracle")
            .field("base_url", &self.base_url.as_str())
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Oracle for ChatCompletionsOracle {
    async fn complete(&self, request: CompletionRequest) -> A2AResult<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_text,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_output_tokens,
        };

        debug!(model = %self.model, "calling oracle");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(A2AError::Oracle(format!("HTTP {}: {}", status, body)));
        }

        let parsed: ChatCompletionResponse = response.json().await?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| A2AError::Oracle("response contained no completion".into()))
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

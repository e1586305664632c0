//! Text and language extraction plus translation
//!
//! [`Translator`] is the seam between the request pipeline and whatever
//! performs extraction and translation. [`OracleTranslator`] delegates both to
//! an [`Oracle`] in a single call and never fails: unusable replies degrade to
//! fixed fallback values.

pub mod prompt;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE},
    oracle::{CompletionRequest, Oracle},
    protocol::error::{A2AError, A2AResult},
};

pub use prompt::{is_help_command, HELP_GUIDE, SYSTEM_PROMPT};

/// Extracted text used when the oracle reply is unusable
pub const FALLBACK_TEXT: &str = "Invalid text";

/// Source/target language used when the oracle omits one
pub const DEFAULT_LANG: &str = "en";

/// Target language marking that no language could be resolved
pub const UNRESOLVED_LANG: &str = "erpcn";

/// Translation used when the oracle reply has no `translation` field
pub const MISSING_TRANSLATION: &str = "Kindly re enter the text again";

/// Reply used when a request carries no message at all
pub const NO_INPUT_PROMPT: &str =
    "Please send the text you want translated, e.g. 'good morning to French'";

/// Where the values of a [`Translation`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationOutcome {
    /// All four fields were read from a well-formed oracle reply
    #[default]
    Parsed,

    /// At least one field is a fallback value
    Fallback,
}

/// Result of extraction and translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// The literal text that was translated
    pub text_to_translate: String,

    /// ISO-639-1 code of the detected source language
    pub source_lang: String,

    /// ISO-639-1 code of the requested target language
    pub target_lang: String,

    /// The translated text
    pub translation: String,

    /// Whether the fields came from the oracle or from fallbacks
    pub outcome: TranslationOutcome,
}

impl Translation {
    /// The values substituted when the oracle reply cannot be used at all
    pub fn fallback() -> Self {
        Self {
            text_to_translate: FALLBACK_TEXT.to_string(),
            source_lang: DEFAULT_LANG.to_string(),
            target_lang: UNRESOLVED_LANG.to_string(),
            translation: FALLBACK_TEXT.to_string(),
            outcome: TranslationOutcome::Fallback,
        }
    }

    /// Placeholder for requests without any message; its text asks for input
    pub fn missing_input() -> Self {
        Self {
            translation: NO_INPUT_PROMPT.to_string(),
            ..Self::fallback()
        }
    }

    /// Read a translation out of a parsed oracle reply
    ///
    /// Each field falls back independently when it is absent or not a string.
    pub fn from_reply(reply: &Value) -> Self {
        let mut outcome = TranslationOutcome::Parsed;
        let mut field = |name: &str, default: &str| {
            reply
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| {
                    outcome = TranslationOutcome::Fallback;
                    default.to_owned()
                })
        };

        let text_to_translate = field("text_to_translate", FALLBACK_TEXT);
        let source_lang = field("source_lang", DEFAULT_LANG);
        let target_lang = field("target_lang", DEFAULT_LANG);
        let translation = field("translation", MISSING_TRANSLATION);

        Self {
            text_to_translate,
            source_lang,
            target_lang,
            translation,
            outcome,
        }
    }

    /// Whether any field is a fallback value
    pub fn is_fallback(&self) -> bool {
        self.outcome == TranslationOutcome::Fallback
    }
}

/// Strictly parse a raw completion as JSON
pub fn decode_completion(raw: &str) -> A2AResult<Value> {
    serde_json::from_str(raw).map_err(|err| A2AError::OracleFormat(err.to_string()))
}

/// Extraction and translation capability
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync + 'static {
    /// Infer the text to translate and its target language from free-form
    /// input, and translate it
    async fn infer(&self, text: &str) -> A2AResult<Translation>;
}

/// Translator backed by a single oracle call per request
#[derive(Debug, Clone)]
pub struct OracleTranslator<O> {
    oracle: O,
    temperature: f32,
    max_output_tokens: u32,
}

impl<O: Oracle> OracleTranslator<O> {
    /// Create a translator with the default sampling settings
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the maximum number of generated tokens
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    fn completion_request(&self, text: &str) -> CompletionRequest {
        CompletionRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_text: text.to_string(),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

#[async_trait]
impl<O: Oracle> Translator for OracleTranslator<O> {
    async fn infer(&self, text: &str) -> A2AResult<Translation> {
        let reply = self
            .oracle
            .complete(self.completion_request(text))
            .await
            .and_then(|raw| decode_completion(&raw));

        let translation = match reply {
            Ok(value) => Translation::from_reply(&value),
            Err(err) => {
                warn!(error = %err, "oracle reply unusable, using fallback translation");
                Translation::fallback()
            }
        };

        if translation.is_fallback() {
            warn!(target_lang = %translation.target_lang, "translation uses fallback values");
        } else {
            debug!(
                source_lang = %translation.source_lang,
                target_lang = %translation.target_lang,
                "translation parsed"
            );
        }

        Ok(translation)
    }
}

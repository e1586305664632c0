//! # LingoFlow
//!
//! A Tower-based A2A translation agent.
//!
//! The agent accepts JSON-RPC 2.0 requests carrying free-form messages such as
//! `"good morning to French"`, asks a language model (the *oracle*) to extract
//! the text and target language and to translate it, and answers with an A2A
//! task carrying the translation, its metadata and the message history.
//!
//! ## Layers
//!
//! - **Codec**: validates and decodes the JSON-RPC envelope
//! - **Service**: normalizes messages, runs the translator, assembles the task
//! - **Recover layer**: turns any failure into a failed task
//! - **Oracle**: the language model, behind a trait
//!
//! ## Example
//!
//! ```rust,no_run
//! use lingoflow::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new(std::env::var("GROQ_API_KEY")?);
//!     let app = lingoflow::server::build_app(&config)?;
//!
//!     let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod config;
pub mod layer;
pub mod oracle;
pub mod protocol;
pub mod server;
pub mod service;
pub mod translate;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        codec::{JsonRpcCodec, RequestId, RpcResponse},
        config::{Config, OracleConfig},
        layer::RecoverLayer,
        oracle::{ChatCompletionsOracle, CompletionRequest, Oracle},
        protocol::error::A2AError,
        protocol::{A2AOperation, Artifact, Message, MessagePart, Role, Task, TaskState, TaskStatus},
        service::{A2ARequest, TranslationService},
        translate::{OracleTranslator, Translation, Translator},
    };
}

//! Error types for the translation agent

use thiserror::Error;

/// Guidance returned when the request body cannot be understood at all
pub const INVALID_BODY_MESSAGE: &str =
    "wrong text format: use single '' for inline quote or enter 'help' to get guide";

/// Message returned when the JSON-RPC envelope is missing its required fields
pub const INVALID_REQUEST_MESSAGE: &str =
    "Invalid Request: jsonrpc must be '2.0' and id is required";

const HELP_HINT: &str = "Enter 'help' to get guide.";

/// Main error type for A2A translation operations
#[derive(Debug, Error)]
pub enum A2AError {
    /// Body is not JSON, or is an empty/falsy JSON value
    #[error("{}", INVALID_BODY_MESSAGE)]
    InvalidBody,

    /// Envelope lacks `jsonrpc: "2.0"` or an `id`
    #[error("{}", INVALID_REQUEST_MESSAGE)]
    InvalidRequest,

    /// Envelope is present but its fields do not match the request schema
    #[error("Invalid params: {0}")]
    Schema(String),

    /// The oracle could not be reached or answered with an error status
    #[error("Oracle error: {0}")]
    Oracle(String),

    /// The oracle answered, but not with the JSON object it was asked for
    #[error("Oracle returned malformed output: {0}")]
    OracleFormat(String),

    /// The oracle did not answer in time
    #[error("Oracle request timeout")]
    Timeout,

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with custom message
    #[error("{0}")]
    Other(String),
}

impl A2AError {
    /// Text shown to the caller inside a failed task
    ///
    /// Envelope errors already carry their own guidance; everything else gets a
    /// pointer to the help command appended.
    pub fn user_message(&self) -> String {
        match self {
            A2AError::InvalidBody | A2AError::InvalidRequest => self.to_string(),
            _ => format!("{self}. {HELP_HINT}"),
        }
    }
}

/// Result type alias for A2A operations
pub type A2AResult<T> = Result<T, A2AError>;

impl From<reqwest::Error> for A2AError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            A2AError::Timeout
        } else if err.is_connect() {
            A2AError::Oracle(format!("Connection error: {}", err))
        } else {
            A2AError::Oracle(err.to_string())
        }
    }
}

impl From<&str> for A2AError {
    fn from(s: &str) -> Self {
        A2AError::Other(s.to_string())
    }
}

impl From<String> for A2AError {
    fn from(s: String) -> Self {
        A2AError::Other(s)
    }
}

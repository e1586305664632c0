//! Runtime configuration

use std::{fmt, net::SocketAddr, time::Duration};

use url::Url;

/// Default address the HTTP server binds to
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Default OpenAI-compatible API root (Groq)
pub const DEFAULT_ORACLE_BASE_URL: &str = "https://api.groq.com/openai/v1/";

/// Default model used for extraction and translation
pub const DEFAULT_ORACLE_MODEL: &str = "llama-3.3-70b-versatile";

/// Default sampling temperature; kept low so replies stay close to the contract
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Default upper bound on generated tokens
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

/// Default time allowed for one oracle call
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the translation agent
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,

    /// How to reach the oracle
    pub oracle: OracleConfig,

    /// Report tasks whose translation came from fallback values as failed
    pub fail_on_oracle_fallback: bool,
}

impl Config {
    /// Create a configuration with defaults for everything but the API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_oracle(OracleConfig::new(api_key))
    }

    /// Create a configuration around an oracle configuration
    pub fn from_oracle(oracle: OracleConfig) -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR
                .parse()
                .expect("default bind address is valid"),
            oracle,
            fail_on_oracle_fallback: false,
        }
    }

    /// Set the listen address
    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    /// Enable or disable failing tasks on oracle fallbacks
    pub fn with_fail_on_oracle_fallback(mut self, enabled: bool) -> Self {
        self.fail_on_oracle_fallback = enabled;
        self
    }
}

/// Connection and sampling settings for the oracle
#[derive(Clone)]
pub struct OracleConfig {
    /// API root; `chat/completions` is appended
    pub base_url: Url,

    /// Bearer token
    pub api_key: String,

    /// Model name
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Upper bound on generated tokens
    pub max_output_tokens: u32,

    /// Time allowed for one call
    pub timeout: Duration,
}

impl OracleConfig {
    /// Create an oracle configuration with defaults for everything but the API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: Url::parse(DEFAULT_ORACLE_BASE_URL).expect("default oracle URL is valid"),
            api_key: api_key.into(),
            model: DEFAULT_ORACLE_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            timeout: DEFAULT_ORACLE_TIMEOUT,
        }
    }

    /// Set the API root
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
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

    /// Set the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for OracleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OracleConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

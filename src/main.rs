use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use clap::{builder::BoolishValueParser, ArgAction, Parser};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

use lingoflow::{
    config::{
        Config, OracleConfig, DEFAULT_BIND_ADDR, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_ORACLE_BASE_URL,
        DEFAULT_ORACLE_MODEL, DEFAULT_TEMPERATURE,
    },
    server::{self, A2A_PATH},
};

const DEFAULT_LOG_FILTER: &str = "lingoflow=info,tower_http=info";

/// Multilingual translation agent speaking the A2A protocol
#[derive(Debug, Parser)]
#[command(name = "lingoflow", version, about)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "LINGOFLOW_BIND", default_value = DEFAULT_BIND_ADDR)]
    bind: SocketAddr,

    /// OpenAI-compatible API root of the oracle
    #[arg(long, env = "ORACLE_BASE_URL", default_value = DEFAULT_ORACLE_BASE_URL)]
    oracle_base_url: Url,

    /// API key for the oracle
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Model used for extraction and translation
    #[arg(long, env = "ORACLE_MODEL", default_value = DEFAULT_ORACLE_MODEL)]
    model: String,

    /// Sampling temperature
    #[arg(long, env = "ORACLE_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,

    /// Upper bound on generated tokens
    #[arg(long, env = "ORACLE_MAX_TOKENS", default_value_t = DEFAULT_MAX_OUTPUT_TOKENS)]
    max_tokens: u32,

    /// Seconds allowed for one oracle call
    #[arg(long, env = "ORACLE_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Report translations built from fallback values as failed tasks
    #[arg(
        long,
        env = "LINGOFLOW_STRICT_ORACLE",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    strict_oracle: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        let oracle = OracleConfig::new(self.api_key)
            .with_base_url(self.oracle_base_url)
            .with_model(self.model)
            .with_temperature(self.temperature)
            .with_max_output_tokens(self.max_tokens)
            .with_timeout(Duration::from_secs(self.timeout_secs));

        Config::from_oracle(oracle)
            .with_bind_addr(self.bind)
            .with_fail_on_oracle_fallback(self.strict_oracle)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before clap reads environment fallbacks
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Cli::parse().into_config();
    info!(oracle = ?config.oracle, "starting lingoflow");

    let app = server::build_app(&config).context("failed to build the oracle client")?;

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, path = A2A_PATH, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["lingoflow", "--api-key", "key"]).unwrap();
        let config = cli.into_config();

        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.oracle.api_key, "key");
        assert_eq!(config.oracle.model, DEFAULT_ORACLE_MODEL);
        assert_eq!(config.oracle.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_strict_oracle_accepts_numeric_env() {
        std::env::set_var("LINGOFLOW_STRICT_ORACLE", "1");
        let parsed = Cli::try_parse_from(["lingoflow", "--api-key", "key"]);
        std::env::remove_var("LINGOFLOW_STRICT_ORACLE");

        assert!(parsed.unwrap().into_config().fail_on_oracle_fallback);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "lingoflow",
            "--api-key",
            "key",
            "--bind",
            "127.0.0.1:9100",
            "--oracle-base-url",
            "http://localhost:11434/v1/",
            "--model",
            "qwen",
            "--timeout-secs",
            "5",
            "--strict-oracle",
        ])
        .unwrap();
        let config = cli.into_config();

        assert_eq!(config.bind_addr.port(), 9100);
        assert_eq!(config.oracle.base_url.as_str(), "http://localhost:11434/v1/");
        assert_eq!(config.oracle.model, "qwen");
        assert_eq!(config.oracle.timeout, Duration::from_secs(5));
        assert!(config.fail_on_oracle_fallback);
    }
}

//! Server configuration.

use bookwise_core::GenerationConfig;
use bookwise_error::{ServerError, ServerErrorKind};
use serde::Deserialize;
use std::time::Duration;

/// Listen address and CORS settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Address to bind (e.g. "0.0.0.0")
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Browser origin allowed by CORS, when serving a frontend
    #[serde(default)]
    pub frontend_origin: Option<String>,
}

/// Producer identity and tuning.
///
/// The API key is deliberately not part of this struct; it is read from
/// `OPENAI_API_KEY` at wiring time and never appears in config dumps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LlmSettings {
    /// Provider name (e.g. "openai")
    pub provider: String,
    /// Model identifier (e.g. "gpt-5-mini")
    pub model: String,
    /// Sampling temperature, when the model accepts one
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Output-size bound passed to the producer
    pub max_output_tokens: Option<u32>,
    /// Deadline for one producer invocation, in seconds
    pub timeout_secs: u64,
}

/// Complete server configuration.
///
/// Loaded from an optional `bookwise.toml` file with `BOOKWISE_`-prefixed
/// environment variables layered on top (nested keys use `__`, e.g.
/// `BOOKWISE_SERVER__PORT`). `DATABASE_URL` is honored as a fallback for
/// the database connection string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Listen and CORS settings
    pub server: ServerSettings,
    /// Producer settings
    pub llm: LlmSettings,
    /// PostgreSQL connection string
    pub database_url: String,
    /// Log level filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON-formatted logs
    pub json_logs: bool,
}

impl AppConfig {
    /// Load configuration from file and environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a value cannot be parsed or no
    /// database connection string is available.
    pub fn load() -> Result<Self, ServerError> {
        let database_url_fallback = std::env::var("DATABASE_URL").unwrap_or_default();

        let config = config::Config::builder()
            .set_default("server.host", "0.0.0.0")
            .and_then(|b| b.set_default("server.port", 8000))
            .and_then(|b| b.set_default("llm.provider", "openai"))
            .and_then(|b| b.set_default("llm.model", "gpt-5-mini"))
            .and_then(|b| b.set_default("llm.max_output_tokens", 1200))
            .and_then(|b| b.set_default("llm.timeout_secs", 45))
            .and_then(|b| b.set_default("database_url", database_url_fallback))
            .and_then(|b| b.set_default("log_level", "info"))
            .and_then(|b| b.set_default("json_logs", false))
            .map_err(|e| ServerError::new(ServerErrorKind::Configuration(e.to_string())))?
            .add_source(config::File::with_name("bookwise").required(false))
            .add_source(config::Environment::with_prefix("BOOKWISE").separator("__"))
            .build()
            .map_err(|e| ServerError::new(ServerErrorKind::Configuration(e.to_string())))?;

        let config: AppConfig = config
            .try_deserialize()
            .map_err(|e| ServerError::new(ServerErrorKind::Configuration(e.to_string())))?;

        if config.database_url.is_empty() {
            return Err(ServerError::new(ServerErrorKind::Configuration(
                "no database connection string; set BOOKWISE_DATABASE_URL or DATABASE_URL"
                    .to_string(),
            )));
        }

        Ok(config)
    }

    /// The generation configuration the coordinator runs with.
    pub fn generation(&self) -> GenerationConfig {
        let mut generation = GenerationConfig::new(&self.llm.provider, &self.llm.model)
            .with_timeout(Duration::from_secs(self.llm.timeout_secs));
        generation.temperature = self.llm.temperature;
        generation.max_output_tokens = self.llm.max_output_tokens;
        generation
    }

    /// The listen address in `host:port` form.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Read the producer API key from the environment.
///
/// # Errors
///
/// Returns a configuration error when `OPENAI_API_KEY` is unset.
pub fn openai_api_key() -> Result<String, ServerError> {
    std::env::var("OPENAI_API_KEY").map_err(|_| {
        ServerError::new(ServerErrorKind::Configuration(
            "OPENAI_API_KEY not set".to_string(),
        ))
    })
}

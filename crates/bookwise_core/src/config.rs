//! Generation configuration.

use crate::{PROMPT_VERSION, SCHEMA_VERSION};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identity and tuning of the generation configuration.
///
/// The (provider, model, prompt_version) triple participates in the cache
/// key; the remaining fields bound each producer invocation.
///
/// # Examples
///
/// ```
/// use bookwise_core::GenerationConfig;
///
/// let config = GenerationConfig::new("openai", "gpt-5-mini");
/// assert_eq!(config.prompt_version, "v1");
/// assert_eq!(config.timeout.as_secs(), 45);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Provider name (e.g. "openai")
    pub provider: String,
    /// Model identifier (e.g. "gpt-5-mini")
    pub model: String,
    /// Prompt template version
    pub prompt_version: String,
    /// Section contract version
    pub schema_version: String,
    /// Sampling temperature, when the model accepts one
    pub temperature: Option<f32>,
    /// Output-size bound passed to the producer
    pub max_output_tokens: Option<u32>,
    /// Deadline for one producer invocation
    pub timeout: Duration,
}

impl GenerationConfig {
    /// Create a configuration with the default versions and bounds.
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            prompt_version: PROMPT_VERSION.to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            temperature: None,
            max_output_tokens: Some(1200),
            timeout: Duration::from_secs(45),
        }
    }

    /// Set the producer deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the output-size bound.
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}

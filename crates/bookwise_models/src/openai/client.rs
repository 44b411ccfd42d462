//! OpenAI Responses API client.

use crate::openai::{request::ResponsesRequest, response::ResponsesResponse};
use crate::schema_utils::enforce_no_additional_properties;
use async_trait::async_trait;
use bookwise_error::{ProducerError, ProducerErrorKind};
use bookwise_interface::SectionGenerator;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument};

const OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// OpenAI API client implementing the producer contract.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: Option<f32>,
    max_output_tokens: Option<u32>,
}

impl OpenAiClient {
    /// Creates a new OpenAI client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `model` - Model identifier (e.g. "gpt-5-mini")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        debug!("Creating new OpenAI client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: OPENAI_API_URL.to_string(),
            temperature: None,
            max_output_tokens: None,
        }
    }

    /// Point the client at a different base URL (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the sampling temperature passed on every request.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the output-size bound passed on every request.
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Apply a transport-level timeout to the underlying HTTP client.
    ///
    /// The coordinator also bounds the whole invocation; this keeps a
    /// stuck connection from holding a claim for longer than necessary.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        self
    }

    /// Sends a structured-output request and returns the raw response.
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn send(&self, request: &ResponsesRequest) -> Result<ResponsesResponse, ProducerError> {
        debug!("Sending request to OpenAI Responses API");

        let response = self
            .client
            .post(format!("{}/responses", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("OpenAI request timed out");
                    ProducerError::new(ProducerErrorKind::Timeout)
                } else {
                    error!(error = ?e, "Failed to send request to OpenAI");
                    ProducerError::new(ProducerErrorKind::Transport(e.to_string()))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            error!(status = %status, "OpenAI API returned error");
            return Err(ProducerError::new(ProducerErrorKind::Api {
                status: status.as_u16(),
                message: format!("request failed with status {status}"),
            }));
        }

        response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse OpenAI response envelope");
            ProducerError::new(ProducerErrorKind::Output(format!(
                "unparseable response envelope: {e}"
            )))
        })
    }
}

#[async_trait]
impl SectionGenerator for OpenAiClient {
    async fn generate_json(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value, ProducerError> {
        let strict_schema = enforce_no_additional_properties(schema);
        let request = ResponsesRequest::structured(
            &self.model,
            prompt,
            strict_schema,
            self.temperature,
            self.max_output_tokens,
        );

        let response = self.send(&request).await?;

        let text = response
            .extract_text()
            .ok_or_else(|| ProducerError::new(ProducerErrorKind::Output("empty output".into())))?;

        let parsed: serde_json::Value = serde_json::from_str(text).map_err(|e| {
            ProducerError::new(ProducerErrorKind::Output(format!("invalid JSON: {e}")))
        })?;

        if !parsed.is_object() {
            return Err(ProducerError::new(ProducerErrorKind::Output(
                "payload is not a JSON object".into(),
            )));
        }

        Ok(parsed)
    }
}

//! Request types for the OpenAI Responses API.

use serde::Serialize;
use serde_json::Value;

/// Name attached to the structured-output format.
pub const FORMAT_NAME: &str = "bookwise_generation";

/// A Responses API request with strict structured output.
#[derive(Debug, Clone, Serialize)]
pub struct ResponsesRequest {
    /// Model identifier
    pub model: String,
    /// The prompt text
    pub input: String,
    /// Structured output configuration
    pub text: TextFormat,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Output-size bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// The `text` envelope selecting a strict JSON Schema format.
#[derive(Debug, Clone, Serialize)]
pub struct TextFormat {
    /// Output format selection
    pub format: JsonSchemaFormat,
}

/// Strict JSON Schema output format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSchemaFormat {
    /// Always "json_schema"
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Name of the schema, required by the API
    pub name: &'static str,
    /// The schema itself
    pub schema: Value,
    /// Strict mode rejects any deviation from the schema
    pub strict: bool,
}

impl ResponsesRequest {
    /// Build a strict structured-output request.
    pub fn structured(
        model: impl Into<String>,
        prompt: impl Into<String>,
        schema: Value,
        temperature: Option<f32>,
        max_output_tokens: Option<u32>,
    ) -> Self {
        Self {
            model: model.into(),
            input: prompt.into(),
            text: TextFormat {
                format: JsonSchemaFormat {
                    kind: "json_schema",
                    name: FORMAT_NAME,
                    schema,
                    strict: true,
                },
            },
            temperature,
            max_output_tokens,
        }
    }
}

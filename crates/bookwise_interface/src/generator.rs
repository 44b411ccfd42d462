//! The content producer contract.

use async_trait::async_trait;
use bookwise_error::ProducerError;

/// An opaque producer of structured JSON content.
///
/// The engine treats the producer as `generate(prompt, schema) ->
/// (payload, error)`; everything provider-specific (transport, response
/// encodings, retries) lives behind this trait. Implementations must
/// return parsed JSON objects; a payload that cannot be parsed is a
/// producer error, not a validation failure.
#[async_trait]
pub trait SectionGenerator: Send + Sync {
    /// Generate a JSON payload for the prompt, shaped by the schema.
    async fn generate_json(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value, ProducerError>;
}

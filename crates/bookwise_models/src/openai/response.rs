//! Response types for the OpenAI Responses API.

use serde::Deserialize;

/// A Responses API response, reduced to the fields the engine reads.
///
/// The API offers two encodings of the generated text: an aggregated
/// `output_text` convenience field and the `output` item list. Extraction
/// prefers the aggregated field and falls back to the first text chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponsesResponse {
    /// Aggregated text output, when the server provides it
    #[serde(default)]
    pub output_text: Option<String>,
    /// Raw output items
    #[serde(default)]
    pub output: Vec<OutputItem>,
}

/// One output item (message, reasoning, etc.).
#[derive(Debug, Clone, Deserialize)]
pub struct OutputItem {
    /// Item type discriminator
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Content chunks for message items
    #[serde(default)]
    pub content: Vec<ContentChunk>,
}

/// One content chunk inside a message item.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentChunk {
    /// Chunk type discriminator
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Text payload for output_text chunks
    #[serde(default)]
    pub text: Option<String>,
}

impl ResponsesResponse {
    /// Extract the generated text, preferring the aggregated encoding.
    pub fn extract_text(&self) -> Option<&str> {
        if let Some(text) = self.output_text.as_deref() {
            if !text.is_empty() {
                return Some(text);
            }
        }
        self.output
            .iter()
            .filter(|item| item.kind == "message")
            .flat_map(|item| item.content.iter())
            .find(|chunk| chunk.kind == "output_text")
            .and_then(|chunk| chunk.text.as_deref())
            .filter(|text| !text.is_empty())
    }
}

//! OpenAI Responses API integration.

mod client;
mod request;
mod response;

pub use client::OpenAiClient;
pub use request::ResponsesRequest;
pub use response::ResponsesResponse;

//! LLM provider integration for BookWise.
//!
//! This crate implements the [`SectionGenerator`] contract over the OpenAI
//! Responses API. The engine never sees provider specifics: it hands in a
//! prompt and a JSON Schema and receives parsed JSON or a categorized
//! producer error.
//!
//! [`SectionGenerator`]: bookwise_interface::SectionGenerator

mod openai;
mod schema_utils;

pub use openai::{OpenAiClient, ResponsesRequest, ResponsesResponse};
pub use schema_utils::enforce_no_additional_properties;

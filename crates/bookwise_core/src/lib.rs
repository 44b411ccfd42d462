//! Core domain types for the BookWise generation engine.
//!
//! This crate provides the vocabulary shared by every other BookWise crate:
//! the section taxonomy, the cache key that identifies one generation
//! lineage, the per-section content contracts with their strict validator,
//! and the prompt/schema builders handed to the content producer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod book;
mod config;
mod content;
mod failure;
mod key;
mod prompt;
mod schema;
mod section;
mod validate;

pub use book::{BookContext, BookRecord};
pub use config::GenerationConfig;
pub use content::{
    ChapterItem, ChaptersContent, CritiqueContent, KeyIdeasContent, OverviewContent,
    SectionContent,
};
pub use failure::FailureCode;
pub use key::CacheKey;
pub use prompt::{build_prompt, PROMPT_VERSION, SCHEMA_VERSION};
pub use schema::section_json_schema;
pub use section::SectionKind;
pub use validate::{validate_section, ValidationError};

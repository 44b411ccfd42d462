//! Cache key composition.

use crate::SectionKind;
use serde::{Deserialize, Serialize};

/// Identity of one generation lineage: one book, one section, one
/// generation configuration.
///
/// The key doubles as the store's uniqueness constraint and as the
/// identifier returned to polling callers. It carries no secrets and is
/// safe to expose in response bodies.
///
/// Composition is injective: the fields are kept separate rather than
/// pre-hashed, so two distinct input tuples can never collapse to the
/// same key.
///
/// # Examples
///
/// ```
/// use bookwise_core::{CacheKey, SectionKind};
///
/// let key = CacheKey::compose("OL1W", SectionKind::Overview, "openai", "gpt-5-mini", "v1");
/// assert_eq!(key.to_string(), "OL1W:overview:v1:openai:gpt-5-mini");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    /// Open Library work identifier
    pub book_id: String,
    /// Section being generated
    pub section: SectionKind,
    /// Provider name (e.g. "openai")
    pub provider: String,
    /// Model identifier
    pub model: String,
    /// Prompt template version
    pub prompt_version: String,
}

impl CacheKey {
    /// Compose a cache key from its parts.
    pub fn compose(
        book_id: impl Into<String>,
        section: SectionKind,
        provider: impl Into<String>,
        model: impl Into<String>,
        prompt_version: impl Into<String>,
    ) -> Self {
        Self {
            book_id: book_id.into(),
            section,
            provider: provider.into(),
            model: model.into(),
            prompt_version: prompt_version.into(),
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}",
            self.book_id, self.section, self.prompt_version, self.provider, self.model
        )
    }
}

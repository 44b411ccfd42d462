//! Per-section content contracts.
//!
//! Each section has a fixed structural contract. The shapes deny unknown
//! fields so that producer output with extra keys is rejected at the
//! deserialization boundary rather than silently dropped.

use crate::SectionKind;
use serde::{Deserialize, Serialize};

/// Overview section: short prose plus an estimated reading time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverviewContent {
    /// Prose overview, at least 20 characters
    pub overview: String,
    /// Estimated reading time, 1 to 240 minutes
    pub reading_time_minutes: i32,
}

/// Key ideas section: 3 to 10 bullet points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyIdeasContent {
    /// The key ideas, 3 to 10 entries
    pub key_ideas: Vec<String>,
}

/// One chapter entry in the chapters section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChapterItem {
    /// Chapter title, non-empty
    pub title: String,
    /// Chapter summary, at least 10 characters
    pub summary: String,
}

/// Chapters section: 5 to 25 chapter summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChaptersContent {
    /// The chapter summaries, 5 to 25 entries
    pub chapters: Vec<ChapterItem>,
}

/// Critique section: strengths, weaknesses, and intended audience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CritiqueContent {
    /// Strengths of the book, 2 to 8 entries
    pub strengths: Vec<String>,
    /// Weaknesses of the book, 2 to 8 entries
    pub weaknesses: Vec<String>,
    /// Who the book is for, 2 to 8 entries
    pub who_should_read: Vec<String>,
}

/// Validated content for one section, tagged by section kind.
///
/// A value of this type has passed the strict validator; anything stored
/// as `complete` is reconstructible into one of these variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionContent {
    /// Overview content
    Overview(OverviewContent),
    /// Key ideas content
    KeyIdeas(KeyIdeasContent),
    /// Chapters content
    Chapters(ChaptersContent),
    /// Critique content
    Critique(CritiqueContent),
}

impl SectionContent {
    /// The section this content belongs to.
    pub fn section(&self) -> SectionKind {
        match self {
            SectionContent::Overview(_) => SectionKind::Overview,
            SectionContent::KeyIdeas(_) => SectionKind::KeyIdeas,
            SectionContent::Chapters(_) => SectionKind::Chapters,
            SectionContent::Critique(_) => SectionKind::Critique,
        }
    }

    /// Serialize to the JSON payload persisted on the generation row.
    pub fn to_value(&self) -> serde_json::Value {
        // The shapes above contain only maps, strings, and integers, so
        // serialization cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

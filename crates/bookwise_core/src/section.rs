//! The fixed set of generatable book sections.

use serde::{Deserialize, Serialize};

/// One generatable section of a book's reading insights.
///
/// The wire and storage representation is the snake_case name.
///
/// # Examples
///
/// ```
/// use bookwise_core::SectionKind;
/// use std::str::FromStr;
///
/// let section = SectionKind::from_str("key_ideas").unwrap();
/// assert_eq!(section, SectionKind::KeyIdeas);
/// assert_eq!(section.to_string(), "key_ideas");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SectionKind {
    /// Short prose overview with an estimated reading time
    Overview,
    /// Bullet list of the book's key ideas
    KeyIdeas,
    /// Chapter-by-chapter summaries
    Chapters,
    /// Strengths, weaknesses, and intended audience
    Critique,
}

impl SectionKind {
    /// Storage/wire name of this section.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Overview => "overview",
            SectionKind::KeyIdeas => "key_ideas",
            SectionKind::Chapters => "chapters",
            SectionKind::Critique => "critique",
        }
    }
}

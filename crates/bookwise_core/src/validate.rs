//! Strict validation of producer output against section contracts.
//!
//! Validation is all-or-nothing: unknown shapes and out-of-bound fields
//! reject the whole payload. Partially valid content is never accepted,
//! so a `complete` row always holds contract-valid content.

use crate::{
    ChaptersContent, CritiqueContent, KeyIdeasContent, OverviewContent, SectionContent,
    SectionKind,
};

const OVERVIEW_MIN_CHARS: usize = 20;
const READING_TIME_RANGE: std::ops::RangeInclusive<i32> = 1..=240;
const KEY_IDEAS_RANGE: std::ops::RangeInclusive<usize> = 3..=10;
const CHAPTERS_RANGE: std::ops::RangeInclusive<usize> = 5..=25;
const CHAPTER_SUMMARY_MIN_CHARS: usize = 10;
const CRITIQUE_LIST_RANGE: std::ops::RangeInclusive<usize> = 2..=8;

/// Why a structurally parseable payload violated its section contract.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ValidationError {
    /// The payload did not deserialize into the section's shape
    #[display("Payload does not match the {} contract: {}", section, detail)]
    Shape {
        /// Section whose contract was violated
        section: SectionKind,
        /// Deserializer message
        detail: String,
    },
    /// A field was present but outside its configured bounds
    #[display("Field '{}' out of bounds: {}", field, detail)]
    Bounds {
        /// Name of the offending field
        field: &'static str,
        /// Human-readable bound description
        detail: String,
    },
}

fn bounds(field: &'static str, detail: impl Into<String>) -> ValidationError {
    ValidationError::Bounds {
        field,
        detail: detail.into(),
    }
}

fn check_list_len(
    field: &'static str,
    len: usize,
    range: &std::ops::RangeInclusive<usize>,
) -> Result<(), ValidationError> {
    if range.contains(&len) {
        Ok(())
    } else {
        Err(bounds(
            field,
            format!(
                "expected {} to {} entries, got {}",
                range.start(),
                range.end(),
                len
            ),
        ))
    }
}

fn validate_overview(content: &OverviewContent) -> Result<(), ValidationError> {
    if content.overview.chars().count() < OVERVIEW_MIN_CHARS {
        return Err(bounds(
            "overview",
            format!("expected at least {OVERVIEW_MIN_CHARS} characters"),
        ));
    }
    if !READING_TIME_RANGE.contains(&content.reading_time_minutes) {
        return Err(bounds(
            "reading_time_minutes",
            format!(
                "expected {} to {}, got {}",
                READING_TIME_RANGE.start(),
                READING_TIME_RANGE.end(),
                content.reading_time_minutes
            ),
        ));
    }
    Ok(())
}

fn validate_key_ideas(content: &KeyIdeasContent) -> Result<(), ValidationError> {
    check_list_len("key_ideas", content.key_ideas.len(), &KEY_IDEAS_RANGE)?;
    if content.key_ideas.iter().any(|idea| idea.trim().is_empty()) {
        return Err(bounds("key_ideas", "entries must be non-empty"));
    }
    Ok(())
}

fn validate_chapters(content: &ChaptersContent) -> Result<(), ValidationError> {
    check_list_len("chapters", content.chapters.len(), &CHAPTERS_RANGE)?;
    for chapter in &content.chapters {
        if chapter.title.is_empty() {
            return Err(bounds("chapters.title", "expected a non-empty title"));
        }
        if chapter.summary.chars().count() < CHAPTER_SUMMARY_MIN_CHARS {
            return Err(bounds(
                "chapters.summary",
                format!("expected at least {CHAPTER_SUMMARY_MIN_CHARS} characters"),
            ));
        }
    }
    Ok(())
}

fn validate_critique(content: &CritiqueContent) -> Result<(), ValidationError> {
    check_list_len("strengths", content.strengths.len(), &CRITIQUE_LIST_RANGE)?;
    check_list_len("weaknesses", content.weaknesses.len(), &CRITIQUE_LIST_RANGE)?;
    check_list_len(
        "who_should_read",
        content.who_should_read.len(),
        &CRITIQUE_LIST_RANGE,
    )?;
    Ok(())
}

/// Validate a raw producer payload against one section's contract.
///
/// The payload must already be parsed JSON; failures to even parse the
/// producer's response are a producer error, not a validation failure.
///
/// # Errors
///
/// Returns [`ValidationError`] when the payload does not deserialize into
/// the section's shape, carries unknown fields, or has a field outside its
/// configured bounds.
pub fn validate_section(
    section: SectionKind,
    payload: &serde_json::Value,
) -> Result<SectionContent, ValidationError> {
    let shape_err = |e: serde_json::Error| ValidationError::Shape {
        section,
        detail: e.to_string(),
    };

    let content = match section {
        SectionKind::Overview => {
            let parsed: OverviewContent =
                serde_json::from_value(payload.clone()).map_err(shape_err)?;
            validate_overview(&parsed)?;
            SectionContent::Overview(parsed)
        }
        SectionKind::KeyIdeas => {
            let parsed: KeyIdeasContent =
                serde_json::from_value(payload.clone()).map_err(shape_err)?;
            validate_key_ideas(&parsed)?;
            SectionContent::KeyIdeas(parsed)
        }
        SectionKind::Chapters => {
            let parsed: ChaptersContent =
                serde_json::from_value(payload.clone()).map_err(shape_err)?;
            validate_chapters(&parsed)?;
            SectionContent::Chapters(parsed)
        }
        SectionKind::Critique => {
            let parsed: CritiqueContent =
                serde_json::from_value(payload.clone()).map_err(shape_err)?;
            validate_critique(&parsed)?;
            SectionContent::Critique(parsed)
        }
    };

    Ok(content)
}

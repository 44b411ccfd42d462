//! Work metadata normalization.

use crate::client::OpenLibraryClient;
use bookwise_error::CatalogError;
use serde_json::Value;
use tracing::debug;

const MAX_AUTHORS: usize = 3;

/// Normalized metadata for one work, ready for persistence and display.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct WorkMetadata {
    /// Open Library work identifier
    pub id: String,
    /// Work title
    pub title: String,
    /// Resolved author names
    pub authors: Vec<String>,
    /// Normalized description, when present
    pub description: Option<String>,
    /// Subject tags
    pub subjects: Vec<String>,
    /// Cover image URL, when a cover exists
    pub cover_url: Option<String>,
    /// Canonical Open Library URL
    pub openlibrary_url: String,
    /// Year of first publication, when derivable
    pub first_publish_year: Option<i32>,
}

impl WorkMetadata {
    /// Author names joined into the storage representation.
    pub fn authors_joined(&self) -> String {
        self.authors
            .iter()
            .map(|author| author.trim())
            .filter(|author| !author.is_empty())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn normalize_description(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Object(map)) => match map.get("value") {
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            _ => None,
        },
        _ => None,
    }
}

fn extract_first_publish_year(work: &Value) -> Option<i32> {
    if let Some(year) = work.get("first_publish_year").and_then(Value::as_i64) {
        return i32::try_from(year).ok();
    }
    let date = work.get("first_publish_date")?.as_str()?;
    if date.len() >= 4 && date[..4].chars().all(|c| c.is_ascii_digit()) {
        return date[..4].parse().ok();
    }
    None
}

fn author_keys_from_work(work: &Value) -> Vec<String> {
    let Some(authors) = work.get("authors").and_then(Value::as_array) else {
        return Vec::new();
    };

    authors
        .iter()
        .filter_map(|entry| entry.get("author"))
        .filter_map(|author| author.get("key"))
        .filter_map(Value::as_str)
        .filter(|key| key.starts_with("/authors/"))
        .take(MAX_AUTHORS)
        .map(str::to_string)
        .collect()
}

fn cover_url_from_work(work: &Value) -> Option<String> {
    let covers = work.get("covers")?.as_array()?;
    let first = covers.first()?.as_i64()?;
    Some(format!("https://covers.openlibrary.org/b/id/{first}-L.jpg"))
}

/// Resolve and normalize metadata for a work from Open Library.
///
/// Author lookups that fail are skipped rather than failing the whole
/// resolution.
///
/// # Errors
///
/// Returns `NotFound` when the work does not exist, `Upstream` when Open
/// Library is unavailable.
pub async fn resolve_work_metadata(
    client: &OpenLibraryClient,
    work_id: &str,
) -> Result<WorkMetadata, CatalogError> {
    let work = client.get_work(work_id).await?;

    let mut authors = Vec::new();
    for author_key in author_keys_from_work(&work) {
        match client.get_author(&author_key).await {
            Ok(payload) => {
                if let Some(name) = payload.get("name").and_then(Value::as_str) {
                    let name = name.trim();
                    if !name.is_empty() {
                        authors.push(name.to_string());
                    }
                }
            }
            Err(e) => {
                debug!(%author_key, error = %e, "Skipping unresolvable author");
            }
        }
    }

    let subjects = work
        .get("subjects")
        .and_then(Value::as_array)
        .map(|subjects| {
            subjects
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let title = work
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(WorkMetadata {
        id: work_id.to_string(),
        title,
        authors,
        description: normalize_description(work.get("description")),
        subjects,
        cover_url: cover_url_from_work(&work),
        openlibrary_url: format!("https://openlibrary.org/works/{work_id}"),
        first_publish_year: extract_first_publish_year(&work),
    })
}

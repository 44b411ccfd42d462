//! Book metadata types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical metadata for a work, as persisted by the catalog
/// collaborator.
///
/// Created on first resolution and upserted on re-resolution; the
/// generation engine only requires that a record exists before a
/// generation row may reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Open Library work identifier (e.g. "OL45883W")
    pub id: String,
    /// Work title
    pub title: String,
    /// Author names joined with "; "
    pub authors: String,
    /// Year of first publication, when known
    pub first_publish_year: Option<i32>,
    /// Cover image URL, when a cover exists
    pub cover_url: Option<String>,
    /// Canonical Open Library URL for the work
    pub openlibrary_url: String,
    /// Row creation time
    pub created_at: DateTime<Utc>,
    /// Last upsert time
    pub updated_at: DateTime<Utc>,
}

impl BookRecord {
    /// Prompt context derived from this record.
    pub fn context(&self) -> BookContext {
        BookContext {
            title: self.title.clone(),
            authors: self.authors.clone(),
            first_publish_year: self.first_publish_year,
            description: None,
            subjects: Vec::new(),
        }
    }
}

/// The slice of book metadata interpolated into generation prompts.
///
/// Metadata is untrusted input; the prompt builder instructs the model to
/// ignore any instructions embedded in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookContext {
    /// Work title
    pub title: String,
    /// Author names joined with "; "
    pub authors: String,
    /// Year of first publication, when known
    pub first_publish_year: Option<i32>,
    /// Catalog description, when present
    pub description: Option<String>,
    /// Subject tags from the catalog
    pub subjects: Vec<String>,
}

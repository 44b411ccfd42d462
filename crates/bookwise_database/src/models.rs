//! Diesel row models and domain conversions.

use bookwise_core::{BookRecord, CacheKey, FailureCode, SectionKind};
use bookwise_error::{DatabaseError, DatabaseErrorKind};
use bookwise_interface::{GenerationRecord, GenerationStatus};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use std::str::FromStr;

/// Database row for the books table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Insertable, Serialize)]
#[diesel(table_name = crate::schema::books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookRow {
    pub id: String,
    pub title: String,
    pub authors: String,
    pub first_publish_year: Option<i32>,
    pub cover_url: Option<String>,
    pub openlibrary_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookRow> for BookRecord {
    fn from(row: BookRow) -> Self {
        BookRecord {
            id: row.id,
            title: row.title,
            authors: row.authors,
            first_publish_year: row.first_publish_year,
            cover_url: row.cover_url,
            openlibrary_url: row.openlibrary_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<&BookRecord> for BookRow {
    fn from(record: &BookRecord) -> Self {
        BookRow {
            id: record.id.clone(),
            title: record.title.clone(),
            authors: record.authors.clone(),
            first_publish_year: record.first_publish_year,
            cover_url: record.cover_url.clone(),
            openlibrary_url: record.openlibrary_url.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Database row for the book_generations table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::book_generations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GenerationRow {
    pub id: i32,
    pub book_id: String,
    pub section: String,
    pub provider: String,
    pub model: String,
    pub prompt_version: String,
    pub schema_version: String,
    pub status: String,
    pub content: Option<serde_json::Value>,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    pub attempt_count: i32,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GenerationRow {
    /// Convert a stored row into the domain record.
    ///
    /// # Errors
    ///
    /// Returns a `CorruptRow` error when the stored section, status, or
    /// error code no longer parses into its enum.
    pub fn into_record(self) -> Result<GenerationRecord, DatabaseError> {
        let section = SectionKind::from_str(&self.section).map_err(|_| {
            DatabaseError::new(DatabaseErrorKind::CorruptRow(format!(
                "unknown section '{}'",
                self.section
            )))
        })?;
        let status = GenerationStatus::parse(&self.status).ok_or_else(|| {
            DatabaseError::new(DatabaseErrorKind::CorruptRow(format!(
                "unknown status '{}'",
                self.status
            )))
        })?;
        let error_code = self
            .error_code
            .as_deref()
            .map(|code| {
                FailureCode::from_str(code).map_err(|_| {
                    DatabaseError::new(DatabaseErrorKind::CorruptRow(format!(
                        "unknown error code '{code}'"
                    )))
                })
            })
            .transpose()?;

        Ok(GenerationRecord {
            book_id: self.book_id,
            section,
            provider: self.provider,
            model: self.model,
            prompt_version: self.prompt_version,
            schema_version: self.schema_version,
            status,
            content: self.content,
            error_code,
            error_message: self.error_message,
            attempt_count: self.attempt_count,
            started_at: self.started_at,
            finished_at: self.finished_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insertable struct for claiming a brand-new generation row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::book_generations)]
pub struct NewGenerationRow {
    pub book_id: String,
    pub section: String,
    pub provider: String,
    pub model: String,
    pub prompt_version: String,
    pub schema_version: String,
    pub status: String,
    pub attempt_count: i32,
    pub started_at: Option<DateTime<Utc>>,
}

impl NewGenerationRow {
    /// First claim for a cache key: pending, attempt 1, started now.
    pub fn pending(key: &CacheKey, schema_version: &str) -> Self {
        Self {
            book_id: key.book_id.clone(),
            section: key.section.as_str().to_string(),
            provider: key.provider.clone(),
            model: key.model.clone(),
            prompt_version: key.prompt_version.clone(),
            schema_version: schema_version.to_string(),
            status: GenerationStatus::Pending.as_str().to_string(),
            attempt_count: 1,
            started_at: Some(Utc::now()),
        }
    }
}

//! Book metadata persistence.

use crate::models::BookRow;
use crate::{DatabaseResult, PgPool};
use bookwise_core::BookRecord;
use bookwise_error::DatabaseError;
use bookwise_interface::BookStore;
use chrono::Utc;
use diesel::prelude::*;

/// Postgres-backed [`BookStore`].
///
/// Books are created on first resolution and upserted on re-resolution;
/// they are never deleted here.
pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    /// Create a repository over a shared connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BookStore for PostgresBookRepository {
    fn get(&self, work_id: &str) -> DatabaseResult<Option<BookRecord>> {
        use crate::schema::books::dsl;

        let mut conn = self.pool.get().map_err(DatabaseError::from)?;

        let row: Option<BookRow> = dsl::books
            .find(work_id)
            .select(BookRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(DatabaseError::from)?;

        Ok(row.map(BookRecord::from))
    }

    fn upsert(&self, record: &BookRecord) -> DatabaseResult<BookRecord> {
        use crate::schema::books::dsl;

        let mut conn = self.pool.get().map_err(DatabaseError::from)?;
        let row = BookRow::from(record);

        let stored: BookRow = diesel::insert_into(dsl::books)
            .values(&row)
            .on_conflict(dsl::id)
            .do_update()
            .set((
                dsl::title.eq(&row.title),
                dsl::authors.eq(&row.authors),
                dsl::first_publish_year.eq(row.first_publish_year),
                dsl::cover_url.eq(&row.cover_url),
                dsl::openlibrary_url.eq(&row.openlibrary_url),
                dsl::updated_at.eq(Utc::now()),
            ))
            .get_result(&mut conn)
            .map_err(DatabaseError::from)?;

        Ok(BookRecord::from(stored))
    }
}

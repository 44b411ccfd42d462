//! Postgres implementation of the generation store claim protocol.

use crate::models::{GenerationRow, NewGenerationRow};
use crate::{DatabaseResult, PgPool};
use bookwise_core::CacheKey;
use bookwise_error::{DatabaseError, DatabaseErrorKind};
use bookwise_interface::{
    AttemptToken, ClaimOutcome, FinishOutcome, GenerationOutcome, GenerationRecord,
    GenerationStatus, GenerationStore,
};
use chrono::Utc;
use diesel::prelude::*;
use tracing::debug;

/// Failure messages are bounded before persistence.
const ERROR_MESSAGE_MAX_CHARS: usize = 200;

/// Postgres-backed [`GenerationStore`].
///
/// Atomicity comes from the database, not from process-local locks: the
/// unique constraint over (book_id, section, provider, model,
/// prompt_version) makes `claim_new` a single-winner insert, and
/// `claim_retry`/`finish` are guarded single-statement updates whose
/// row count reveals whether this caller won the transition.
pub struct PostgresGenerationStore {
    pool: PgPool,
}

impl PostgresGenerationStore {
    /// Create a store over a shared connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn truncate_message(message: &str) -> String {
        message.chars().take(ERROR_MESSAGE_MAX_CHARS).collect()
    }
}

/// Filter expression selecting the single row for a cache key.
macro_rules! key_filter {
    ($key:expr) => {{
        use crate::schema::book_generations::dsl;
        dsl::book_generations
            .filter(dsl::book_id.eq(&$key.book_id))
            .filter(dsl::section.eq($key.section.as_str()))
            .filter(dsl::provider.eq(&$key.provider))
            .filter(dsl::model.eq(&$key.model))
            .filter(dsl::prompt_version.eq(&$key.prompt_version))
    }};
}

impl GenerationStore for PostgresGenerationStore {
    fn lookup(&self, key: &CacheKey) -> DatabaseResult<Option<GenerationRecord>> {
        let mut conn = self.pool.get().map_err(DatabaseError::from)?;

        let row: Option<GenerationRow> = key_filter!(key)
            .select(GenerationRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(DatabaseError::from)?;

        row.map(GenerationRow::into_record).transpose()
    }

    fn claim_new(&self, key: &CacheKey, schema_version: &str) -> DatabaseResult<ClaimOutcome> {
        use crate::schema::book_generations;

        let mut conn = self.pool.get().map_err(DatabaseError::from)?;
        let new_row = NewGenerationRow::pending(key, schema_version);

        let inserted: Result<GenerationRow, DatabaseError> =
            diesel::insert_into(book_generations::table)
                .values(&new_row)
                .get_result(&mut conn)
                .map_err(DatabaseError::from);

        match inserted {
            Ok(row) => Ok(ClaimOutcome::Claimed(row.into_record()?)),
            Err(err) if matches!(err.kind, DatabaseErrorKind::UniqueViolation(_)) => {
                debug!(key = %key, "claim_new lost insert race");
                Ok(ClaimOutcome::AlreadyExists)
            }
            Err(err) => Err(err),
        }
    }

    fn claim_retry(
        &self,
        key: &CacheKey,
        expected: GenerationStatus,
    ) -> DatabaseResult<ClaimOutcome> {
        use crate::schema::book_generations::dsl;

        let mut conn = self.pool.get().map_err(DatabaseError::from)?;
        let now = Utc::now();

        let updated: Option<GenerationRow> =
            diesel::update(key_filter!(key).filter(dsl::status.eq(expected.as_str())))
                .set((
                    dsl::status.eq(GenerationStatus::Pending.as_str()),
                    dsl::attempt_count.eq(dsl::attempt_count + 1),
                    dsl::started_at.eq(Some(now)),
                    dsl::finished_at.eq(None::<chrono::DateTime<Utc>>),
                    dsl::content.eq(None::<serde_json::Value>),
                    dsl::error_code.eq(None::<String>),
                    dsl::error_message.eq(None::<String>),
                    dsl::updated_at.eq(now),
                ))
                .get_result(&mut conn)
                .optional()
                .map_err(DatabaseError::from)?;

        match updated {
            Some(row) => Ok(ClaimOutcome::Claimed(row.into_record()?)),
            None => {
                debug!(key = %key, expected = %expected, "claim_retry found row in another state");
                Ok(ClaimOutcome::Conflict)
            }
        }
    }

    fn finish(
        &self,
        key: &CacheKey,
        token: AttemptToken,
        outcome: GenerationOutcome,
    ) -> DatabaseResult<FinishOutcome> {
        use crate::schema::book_generations::dsl;

        let mut conn = self.pool.get().map_err(DatabaseError::from)?;
        let now = Utc::now();

        let guard = key_filter!(key)
            .filter(dsl::status.eq(GenerationStatus::Pending.as_str()))
            .filter(dsl::attempt_count.eq(token.0));

        let updated: Option<GenerationRow> = match outcome {
            GenerationOutcome::Complete(content) => diesel::update(guard)
                .set((
                    dsl::status.eq(GenerationStatus::Complete.as_str()),
                    dsl::content.eq(Some(content.to_value())),
                    dsl::error_code.eq(None::<String>),
                    dsl::error_message.eq(None::<String>),
                    dsl::finished_at.eq(Some(now)),
                    dsl::updated_at.eq(now),
                ))
                .get_result(&mut conn)
                .optional()
                .map_err(DatabaseError::from)?,
            GenerationOutcome::Failed { code, message } => diesel::update(guard)
                .set((
                    dsl::status.eq(GenerationStatus::Failed.as_str()),
                    dsl::content.eq(None::<serde_json::Value>),
                    dsl::error_code.eq(Some(code.as_str().to_string())),
                    dsl::error_message.eq(Some(Self::truncate_message(&message))),
                    dsl::finished_at.eq(Some(now)),
                    dsl::updated_at.eq(now),
                ))
                .get_result(&mut conn)
                .optional()
                .map_err(DatabaseError::from)?,
        };

        match updated {
            Some(row) => Ok(FinishOutcome::Committed(row.into_record()?)),
            None => {
                debug!(key = %key, token = token.0, "finish rejected as stale attempt");
                Ok(FinishOutcome::StaleAttempt)
            }
        }
    }
}

//! The generation store contract.

use crate::{AttemptToken, ClaimOutcome, FinishOutcome, GenerationOutcome, GenerationRecord};
use bookwise_core::CacheKey;
use bookwise_error::DatabaseError;

/// Durable table of generation attempts with atomic claim/transition
/// operations.
///
/// All mutual exclusion between concurrent requests is delegated to the
/// store: the uniqueness constraint on the cache key makes `claim_new` a
/// single-winner insert, and the guarded updates behind `claim_retry` and
/// `finish` make state transitions single-winner compare-and-swap
/// operations. No in-memory lock is layered on top, so correctness holds
/// across multiple server processes sharing one database.
///
/// Rows are never mutated outside this protocol and never hard-deleted by
/// the engine.
pub trait GenerationStore: Send + Sync {
    /// Fetch the record for a cache key, if one exists.
    fn lookup(&self, key: &CacheKey) -> Result<Option<GenerationRecord>, DatabaseError>;

    /// Insert a new pending row with `attempt_count = 1`.
    ///
    /// Returns [`ClaimOutcome::AlreadyExists`] when a concurrent insert won
    /// the race; the caller must re-lookup.
    fn claim_new(
        &self,
        key: &CacheKey,
        schema_version: &str,
    ) -> Result<ClaimOutcome, DatabaseError>;

    /// Transition an existing row from exactly `expected` to pending,
    /// incrementing `attempt_count` and resetting the attempt fields.
    ///
    /// Returns [`ClaimOutcome::Conflict`] when the row's current status is
    /// not `expected` (another actor claimed first, or it is already
    /// pending).
    fn claim_retry(
        &self,
        key: &CacheKey,
        expected: crate::GenerationStatus,
    ) -> Result<ClaimOutcome, DatabaseError>;

    /// Persist the outcome of a claimed attempt.
    ///
    /// The write only commits while the row is still pending with an
    /// attempt count matching `token`; otherwise the attempt was
    /// superseded by a newer forced reclaim and
    /// [`FinishOutcome::StaleAttempt`] is returned with nothing written.
    fn finish(
        &self,
        key: &CacheKey,
        token: AttemptToken,
        outcome: GenerationOutcome,
    ) -> Result<FinishOutcome, DatabaseError>;
}

//! Book metadata resolution contracts.

use async_trait::async_trait;
use bookwise_core::BookRecord;
use bookwise_error::{CatalogError, DatabaseError};

/// Durable storage for resolved book metadata.
pub trait BookStore: Send + Sync {
    /// Fetch a book by work ID.
    fn get(&self, work_id: &str) -> Result<Option<BookRecord>, DatabaseError>;

    /// Insert or update a book record, returning the stored row.
    fn upsert(&self, record: &BookRecord) -> Result<BookRecord, DatabaseError>;
}

/// Resolves a work ID to a stored [`BookRecord`], creating it from the
/// external catalog when missing.
///
/// The coordinator calls this before claiming; a resolution failure is
/// reported before any generation row exists.
#[async_trait]
pub trait BookResolver: Send + Sync {
    /// Return the stored record for a work, resolving and upserting from
    /// the catalog on a miss.
    async fn ensure_book(&self, work_id: &str) -> Result<BookRecord, CatalogError>;
}

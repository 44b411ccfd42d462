//! Book resolution against the store and the catalog.

use crate::client::OpenLibraryClient;
use crate::metadata::resolve_work_metadata;
use crate::work_id::is_valid_work_id;
use async_trait::async_trait;
use bookwise_core::BookRecord;
use bookwise_error::{CatalogError, CatalogErrorKind};
use bookwise_interface::{BookResolver, BookStore};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, instrument};

/// [`BookResolver`] backed by a [`BookStore`] and the Open Library client.
///
/// A stored book short-circuits resolution; a miss resolves metadata from
/// the catalog and upserts it. Resolution failures surface before any
/// generation row exists.
pub struct CatalogBookResolver<S> {
    store: Arc<S>,
    client: OpenLibraryClient,
}

impl<S: BookStore> CatalogBookResolver<S> {
    /// Create a resolver over a book store and catalog client.
    pub fn new(store: Arc<S>, client: OpenLibraryClient) -> Self {
        Self { store, client }
    }

    /// Resolve fresh metadata and upsert it, returning the stored record.
    ///
    /// Used by the metadata endpoint, which always re-resolves.
    #[instrument(skip(self))]
    pub async fn refresh_book(&self, work_id: &str) -> Result<BookRecord, CatalogError> {
        let metadata = resolve_work_metadata(&self.client, work_id).await?;
        let now = Utc::now();
        let record = BookRecord {
            id: metadata.id.clone(),
            title: metadata.title.clone(),
            authors: metadata.authors_joined(),
            first_publish_year: metadata.first_publish_year,
            cover_url: metadata.cover_url.clone(),
            openlibrary_url: metadata.openlibrary_url.clone(),
            created_at: now,
            updated_at: now,
        };
        self.store
            .upsert(&record)
            .map_err(|e| CatalogError::new(CatalogErrorKind::Upstream(e.to_string())))
    }
}

#[async_trait]
impl<S: BookStore> BookResolver for CatalogBookResolver<S> {
    async fn ensure_book(&self, work_id: &str) -> Result<BookRecord, CatalogError> {
        if !is_valid_work_id(work_id) {
            return Err(CatalogError::new(CatalogErrorKind::InvalidWorkId(
                work_id.to_string(),
            )));
        }

        let stored = self
            .store
            .get(work_id)
            .map_err(|e| CatalogError::new(CatalogErrorKind::Upstream(e.to_string())))?;

        if let Some(record) = stored {
            debug!(%work_id, "Book already resolved");
            return Ok(record);
        }

        self.refresh_book(work_id).await
    }
}

//! Thin HTTP client for the Open Library API.

use bookwise_error::{CatalogError, CatalogErrorKind};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, instrument};

const OPENLIBRARY_API_URL: &str = "https://openlibrary.org";

/// Open Library API client.
#[derive(Debug, Clone)]
pub struct OpenLibraryClient {
    client: Client,
    base_url: String,
}

impl Default for OpenLibraryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenLibraryClient {
    /// Creates a client against the public Open Library API.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: OPENLIBRARY_API_URL.to_string(),
        }
    }

    /// Point the client at a different base URL (test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json(&self, path: &str, subject: &str) -> Result<Value, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "Fetching from Open Library");

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!(error = ?e, "Open Library request failed");
            CatalogError::new(CatalogErrorKind::Upstream(e.to_string()))
        })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::new(CatalogErrorKind::NotFound(
                subject.to_string(),
            )));
        }
        if !response.status().is_success() {
            let status = response.status();
            error!(status = %status, "Open Library returned error status");
            return Err(CatalogError::new(CatalogErrorKind::Upstream(format!(
                "status {status}"
            ))));
        }

        response.json().await.map_err(|e| {
            CatalogError::new(CatalogErrorKind::Decode(e.to_string()))
        })
    }

    /// Fetch the raw work payload for a work ID.
    #[instrument(skip(self))]
    pub async fn get_work(&self, work_id: &str) -> Result<Value, CatalogError> {
        self.get_json(&format!("/works/{work_id}.json"), work_id).await
    }

    /// Fetch the raw author payload for an author key (e.g. "/authors/OL1A").
    #[instrument(skip(self))]
    pub async fn get_author(&self, author_key: &str) -> Result<Value, CatalogError> {
        self.get_json(&format!("{author_key}.json"), author_key).await
    }
}

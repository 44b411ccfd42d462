//! Response shapes returned to callers of the engine.

use bookwise_core::{CacheKey, FailureCode};
use bookwise_interface::GenerationRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Retry hint handed to callers who observe an in-flight attempt.
pub const RETRY_AFTER_MS: u64 = 500;

/// Outcome of one generation request, ready for serialization.
///
/// Every variant carries the cache key so polling callers can correlate
/// responses; the key contains no secrets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationResponse {
    /// Contract-valid content is available.
    Complete {
        /// Identity of the generation lineage
        cache_key: CacheKey,
        /// True when served from the cache, false when generated by this
        /// request
        stored: bool,
        /// The validated section content
        content: Value,
        /// When the content was last written
        updated_at: DateTime<Utc>,
    },
    /// An attempt is in flight elsewhere; poll again after the hint.
    Pending {
        /// Identity of the generation lineage
        cache_key: CacheKey,
        /// Always false; nothing is served from the cache yet
        stored: bool,
        /// Always true; kept for response-shape stability
        in_progress: bool,
        /// Suggested poll delay
        retry_after_ms: u64,
    },
    /// The last attempt failed and no retry was requested.
    Failed {
        /// Identity of the generation lineage
        cache_key: CacheKey,
        /// Recorded failure category
        error_code: Option<FailureCode>,
        /// Bounded failure description
        error_message: Option<String>,
    },
}

impl GenerationResponse {
    /// Build the complete response from a stored record.
    pub fn complete(record: GenerationRecord, stored: bool) -> Self {
        let cache_key = record_key(&record);
        GenerationResponse::Complete {
            cache_key,
            stored,
            content: record.content.unwrap_or(Value::Null),
            updated_at: record.updated_at,
        }
    }

    /// Build the pending response for a cache key.
    pub fn pending(key: &CacheKey) -> Self {
        GenerationResponse::Pending {
            cache_key: key.clone(),
            stored: false,
            in_progress: true,
            retry_after_ms: RETRY_AFTER_MS,
        }
    }

    /// Build the failed response from a stored record.
    pub fn failed(record: &GenerationRecord) -> Self {
        GenerationResponse::Failed {
            cache_key: record_key(record),
            error_code: record.error_code,
            error_message: record.error_message.clone(),
        }
    }

    /// Whether this is the pending variant.
    pub fn is_pending(&self) -> bool {
        matches!(self, GenerationResponse::Pending { .. })
    }
}

fn record_key(record: &GenerationRecord) -> CacheKey {
    CacheKey::compose(
        record.book_id.clone(),
        record.section,
        record.provider.clone(),
        record.model.clone(),
        record.prompt_version.clone(),
    )
}

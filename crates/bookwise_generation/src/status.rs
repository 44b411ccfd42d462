//! Read-only status projection over the generation store.

use crate::response::RETRY_AFTER_MS;
use bookwise_core::{CacheKey, FailureCode};
use bookwise_error::DatabaseError;
use bookwise_interface::{GenerationRecord, GenerationStatus, GenerationStore};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Projection of a generation row for polling callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StatusReport {
    /// No row exists for the key.
    Missing,
    /// An attempt is in flight.
    Pending {
        /// Always true; kept for response-shape stability
        in_progress: bool,
        /// Suggested poll delay
        retry_after_ms: u64,
    },
    /// Content is stored and valid.
    Complete {
        /// Always true; kept for response-shape stability
        stored: bool,
        /// When the content was last written
        updated_at: DateTime<Utc>,
        /// Always null; terminal states carry no poll hint
        retry_after_ms: Option<u64>,
    },
    /// The last attempt failed.
    Failed {
        /// Recorded failure category
        error_code: Option<FailureCode>,
        /// Always null; terminal states carry no poll hint
        retry_after_ms: Option<u64>,
    },
}

impl StatusReport {
    fn from_record(record: GenerationRecord) -> Self {
        match record.status {
            GenerationStatus::Pending => StatusReport::Pending {
                in_progress: true,
                retry_after_ms: RETRY_AFTER_MS,
            },
            GenerationStatus::Complete => StatusReport::Complete {
                stored: true,
                updated_at: record.updated_at,
                retry_after_ms: None,
            },
            GenerationStatus::Failed => StatusReport::Failed {
                error_code: record.error_code,
                retry_after_ms: None,
            },
        }
    }
}

/// Read-only view of generation state.
///
/// Status queries never claim, never mutate, and never trigger
/// generation, so polling is always safe.
pub struct StatusService<S> {
    store: Arc<S>,
}

impl<S: GenerationStore> StatusService<S> {
    /// Create a status service over a generation store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Project the current state of a cache key.
    pub fn get_status(&self, key: &CacheKey) -> Result<StatusReport, DatabaseError> {
        Ok(match self.store.lookup(key)? {
            None => StatusReport::Missing,
            Some(record) => StatusReport::from_record(record),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_serializes_bare() {
        let body = serde_json::to_value(StatusReport::Missing).unwrap();
        assert_eq!(body, serde_json::json!({"status": "missing"}));
    }

    #[test]
    fn failed_carries_error_code() {
        let report = StatusReport::Failed {
            error_code: Some(FailureCode::Timeout),
            retry_after_ms: None,
        };
        let body = serde_json::to_value(report).unwrap();
        assert_eq!(body["status"], "failed");
        assert_eq!(body["error_code"], "timeout");
        assert_eq!(body["retry_after_ms"], serde_json::Value::Null);
    }
}

//! Generation record and store-protocol types.

use bookwise_core::{FailureCode, SectionContent, SectionKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a generation record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// A claim is held; an attempt may be in flight
    #[display("pending")]
    Pending,
    /// Contract-valid content is stored
    #[display("complete")]
    Complete,
    /// The last attempt failed with a recorded category
    #[display("failed")]
    Failed,
}

impl GenerationStatus {
    /// Storage name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStatus::Pending => "pending",
            GenerationStatus::Complete => "complete",
            GenerationStatus::Failed => "failed",
        }
    }

    /// Parse a storage name back into a status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(GenerationStatus::Pending),
            "complete" => Some(GenerationStatus::Complete),
            "failed" => Some(GenerationStatus::Failed),
            _ => None,
        }
    }

    /// Whether this status may be re-entered into `pending` by a forced
    /// reclaim.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GenerationStatus::Complete | GenerationStatus::Failed)
    }
}

/// Token granting the right to finish one claimed attempt.
///
/// Captured at claim time from the row's attempt count; a `finish` whose
/// token no longer matches the row is stale and must be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptToken(pub i32);

/// One generation attempt lineage, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Book the generation belongs to
    pub book_id: String,
    /// Section being generated
    pub section: SectionKind,
    /// Provider name
    pub provider: String,
    /// Model identifier
    pub model: String,
    /// Prompt template version
    pub prompt_version: String,
    /// Section contract version
    pub schema_version: String,
    /// Lifecycle state
    pub status: GenerationStatus,
    /// Stored content; present iff status is complete
    pub content: Option<serde_json::Value>,
    /// Failure category; present iff status is failed
    pub error_code: Option<FailureCode>,
    /// Bounded failure description; present iff status is failed
    pub error_message: Option<String>,
    /// Number of claims taken on this lineage; never decreases
    pub attempt_count: i32,
    /// When the current/last attempt was claimed
    pub started_at: Option<DateTime<Utc>>,
    /// When the last attempt finished
    pub finished_at: Option<DateTime<Utc>>,
    /// Row creation time
    pub created_at: DateTime<Utc>,
    /// Last mutation time
    pub updated_at: DateTime<Utc>,
}

impl GenerationRecord {
    /// The attempt token for the currently claimed attempt.
    pub fn attempt_token(&self) -> AttemptToken {
        AttemptToken(self.attempt_count)
    }
}

/// Result of a claim operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimOutcome {
    /// The claim succeeded; the caller holds the exclusive right to run
    /// one attempt and finish it
    Claimed(GenerationRecord),
    /// `claim_new` lost an insert race; the row now exists
    AlreadyExists,
    /// `claim_retry` found the row in a different state than expected
    Conflict,
}

/// Result of a finish operation.
#[derive(Debug, Clone, PartialEq)]
pub enum FinishOutcome {
    /// The outcome was persisted
    Committed(GenerationRecord),
    /// A newer claim superseded this attempt; nothing was written
    StaleAttempt,
}

/// Terminal outcome of one generation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// The attempt produced contract-valid content
    Complete(SectionContent),
    /// The attempt failed with a categorized error
    Failed {
        /// Failure category
        code: FailureCode,
        /// Bounded description; truncated before persistence
        message: String,
    },
}

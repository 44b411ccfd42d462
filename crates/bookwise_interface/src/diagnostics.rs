//! Diagnostics emitter contract.

use bookwise_core::FailureCode;

/// One structured event from a coordinator decision point.
///
/// Fields never include full prompt text, full raw provider payloads, or
/// credentials. Decode failures carry only a bounded tail of the raw
/// output plus its length.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticEvent {
    /// A complete row satisfied the request without generation
    CacheHit {
        /// Cache key in display form
        key: String,
    },
    /// No usable row existed; a claim was attempted
    CacheMiss {
        /// Cache key in display form
        key: String,
    },
    /// A claim succeeded and an attempt is starting
    Claimed {
        /// Cache key in display form
        key: String,
        /// Attempt number granted by this claim
        attempt: i32,
    },
    /// A claim race was lost; the caller observes pending instead
    ClaimLost {
        /// Cache key in display form
        key: String,
    },
    /// The producer call is starting
    ProducerStarted {
        /// Cache key in display form
        key: String,
    },
    /// The producer call returned
    ProducerFinished {
        /// Cache key in display form
        key: String,
        /// Wall-clock latency of the producer call
        latency_ms: u64,
    },
    /// Producer output parsed but violated the section contract
    ValidationFailed {
        /// Cache key in display form
        key: String,
        /// Contract violation description
        detail: String,
    },
    /// Producer output could not be decoded at all
    OutputUndecodable {
        /// Cache key in display form
        key: String,
        /// Bounded tail of the raw output
        tail: String,
        /// Total length of the raw output in bytes
        len: usize,
    },
    /// An attempt committed a terminal outcome
    AttemptFinished {
        /// Cache key in display form
        key: String,
        /// Failure category, or None for a completed attempt
        error_code: Option<FailureCode>,
        /// Wall-clock latency from claim to finish
        latency_ms: u64,
    },
    /// A finish was rejected because a newer claim superseded it
    StaleAttemptDiscarded {
        /// Cache key in display form
        key: String,
    },
    /// An in-flight attempt was observed; the caller was told to poll
    PendingObserved {
        /// Cache key in display form
        key: String,
        /// Retry hint returned to the caller
        retry_after_ms: u64,
    },
    /// A previously failed row was observed without force
    FailureObserved {
        /// Cache key in display form
        key: String,
        /// Recorded failure category
        error_code: Option<FailureCode>,
    },
}

/// Sink for coordinator decision-point events.
///
/// Every branch of the coordinator's decision table emits exactly one
/// event, so the table is directly testable by asserting on the emitted
/// sequence.
pub trait Diagnostics: Send + Sync {
    /// Record one event.
    fn emit(&self, event: DiagnosticEvent);
}

/// A diagnostics sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn emit(&self, _event: DiagnosticEvent) {}
}

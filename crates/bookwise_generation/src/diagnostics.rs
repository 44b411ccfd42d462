//! Tracing-backed diagnostics sink.

use bookwise_interface::{DiagnosticEvent, Diagnostics};
use tracing::{debug, info, warn};

const TAIL_MAX_CHARS: usize = 120;

/// Bounded tail of a raw output string, safe for log lines.
///
/// Keeps at most the last 120 characters, cutting on a character
/// boundary. Full raw payloads never reach the logs.
pub fn bounded_tail(raw: &str) -> String {
    let count = raw.chars().count();
    if count <= TAIL_MAX_CHARS {
        return raw.to_string();
    }
    raw.chars().skip(count - TAIL_MAX_CHARS).collect()
}

/// [`Diagnostics`] sink that forwards every event to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn emit(&self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::CacheHit { key } => {
                info!(%key, "Cache hit");
            }
            DiagnosticEvent::CacheMiss { key } => {
                debug!(%key, "Cache miss");
            }
            DiagnosticEvent::Claimed { key, attempt } => {
                info!(%key, attempt, "Claimed generation attempt");
            }
            DiagnosticEvent::ClaimLost { key } => {
                debug!(%key, "Lost claim race");
            }
            DiagnosticEvent::ProducerStarted { key } => {
                debug!(%key, "Producer call starting");
            }
            DiagnosticEvent::ProducerFinished { key, latency_ms } => {
                debug!(%key, latency_ms, "Producer call returned");
            }
            DiagnosticEvent::ValidationFailed { key, detail } => {
                warn!(%key, %detail, "Producer output violated the section contract");
            }
            DiagnosticEvent::OutputUndecodable { key, tail, len } => {
                warn!(%key, %tail, len, "Producer output could not be decoded");
            }
            DiagnosticEvent::AttemptFinished {
                key,
                error_code,
                latency_ms,
            } => match error_code {
                None => info!(%key, latency_ms, "Attempt completed"),
                Some(code) => warn!(%key, %code, latency_ms, "Attempt failed"),
            },
            DiagnosticEvent::StaleAttemptDiscarded { key } => {
                warn!(%key, "Discarded stale attempt result");
            }
            DiagnosticEvent::PendingObserved { key, retry_after_ms } => {
                debug!(%key, retry_after_ms, "Attempt already in flight");
            }
            DiagnosticEvent::FailureObserved { key, error_code } => {
                debug!(
                    %key,
                    error_code = error_code.map(|c| c.as_str()),
                    "Serving recorded failure"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_output_kept_whole() {
        assert_eq!(bounded_tail("not json"), "not json");
    }

    #[test]
    fn long_output_keeps_only_the_tail() {
        let raw = "x".repeat(500) + "tail";
        let tail = bounded_tail(&raw);
        assert_eq!(tail.chars().count(), TAIL_MAX_CHARS);
        assert!(tail.ends_with("tail"));
    }

    #[test]
    fn cuts_on_character_boundaries() {
        let raw = "é".repeat(TAIL_MAX_CHARS + 5);
        let tail = bounded_tail(&raw);
        assert_eq!(tail.chars().count(), TAIL_MAX_CHARS);
    }
}

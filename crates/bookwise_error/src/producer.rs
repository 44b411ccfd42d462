//! Content producer (LLM provider) error types.

/// Producer error conditions.
///
/// The taxonomy mirrors the failure categories recorded on a generation
/// row: transport failures and malformed output become `provider_error`,
/// deadline overruns become `timeout`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProducerErrorKind {
    /// The provider request could not be sent or the connection failed
    #[display("Provider transport error: {}", _0)]
    Transport(String),
    /// The provider did not respond within the configured deadline
    #[display("Provider request timed out")]
    Timeout,
    /// The provider responded with a non-success status
    #[display("Provider API error ({}): {}", status, message)]
    Api {
        /// HTTP status code returned by the provider
        status: u16,
        /// Short description of the failure
        message: String,
    },
    /// The provider returned output that is empty or not parseable JSON
    #[display("Provider output error: {}", _0)]
    Output(String),
}

/// Producer error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Producer Error: {} at line {} in {}", kind, line, file)]
pub struct ProducerError {
    /// The kind of error that occurred
    pub kind: ProducerErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProducerError {
    /// Create a new ProducerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProducerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the failure was a deadline overrun.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ProducerErrorKind::Timeout)
    }

    /// Short failure description safe to persist and return to callers.
    ///
    /// Carries the failure category only; raw provider output stays out
    /// of stored rows and response bodies.
    pub fn summary(&self) -> String {
        match &self.kind {
            ProducerErrorKind::Transport(_) => "provider request could not be completed".to_string(),
            ProducerErrorKind::Timeout => "provider request timed out".to_string(),
            ProducerErrorKind::Api { status, .. } => {
                format!("provider request failed with status {status}")
            }
            ProducerErrorKind::Output(_) => "provider returned undecodable output".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_never_carries_raw_output() {
        let error = ProducerError::new(ProducerErrorKind::Output("raw provider text".to_string()));
        assert_eq!(error.summary(), "provider returned undecodable output");
    }

    #[test]
    fn summary_names_api_status_only() {
        let error = ProducerError::new(ProducerErrorKind::Api {
            status: 429,
            message: "rate limited".to_string(),
        });
        assert_eq!(error.summary(), "provider request failed with status 429");
    }
}

//! Failure taxonomy for generation attempts.

use serde::{Deserialize, Serialize};

/// Category recorded on a failed generation attempt.
///
/// Claim-race losses and stale-attempt rejections are internal control
/// flow, not failures, and never appear here.
///
/// # Examples
///
/// ```
/// use bookwise_core::FailureCode;
/// use std::str::FromStr;
///
/// assert_eq!(FailureCode::Timeout.to_string(), "timeout");
/// assert_eq!(
///     FailureCode::from_str("schema_validation").unwrap(),
///     FailureCode::SchemaValidation
/// );
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureCode {
    /// Output parsed as JSON but violated the section contract
    SchemaValidation,
    /// The producer errored, or returned malformed/unparseable output
    ProviderError,
    /// The producer exceeded its configured deadline
    Timeout,
    /// Anything else, including store failures during the generate phase
    Unexpected,
}

impl FailureCode {
    /// Storage/wire name of this failure code.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCode::SchemaValidation => "schema_validation",
            FailureCode::ProviderError => "provider_error",
            FailureCode::Timeout => "timeout",
            FailureCode::Unexpected => "unexpected",
        }
    }
}

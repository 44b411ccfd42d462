//! Generation cache and single-flight engine.
//!
//! The coordinator in this crate owns the decision table that turns a
//! generation request into exactly one of cache hit, claimed attempt, or
//! pending observation. All mutual exclusion is delegated to the
//! [`bookwise_interface::GenerationStore`] protocol, so the engine itself
//! holds no locks and stays correct across multiple server processes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod coordinator;
mod diagnostics;
mod response;
mod status;

pub use coordinator::GenerationCoordinator;
pub use diagnostics::{bounded_tail, TracingDiagnostics};
pub use response::{GenerationResponse, RETRY_AFTER_MS};
pub use status::{StatusReport, StatusService};

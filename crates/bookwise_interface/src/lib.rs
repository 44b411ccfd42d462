//! Trait seams between the BookWise generation engine and its collaborators.
//!
//! The coordinator owns the business logic. Everything it touches (the
//! generation store, the content producer, the book metadata resolver, and
//! the diagnostics sink) is reached through the traits defined here, so
//! each collaborator can be swapped for a test double.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod diagnostics;
mod generator;
mod record;
mod resolver;
mod store;

pub use diagnostics::{DiagnosticEvent, Diagnostics, NullDiagnostics};
pub use generator::SectionGenerator;
pub use record::{
    AttemptToken, ClaimOutcome, FinishOutcome, GenerationOutcome, GenerationRecord,
    GenerationStatus,
};
pub use resolver::{BookResolver, BookStore};
pub use store::GenerationStore;

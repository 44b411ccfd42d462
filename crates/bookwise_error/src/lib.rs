//! Error types for the BookWise generation engine.
//!
//! This crate provides the foundation error types used throughout the BookWise workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use bookwise_error::{BookwiseResult, CatalogError, CatalogErrorKind};
//!
//! fn fetch_work() -> BookwiseResult<String> {
//!     Err(CatalogError::new(CatalogErrorKind::NotFound("OL1W".into())))?
//! }
//!
//! match fetch_work() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
#[cfg(feature = "database")]
mod database;
mod error;
mod producer;
mod server;

pub use catalog::{CatalogError, CatalogErrorKind};
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{BookwiseError, BookwiseErrorKind, BookwiseResult};
pub use producer::{ProducerError, ProducerErrorKind};
pub use server::{ServerError, ServerErrorKind};

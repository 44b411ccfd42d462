//! Open Library metadata resolution for BookWise.
//!
//! The generation engine requires a stored [`BookRecord`] before it will
//! claim a generation; this crate resolves work metadata from Open
//! Library, normalizes it, and upserts it through a [`BookStore`].
//!
//! [`BookRecord`]: bookwise_core::BookRecord
//! [`BookStore`]: bookwise_interface::BookStore

mod client;
mod metadata;
mod resolver;
mod work_id;

pub use client::OpenLibraryClient;
pub use metadata::{resolve_work_metadata, WorkMetadata};
pub use resolver::CatalogBookResolver;
pub use work_id::is_valid_work_id;

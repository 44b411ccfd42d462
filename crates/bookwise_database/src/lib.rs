//! PostgreSQL integration for BookWise.
//!
//! This crate provides the Diesel schema, row models, and the Postgres
//! implementation of the generation store's claim/transition protocol.
//!
//! # Features
//!
//! - Connection pooling over `r2d2`
//! - Book metadata persistence (upsert on re-resolution)
//! - The single-flight claim protocol, built on the cache-key uniqueness
//!   constraint and guarded updates

mod book_repository;
mod connection;
mod generation_store;
mod models;

// Public module for external access
pub mod schema;

pub use book_repository::PostgresBookRepository;
pub use connection::{create_pool, establish_connection, run_migrations, PgPool};
pub use generation_store::PostgresGenerationStore;
pub use models::{BookRow, GenerationRow, NewGenerationRow};

use bookwise_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
